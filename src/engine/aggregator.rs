// ==========================================
// 餐饮备餐聚合引擎 - 备餐聚合器
// ==========================================
// 职责: 多订单明细 → 按 merge_key 合并 → 优先 / 其他 两组排序
// 排序:
//   优先组: rank 升序 → 数量降序 → 名称升序
//   其他组: 数量降序 → 名称升序
// 红线: 不抛错; 同输入必得同输出
// ==========================================

use crate::domain::order::Order;
use crate::domain::prep::{AggregatedItem, ClassifiedItem, PrepList};
use crate::domain::types::{rank_of, PriorityTag};
use crate::engine::classifier::ItemClassifier;
use crate::engine::normalizer::ItemNormalizer;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// PrepAggregator
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PrepAggregator {
    normalizer: ItemNormalizer,
    classifier: ItemClassifier,
}

impl PrepAggregator {
    pub fn new(classifier: ItemClassifier) -> Self {
        Self {
            normalizer: ItemNormalizer::new(),
            classifier,
        }
    }

    pub fn classifier(&self) -> &ItemClassifier {
        &self.classifier
    }

    pub fn normalizer(&self) -> &ItemNormalizer {
        &self.normalizer
    }

    /// 归一化并分类单个订单的明细（含被排除条目）
    pub fn classify_items(&self, order: &Order) -> Vec<ClassifiedItem> {
        self.normalizer
            .normalize(order)
            .into_iter()
            .map(|item| {
                let classification = self.classifier.classify(&item.name);
                ClassifiedItem {
                    item,
                    classification,
                }
            })
            .collect()
    }

    /// 聚合订单集合为备餐清单
    ///
    /// 被排除条目（酱料 / 餐具）不出现在结果中
    #[instrument(skip(self, orders))]
    pub fn aggregate<'a, I>(&self, orders: I) -> PrepList
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut order_count = 0usize;
        let mut excluded = 0usize;
        let mut kept = Vec::new();

        for order in orders {
            order_count += 1;
            for classified in self.classify_items(order) {
                if classified.classification.excluded {
                    excluded += 1;
                } else {
                    kept.push(classified);
                }
            }
        }

        let merged = merge_items(kept);
        let (mut priority, mut others): (Vec<_>, Vec<_>) =
            merged.into_iter().partition(|i| i.priority_tag.is_some());
        sort_priority(&mut priority);
        sort_others(&mut others);

        debug!(
            orders = order_count,
            excluded,
            priority = priority.len(),
            others = others.len(),
            "备餐聚合完成"
        );

        PrepList { priority, others }
    }
}

// ==========================================
// 合并与排序（供单订单分组复用）
// ==========================================

/// 按 merge_key 合并: 数量求和、名称取首次出现、标签取最小 rank
pub(crate) fn merge_items<I>(items: I) -> Vec<AggregatedItem>
where
    I: IntoIterator<Item = ClassifiedItem>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<AggregatedItem> = Vec::new();

    for ClassifiedItem {
        item,
        classification,
    } in items
    {
        let tag = classification.priority_tag;
        match index.get(&item.merge_key) {
            Some(&pos) => {
                let entry = &mut merged[pos];
                entry.quantity = entry.quantity.saturating_add(item.quantity);
                entry.priority_tag = min_rank_tag(entry.priority_tag, tag);
            }
            None => {
                index.insert(item.merge_key.clone(), merged.len());
                merged.push(AggregatedItem {
                    name: item.name,
                    merge_key: item.merge_key,
                    quantity: item.quantity,
                    priority_tag: tag,
                });
            }
        }
    }

    merged
}

fn min_rank_tag(a: Option<PriorityTag>, b: Option<PriorityTag>) -> Option<PriorityTag> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if y.rank() < x.rank() { y } else { x }),
        (x, None) => x,
        (None, y) => y,
    }
}

fn by_quantity_then_name(a: &AggregatedItem, b: &AggregatedItem) -> Ordering {
    b.quantity
        .cmp(&a.quantity)
        .then_with(|| a.name.cmp(&b.name))
}

pub(crate) fn sort_priority(items: &mut [AggregatedItem]) {
    items.sort_by(|a, b| {
        rank_of(a.priority_tag)
            .cmp(&rank_of(b.priority_tag))
            .then_with(|| by_quantity_then_name(a, b))
    });
}

pub(crate) fn sort_others(items: &mut [AggregatedItem]) {
    items.sort_by(by_quantity_then_name);
}
