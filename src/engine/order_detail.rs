// ==========================================
// 餐饮备餐聚合引擎 - 单订单明细分组
// ==========================================
// 职责: 订单详情页的 优先 / 餐品 / 酱料 三组
// 说明: 与备餐清单不同,被排除条目保留在 sauces 组中
// ==========================================

use crate::domain::order::Order;
use crate::domain::prep::OrderItemGroups;
use crate::engine::aggregator::{merge_items, sort_others, sort_priority, PrepAggregator};

/// 单订单分组
///
/// 每组内按 merge_key 合并; 优先组按 rank → 数量降序 → 名称，其余两组按数量降序 → 名称
pub fn group_order_items(aggregator: &PrepAggregator, order: &Order) -> OrderItemGroups {
    let mut priority = Vec::new();
    let mut food = Vec::new();
    let mut sauces = Vec::new();

    for classified in aggregator.classify_items(order) {
        if classified.classification.excluded {
            sauces.push(classified);
        } else if classified.classification.priority_tag.is_some() {
            priority.push(classified);
        } else {
            food.push(classified);
        }
    }

    let mut priority = merge_items(priority);
    let mut food = merge_items(food);
    let mut sauces = merge_items(sauces);
    sort_priority(&mut priority);
    sort_others(&mut food);
    sort_others(&mut sauces);

    OrderItemGroups {
        priority,
        food,
        sauces,
    }
}
