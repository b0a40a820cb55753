// ==========================================
// 餐饮备餐聚合引擎 - 备餐数据结构
// ==========================================
// 职责: 归一化条目 / 分类结果 / 聚合结果 / 看板视图
// 生命周期: 每次聚合调用新建，不持久化
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::{rank_of, PriorityTag, ServiceBucket};
use serde::Serialize;

// ==========================================
// NormalizedItem - 归一化条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedItem {
    /// 已 trim，保留原始大小写
    pub name: String,
    /// 小写 + 空白折叠 + trim
    pub merge_key: String,
    pub quantity: i64,
}

// ==========================================
// Classification - 分类结果
// ==========================================
// excluded 与 priority_tag 互斥: 被排除条目不带标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Classification {
    pub excluded: bool,
    pub priority_tag: Option<PriorityTag>,
}

impl Classification {
    pub fn excluded() -> Self {
        Self {
            excluded: true,
            priority_tag: None,
        }
    }

    pub fn kept(priority_tag: Option<PriorityTag>) -> Self {
        Self {
            excluded: false,
            priority_tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedItem {
    pub item: NormalizedItem,
    pub classification: Classification,
}

// ==========================================
// AggregatedItem - 聚合条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedItem {
    /// 首次出现的展示名称
    pub name: String,
    pub merge_key: String,
    /// 所有来源订单数量之和
    pub quantity: i64,
    /// 所有出现中 rank 最小的标签
    pub priority_tag: Option<PriorityTag>,
}

impl AggregatedItem {
    pub fn rank(&self) -> u8 {
        rank_of(self.priority_tag)
    }
}

// ==========================================
// PrepList - 备餐清单（优先 / 其他）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PrepList {
    pub priority: Vec<AggregatedItem>,
    pub others: Vec<AggregatedItem>,
}

impl PrepList {
    pub fn priority_quantity(&self) -> i64 {
        sum_quantities(&self.priority)
    }

    pub fn total_quantity(&self) -> i64 {
        self.priority_quantity()
            .saturating_add(sum_quantities(&self.others))
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.others.is_empty()
    }

    /// 优先条目在前，其次为其他条目
    pub fn iter(&self) -> impl Iterator<Item = &AggregatedItem> {
        self.priority.iter().chain(self.others.iter())
    }
}

/// 数量求和（饱和，不溢出）
fn sum_quantities(items: &[AggregatedItem]) -> i64 {
    items.iter().map(|i| i.quantity).fold(0i64, i64::saturating_add)
}

// ==========================================
// DailyPrep - 当日备餐汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPrep {
    pub day_key: String,
    pub order_count: usize,
    pub items: PrepList,
    pub total_quantity: i64,
    pub priority_quantity: i64,
}

// ==========================================
// BucketPrep - 时段备餐汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketPrep {
    pub bucket: ServiceBucket,
    /// 按计划时间升序，无时间的排最后
    pub orders: Vec<Order>,
    pub items: PrepList,
    pub total_quantity: i64,
    pub priority_quantity: i64,
    /// 卡片预览（优先条目在前）
    pub preview: Vec<AggregatedItem>,
}

// ==========================================
// OrderItemGroups - 单订单明细分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OrderItemGroups {
    pub priority: Vec<AggregatedItem>,
    pub food: Vec<AggregatedItem>,
    /// 酱料 / 餐具等被排除条目
    pub sauces: Vec<AggregatedItem>,
}

// ==========================================
// WeekDay - 周视图单日
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay {
    pub date: chrono::NaiveDate,
    pub day_key: String,
    /// 按排序时间升序
    pub orders: Vec<Order>,
    /// 所有明细数量之和（不做排除）
    pub item_count: i64,
}
