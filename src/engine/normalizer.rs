// ==========================================
// 餐饮备餐聚合引擎 - 明细归一化
// ==========================================
// 职责: Order.items → (name, merge_key, quantity)
// 红线: 纯函数,无副作用; merge_key 只由 name 决定
// ==========================================

use crate::domain::order::Order;
use crate::domain::prep::NormalizedItem;

/// 合并键: 小写 + 连续空白折叠为单个空格 + 去首尾空白
pub fn merge_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// ItemNormalizer
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemNormalizer;

impl ItemNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 归一化单个订单的明细
    ///
    /// 名称 trim 后为空的明细直接丢弃；数量原样透传（含 0 与负数）
    pub fn normalize(&self, order: &Order) -> Vec<NormalizedItem> {
        order
            .items
            .iter()
            .filter_map(|item| {
                let name = item.name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(NormalizedItem {
                    name: name.to_string(),
                    merge_key: merge_key(name),
                    quantity: item.quantity,
                })
            })
            .collect()
    }

    /// 订单明细总件数（不做排除，周视图使用）
    pub fn item_count(&self, order: &Order) -> i64 {
        order
            .items
            .iter()
            .map(|item| item.quantity)
            .fold(0i64, i64::saturating_add)
    }
}
