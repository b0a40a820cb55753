// ==========================================
// 餐饮备餐聚合引擎 - 订单实体
// ==========================================
// 职责: 边界归一化后的严格订单类型
// 红线: 引擎层只消费 Order，不直接读取原始 JSON
// ==========================================

use crate::domain::types::{OrderStatus, ServiceType};
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// 未知或缺失状态为 None
    pub status: Option<OrderStatus>,
    pub schedule: OrderSchedule,
    pub items: Vec<LineItem>,
    /// 仅用于展示
    pub customer_name: Option<String>,
    pub service_type: ServiceType,
}

impl Order {
    /// 展示用客户名（缺失时为 "Unnamed"）
    pub fn customer_label(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("Unnamed")
    }
}

// ==========================================
// OrderSchedule - 订单时间字段
// ==========================================
// 原样保留源字符串，解析由 DayPartitioner 负责
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSchedule {
    pub event_date: Option<String>,
    pub pickup_time: Option<String>,
    pub pickup_at: Option<String>,
    pub scheduled_for: Option<String>,
    pub ready_at: Option<String>,
    pub created_at: Option<String>,
}

impl OrderSchedule {
    /// 营业日取值顺序: eventDate → pickupTime → pickupAt → scheduledFor → readyAt → createdAt
    pub fn business_day_raw(&self) -> Option<&str> {
        first_present(&[
            &self.event_date,
            &self.pickup_time,
            &self.pickup_at,
            &self.scheduled_for,
            &self.ready_at,
            &self.created_at,
        ])
    }

    /// 排序时间取值顺序: pickupTime → pickupAt → scheduledFor → readyAt → createdAt → eventDate
    pub fn sort_time_raw(&self) -> Option<&str> {
        first_present(&[
            &self.pickup_time,
            &self.pickup_at,
            &self.scheduled_for,
            &self.ready_at,
            &self.created_at,
            &self.event_date,
        ])
    }

    /// 取餐时间取值顺序: pickupTime → pickupAt → scheduledFor
    pub fn pickup_raw(&self) -> Option<&str> {
        first_present(&[&self.pickup_time, &self.pickup_at, &self.scheduled_for])
    }
}

fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .find(|v| !v.is_empty())
}

// ==========================================
// LineItem - 订单明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// 源名称（未 trim，可能为空白）
    pub name: String,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_day_prefers_event_date() {
        let schedule = OrderSchedule {
            event_date: Some("2026-01-13".to_string()),
            pickup_time: Some("2026-01-14T10:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(schedule.business_day_raw(), Some("2026-01-13"));
        assert_eq!(schedule.sort_time_raw(), Some("2026-01-14T10:00:00Z"));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let schedule = OrderSchedule {
            pickup_time: Some(String::new()),
            created_at: Some("2026-01-10T08:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(schedule.sort_time_raw(), Some("2026-01-10T08:00:00Z"));
        assert_eq!(schedule.pickup_raw(), None);
    }

    #[test]
    fn test_customer_label_fallback() {
        let order = Order::default();
        assert_eq!(order.customer_label(), "Unnamed");
    }
}
