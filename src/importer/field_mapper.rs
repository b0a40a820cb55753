// ==========================================
// 餐饮备餐聚合引擎 - 字段映射器实现
// ==========================================
// 职责: 源字段（多套历史命名）→ 标准 Order 字段
// 规则: 每个概念按别名表顺序取第一个可用值
// ==========================================

use crate::domain::order::{LineItem, Order, OrderSchedule};
use crate::domain::types::{OrderStatus, ServiceType};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::order_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};
use serde_json::{Map, Value};
use tracing::debug;

// ==========================================
// 别名表
// ==========================================
pub const ID_ALIASES: &[&str] = &["id", "orderId", "_id"];
pub const ITEM_LIST_ALIASES: &[&str] = &["items", "lineItems"];
pub const ITEM_NAME_ALIASES: &[&str] = &["name", "title", "itemName", "productName"];
pub const ITEM_QUANTITY_ALIASES: &[&str] = &["qty", "quantity", "count"];
pub const CUSTOMER_ALIASES: &[&str] =
    &["customerName", "customer", "name", "contactName", "companyName"];
pub const SERVICE_TYPE_ALIASES: &[&str] = &[
    "serviceType",
    "fulfillmentType",
    "orderType",
    "type",
    "deliveryType",
];
pub const ADDRESS_ALIASES: &[&str] = &["deliveryAddress", "address", "dropoffAddress", "destination"];

/// 明细名称全部缺失时的默认值
pub const UNNAMED_ITEM: &str = "Unnamed Item";

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 按别名顺序取第一个非空文本
    fn first_text(&self, record: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find_map(|v| self.cleaner.text_value(v))
    }

    fn first_timestamp(&self, record: &Map<String, Value>, key: &str) -> Option<String> {
        record.get(key).and_then(|v| self.cleaner.timestamp_value(v))
    }

    /// 明细列表: items 为数组时优先，其次 lineItems
    fn item_list<'a>(&self, record: &'a Map<String, Value>) -> &'a [Value] {
        ITEM_LIST_ALIASES
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find_map(|v| v.as_array())
            .map(|arr| arr.as_slice())
            .unwrap_or(&[])
    }

    fn service_type(&self, record: &Map<String, Value>) -> ServiceType {
        let raw = SERVICE_TYPE_ALIASES
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find(|v| is_truthy(v))
            .and_then(|v| self.cleaner.text_value(v))
            .unwrap_or_default()
            .to_uppercase();

        if raw.contains("DELIV") {
            return ServiceType::Delivery;
        }
        if raw.contains("PICK") {
            return ServiceType::Pickup;
        }

        let subject = record
            .get("subject")
            .and_then(|v| self.cleaner.text_value(v))
            .unwrap_or_default()
            .to_uppercase();
        if subject.contains("DELIVER") {
            return ServiceType::Delivery;
        }

        // 无明确类型时按是否有地址推断
        let has_address = ADDRESS_ALIASES
            .iter()
            .filter_map(|alias| record.get(*alias))
            .any(is_truthy);
        if has_address {
            ServiceType::Delivery
        } else {
            ServiceType::Pickup
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_order(&self, record: &Map<String, Value>, index: usize) -> Order {
        let id = self.first_text(record, ID_ALIASES).unwrap_or_else(|| {
            debug!(index, "订单缺少 id");
            String::new()
        });

        let status = record
            .get("status")
            .and_then(|v| v.as_str())
            .and_then(OrderStatus::from_str);

        let schedule = OrderSchedule {
            event_date: self.first_timestamp(record, "eventDate"),
            pickup_time: self.first_timestamp(record, "pickupTime"),
            pickup_at: self.first_timestamp(record, "pickupAt"),
            scheduled_for: self.first_timestamp(record, "scheduledFor"),
            ready_at: self.first_timestamp(record, "readyAt"),
            created_at: self.first_timestamp(record, "createdAt"),
        };

        let items = self
            .item_list(record)
            .iter()
            .map(|raw| self.map_to_line_item(raw))
            .collect();

        let customer_name = self
            .cleaner
            .normalize_null(self.first_text(record, CUSTOMER_ALIASES));

        Order {
            id,
            status,
            schedule,
            items,
            customer_name,
            service_type: self.service_type(record),
        }
    }

    fn map_to_line_item(&self, record: &Value) -> LineItem {
        let Some(obj) = record.as_object() else {
            return LineItem::new(UNNAMED_ITEM, 1);
        };

        let name = self
            .first_text(obj, ITEM_NAME_ALIASES)
            .unwrap_or_else(|| UNNAMED_ITEM.to_string());

        // 取第一个非 null 的数量字段
        let quantity = ITEM_QUANTITY_ALIASES
            .iter()
            .filter_map(|alias| obj.get(*alias))
            .find(|v| !v.is_null())
            .map(|v| self.cleaner.quantity_value(v))
            .unwrap_or(1);

        LineItem { name, quantity }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Order {
        let mapper = FieldMapper::new();
        mapper.map_to_order(value.as_object().unwrap(), 0)
    }

    #[test]
    fn test_field_mapper_basic() {
        let order = map(json!({
            "id": "ord-1",
            "status": "pending_review",
            "pickupTime": "2026-01-13T16:30:00.000Z",
            "customerName": "  Acme Corp ",
            "items": [{"name": "Fruit Tray", "qty": 2}]
        }));

        assert_eq!(order.id, "ord-1");
        assert_eq!(order.status, Some(OrderStatus::PendingReview));
        assert_eq!(
            order.schedule.pickup_time.as_deref(),
            Some("2026-01-13T16:30:00.000Z")
        );
        assert_eq!(order.customer_name.as_deref(), Some("Acme Corp"));
        assert_eq!(order.items, vec![LineItem::new("Fruit Tray", 2)]);
    }

    #[test]
    fn test_line_items_fallback_when_items_not_array() {
        let order = map(json!({
            "id": 7,
            "items": "oops",
            "lineItems": [{"title": "Cobb Salad Tray", "quantity": "3"}]
        }));
        assert_eq!(order.id, "7");
        assert_eq!(order.items, vec![LineItem::new("Cobb Salad Tray", 3)]);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let order = map(json!({"id": "x"}));
        assert!(order.items.is_empty());
        assert_eq!(order.status, None);
    }

    #[test]
    fn test_item_name_aliases_and_default() {
        let mapper = FieldMapper::new();
        let item = mapper.map_to_line_item(&json!({"name": "", "itemName": "Wrap Tray"}));
        assert_eq!(item.name, "Wrap Tray");

        let item = mapper.map_to_line_item(&json!({"qty": 4}));
        assert_eq!(item, LineItem::new(UNNAMED_ITEM, 4));

        // 空白名称保留，交由 normalizer 丢弃
        let item = mapper.map_to_line_item(&json!({"name": "   "}));
        assert_eq!(item.name, "   ");
    }

    #[test]
    fn test_item_quantity_first_non_null() {
        let mapper = FieldMapper::new();
        let item = mapper.map_to_line_item(&json!({"name": "A", "qty": null, "quantity": 5, "count": 9}));
        assert_eq!(item.quantity, 5);

        let item = mapper.map_to_line_item(&json!({"name": "A", "qty": "abc", "quantity": 5}));
        assert_eq!(item.quantity, 1);

        let item = mapper.map_to_line_item(&json!("just a string"));
        assert_eq!(item, LineItem::new(UNNAMED_ITEM, 1));
    }

    #[test]
    fn test_service_type_detection() {
        assert_eq!(map(json!({"serviceType": "Delivery"})).service_type, ServiceType::Delivery);
        assert_eq!(map(json!({"orderType": "pick-up"})).service_type, ServiceType::Pickup);
        assert_eq!(
            map(json!({"deliveryAddress": "1 Main St"})).service_type,
            ServiceType::Delivery
        );
        assert_eq!(map(json!({"address": ""})).service_type, ServiceType::Pickup);
        assert_eq!(map(json!({})).service_type, ServiceType::Pickup);
    }

    #[test]
    fn test_service_type_from_subject() {
        assert_eq!(
            map(json!({"subject": "Catering Delivery - Lakeside Church"})).service_type,
            ServiceType::Delivery
        );
        // 明确的类型字段优先于 subject
        assert_eq!(
            map(json!({"serviceType": "PICKUP", "subject": "Delivery order"})).service_type,
            ServiceType::Pickup
        );
        assert_eq!(
            map(json!({"subject": "Lunch pickup"})).service_type,
            ServiceType::Pickup
        );
    }

    #[test]
    fn test_numeric_timestamps_kept_as_millis() {
        let order = map(json!({"createdAt": 1768300000000i64}));
        assert_eq!(order.schedule.created_at.as_deref(), Some("1768300000000"));
    }
}
