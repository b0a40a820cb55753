// ==========================================
// 测试数据构建器 - Order
// ==========================================

use catering_prep::{LineItem, Order, OrderSchedule, OrderStatus, ServiceType};

pub struct OrderBuilder {
    id: String,
    status: Option<OrderStatus>,
    schedule: OrderSchedule,
    items: Vec<LineItem>,
    customer_name: Option<String>,
    service_type: ServiceType,
}

impl OrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: None,
            schedule: OrderSchedule::default(),
            items: Vec::new(),
            customer_name: None,
            service_type: ServiceType::Pickup,
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn event_date(mut self, value: &str) -> Self {
        self.schedule.event_date = Some(value.to_string());
        self
    }

    pub fn pickup_time(mut self, value: &str) -> Self {
        self.schedule.pickup_time = Some(value.to_string());
        self
    }

    pub fn created_at(mut self, value: &str) -> Self {
        self.schedule.created_at = Some(value.to_string());
        self
    }

    pub fn item(mut self, name: &str, quantity: i64) -> Self {
        self.items.push(LineItem::new(name, quantity));
        self
    }

    pub fn customer(mut self, name: &str) -> Self {
        self.customer_name = Some(name.to_string());
        self
    }

    pub fn delivery(mut self) -> Self {
        self.service_type = ServiceType::Delivery;
        self
    }

    pub fn build(self) -> Order {
        Order {
            id: self.id,
            status: self.status,
            schedule: self.schedule,
            items: self.items,
            customer_name: self.customer_name,
            service_type: self.service_type,
        }
    }
}
