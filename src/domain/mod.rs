// ==========================================
// 餐饮备餐聚合引擎 - 领域模型层
// ==========================================
// 职责: 定义订单实体、领域类型、备餐视图结构
// 红线: 不含 JSON 解析逻辑,不含引擎逻辑
// ==========================================

pub mod order;
pub mod prep;
pub mod types;

// 重导出核心类型
pub use order::{LineItem, Order, OrderSchedule};
pub use prep::{
    AggregatedItem, BucketPrep, Classification, ClassifiedItem, DailyPrep, NormalizedItem,
    OrderItemGroups, PrepList, WeekDay,
};
pub use types::{
    rank_of, OrderStatus, PriorityTag, ServiceBucket, ServiceType, StatusFilter, StatusGroup,
    UNRANKED,
};
