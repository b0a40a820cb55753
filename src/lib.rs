// ==========================================
// 餐饮备餐聚合引擎 - 核心库
// ==========================================
// 职责: 订单 → 备餐清单 / 营业日 / 服务时段
// 系统定位: 厨房看板的计算内核（无网络、无存储）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部订单归一化
pub mod importer;

// 引擎层 - 备餐规则
pub mod engine;

// 配置层
pub mod config;

// 导出层 - CSV
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    OrderStatus, PriorityTag, ServiceBucket, ServiceType, StatusFilter, StatusGroup,
};

// 领域实体
pub use domain::{
    AggregatedItem, BucketPrep, DailyPrep, LineItem, Order, OrderItemGroups, OrderSchedule,
    PrepList, WeekDay,
};

// 引擎
pub use engine::{
    group_order_items, Clock, DayPartitioner, FixedClock, ItemClassifier, ItemNormalizer,
    PrepAggregator, PrepBoard, StatusEngine, StatusRules, SystemClock,
};

// 边界 / 配置
pub use config::{ConfigError, PrepConfig};
pub use importer::{ImportError, OrderImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "catering-prep";
