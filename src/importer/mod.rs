// ==========================================
// 餐饮备餐聚合引擎 - 导入层
// ==========================================
// 职责: 外部订单 JSON → 严格 Order（边界归一化）
// 红线: 引擎层不感知字段别名
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod order_importer;
pub mod order_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use order_importer::OrderImporter;

// 重导出 Trait 接口
pub use order_importer_trait::{DataCleaner, FieldMapper};
