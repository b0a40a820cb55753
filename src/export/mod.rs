// ==========================================
// 餐饮备餐聚合引擎 - 导出层
// ==========================================

pub mod csv_export;

pub use csv_export::{write_prep_csv, write_prep_csv_to_path, ExportError, ExportResult};
