// ==========================================
// 餐饮备餐聚合引擎 - 配置层
// ==========================================
// 职责: 备餐配置加载 / 校验 / 保存
// 存储: JSON 文件
// ==========================================

pub mod prep_config;

// 重导出核心配置
pub use prep_config::{default_config_path, ConfigError, ConfigResult, PrepConfig};
