// ==========================================
// 餐饮备餐聚合引擎 - 备餐配置
// ==========================================
// 存储: JSON 文件（所有字段可缺省,缺省取默认值）
// 默认位置: {config_dir}/catering-prep/config.json
// 说明: 优先规则表与时段边界固定,不开放配置
// ==========================================

use crate::engine::status::DEFAULT_AUTO_PROGRESS_LEAD_MINUTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置目录名
pub const CONFIG_DIR_NAME: &str = "catering-prep";
/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 默认时段卡片预览条数
pub const DEFAULT_PREVIEW_LIMIT: usize = 4;

// ==========================================
// ConfigError
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// PrepConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// 取餐前多少分钟自动转为制作中
    pub auto_progress_lead_minutes: i64,

    /// 时段卡片预览条数
    pub preview_limit: usize,

    /// 追加的排除关键字（在内置酱料 / 餐具表之后）
    pub extra_exclude_keywords: Vec<String>,

    /// 展示语言（"en" / "zh-CN"）
    pub locale: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            auto_progress_lead_minutes: DEFAULT_AUTO_PROGRESS_LEAD_MINUTES,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            extra_exclude_keywords: Vec::new(),
            locale: "en".to_string(),
        }
    }
}

impl PrepConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: PrepConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        config.validate()?;
        info!(path = %path_str, "已加载备餐配置");
        Ok(config)
    }

    /// 从默认位置加载; 文件不存在时返回默认配置
    pub fn load_or_default() -> ConfigResult<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 写入 JSON 文件（自动创建上级目录）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let io_err = |e: std::io::Error| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.auto_progress_lead_minutes < 0 {
            return Err(ConfigError::InvalidValue {
                key: "auto_progress_lead_minutes".to_string(),
                message: format!("不能为负数: {}", self.auto_progress_lead_minutes),
            });
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
