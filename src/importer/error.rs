// ==========================================
// 餐饮备餐聚合引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 只有文件读取与 JSON 语法错误会失败,记录内容一律降级为默认值
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 数据解析错误 =====
    #[error("JSON 解析失败 (行 {line}, 列 {column}): {message}")]
    JsonParseError {
        line: usize,
        column: usize,
        message: String,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
