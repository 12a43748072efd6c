// ==========================================
// 搜刮优化引擎 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::engine::error::EngineError;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 读取错误 =====
    #[error("配置文件读取失败 (path: {path}): {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    // ===== 取值错误 =====
    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("配置构建引擎失败: {0}")]
    EngineError(#[from] EngineError),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
