// ==========================================
// 搜刮优化引擎 - API层错误类型
// ==========================================
// 职责: 边界输入校验错误 + 引擎/配置错误转换 + 外部协作方失败
// 红线: 错误信息必须包含显式原因
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::TierLevel;
use crate::engine::error::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("部队数量不能为负: carrier={carrier}, count={count}")]
    NegativeCarrierCount { carrier: String, count: i64 },

    #[error("未输入任何部队")]
    NoCarriersEntered,

    #[error("未选择任何搜刮等级")]
    NoLevelSelected,

    #[error("搜刮等级不存在或未产生结果: level={0}")]
    LevelNotFound(TierLevel),

    // ==========================================
    // 下层错误转换
    // ==========================================
    #[error("引擎错误: {0}")]
    EngineError(#[from] EngineError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 外部协作方错误
    // ==========================================
    #[error("读取游戏状态失败: {0}")]
    StateReadError(String),

    #[error("派遣失败: level={level}, reason={reason}")]
    DispatchError { level: TierLevel, reason: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
