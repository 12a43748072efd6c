// ==========================================
// 搜刮优化引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 退化输入（零载重/无参与等级/不可达时长）不是错误，返回空结果
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 数值定义域错误 =====
    #[error("世界速度无效: {0}（必须为正的有限数）")]
    InvalidWorldSpeed(f64),

    #[error("时长系数无效: {0}（必须为正的有限数）")]
    InvalidDurationFactor(f64),

    #[error("最大时长无效: {0} 秒（必须为非负有限数）")]
    InvalidMaxDuration(f64),

    #[error("搜刮等级产出比无效: level={level}, ratio={ratio}（必须位于 (0, 1]）")]
    InvalidTierRatio { level: u32, ratio: f64 },

    #[error("搜刮等级编号无效: {0}（等级从 1 开始）")]
    InvalidTierLevel(u32),

    #[error("搜刮等级重复: level={0}")]
    DuplicateTierLevel(u32),

    #[error("速度指数无效: {0}（必须为负的有限数）")]
    InvalidSpeedExponent(f64),

    #[error("默认目标时长无效: {0} 秒（必须为正的有限数）")]
    InvalidTargetDuration(f64),

    // ===== 部队目录错误 =====
    #[error("部队载重无效: carrier={carrier}, weight={weight}（必须为正整数）")]
    InvalidCarrierWeight { carrier: String, weight: i64 },

    #[error("部队类型重复登记: {0}")]
    DuplicateCarrier(String),

    #[error("分配优先级包含未登记的部队类型: {0}")]
    UnknownCarrierInPriority(String),

    // ===== 配置错误 =====
    #[error("未知优化模式: {0}")]
    UnknownMode(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
