// ==========================================
// 搜刮优化引擎 - 优化模式定义
// ==========================================
// 用途：
// - 三种分配策略的封闭枚举，Allocator 按此分派；
// - 未知模式字符串直接报错，不做静默回退。

use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};

/// 优化模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// 每小时产出最大（效率优先）
    PerHour,
    /// 单轮总产出最大（产出优先，忽略时长）
    PerRun,
    /// 各等级同时结束
    EqualDuration,
}

impl OptimizationMode {
    pub const ALL: [OptimizationMode; 3] = [
        OptimizationMode::PerHour,
        OptimizationMode::PerRun,
        OptimizationMode::EqualDuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationMode::PerHour => "per_hour",
            OptimizationMode::PerRun => "per_run",
            OptimizationMode::EqualDuration => "equal_duration",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            OptimizationMode::PerHour => "每小时最优",
            OptimizationMode::PerRun => "单轮最优",
            OptimizationMode::EqualDuration => "等时长",
        }
    }
}

impl std::fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OptimizationMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_hour" | "per-hour" => Ok(OptimizationMode::PerHour),
            "per_run" | "per-run" => Ok(OptimizationMode::PerRun),
            "equal_duration" | "equal-duration" => Ok(OptimizationMode::EqualDuration),
            other => Err(EngineError::UnknownMode(other.to_string())),
        }
    }
}
