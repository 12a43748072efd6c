// ==========================================
// 搜刮优化引擎 - 时长模型
// ==========================================
// 公式:
//   base(c, r)     = (c^2 * 100 * r^2)^0.45 + 1800
//   duration(c, r) = base(c, r) * factor,  factor = speed^-0.55
// 逆运算:
//   baseTarget = T / factor - 1800
//   baseTarget <= 0 → 0（不可达）
//   否则 c = sqrt(baseTarget^(1/0.45) / (100 * r^2))
// 单位: 秒
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

pub const FIXED_OVERHEAD_SECS: f64 = 1800.0;
pub const DURATION_EXPONENT: f64 = 0.45;
pub const DURATION_SCALE: f64 = 100.0;
pub const SPEED_EXPONENT: f64 = -0.55;

// ==========================================
// DurationFactor - 时长系数
// ==========================================
// 反序列化同样经过 `new` 的校验
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DurationFactor(f64);

impl TryFrom<f64> for DurationFactor {
    type Error = EngineError;

    fn try_from(value: f64) -> EngineResult<Self> {
        Self::new(value)
    }
}

impl From<DurationFactor> for f64 {
    fn from(factor: DurationFactor) -> Self {
        factor.0
    }
}

impl DurationFactor {
    /// 由世界速度推导：speed^-0.55
    pub fn from_world_speed(speed: f64) -> EngineResult<Self> {
        Self::from_world_speed_with_exponent(speed, SPEED_EXPONENT)
    }

    pub fn from_world_speed_with_exponent(speed: f64, exponent: f64) -> EngineResult<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(EngineError::InvalidWorldSpeed(speed));
        }
        Self::new(speed.powf(exponent))
    }

    /// 直接指定系数（必须为正有限数）
    pub fn new(value: f64) -> EngineResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(EngineError::InvalidDurationFactor(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

// ==========================================
// DurationModel - 时长模型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationModel {
    overhead_secs: f64,
    exponent: f64,
    scale: f64,
}

impl Default for DurationModel {
    fn default() -> Self {
        Self {
            overhead_secs: FIXED_OVERHEAD_SECS,
            exponent: DURATION_EXPONENT,
            scale: DURATION_SCALE,
        }
    }
}

impl DurationModel {
    /// 自定义参数（由配置层校验为正数后传入）
    pub fn new(overhead_secs: f64, exponent: f64, scale: f64) -> Self {
        Self {
            overhead_secs,
            exponent,
            scale,
        }
    }

    pub fn overhead_secs(&self) -> f64 {
        self.overhead_secs
    }

    /// 基础时长（秒，未乘系数）
    pub fn base_secs(&self, capacity: f64, ratio: f64) -> f64 {
        (capacity.powi(2) * self.scale * ratio.powi(2)).powf(self.exponent) + self.overhead_secs
    }

    /// 实际时长（秒）
    ///
    /// 载重为 0 时不计算，返回 None。
    pub fn duration_secs(&self, capacity: f64, ratio: f64, factor: DurationFactor) -> Option<f64> {
        if !(capacity > 0.0) {
            return None;
        }
        Some(self.base_secs(capacity, ratio) * factor.value())
    }

    /// 达到目标时长所需的载重（时长的逆运算）
    ///
    /// 目标不可达（扣除固定开销后 ≤ 0）时返回 0。
    pub fn capacity_for(&self, target_secs: f64, ratio: f64, factor: DurationFactor) -> f64 {
        let base_target = target_secs / factor.value() - self.overhead_secs;
        if !(base_target > 0.0) {
            return 0.0;
        }
        (base_target.powf(1.0 / self.exponent) / (self.scale * ratio.powi(2))).sqrt()
    }

    /// 按最大时长截断载重；未设置上限时原样返回
    pub fn clip(
        &self,
        capacity: f64,
        ratio: f64,
        factor: DurationFactor,
        max_duration_secs: Option<f64>,
    ) -> f64 {
        match max_duration_secs {
            Some(max_secs) => capacity.min(self.capacity_for(max_secs, ratio, factor)),
            None => capacity,
        }
    }
}
