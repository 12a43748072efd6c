// ==========================================
// 搜刮优化引擎 - 引擎配置
// ==========================================
// 职责: 部队载重目录、等级产出比、时长模型常数的加载与校验
// 格式: JSON，缺省字段回退到参考世界默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::{Tier, TierCatalog, TierLevel, REFERENCE_TIER_RATIOS, SECS_PER_HOUR};
use crate::engine::{
    Allocator, CapacityModel, DurationModel, ScavengeOrchestrator, DURATION_EXPONENT,
    DURATION_SCALE, FIXED_OVERHEAD_SECS, REFERENCE_CARRIERS, SPEED_EXPONENT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置键（用于错误信息）
pub mod config_keys {
    pub const CARRIERS: &str = "carriers";
    pub const ASSIGNMENT_PRIORITY: &str = "assignment_priority";
    pub const TIER_RATIOS: &str = "tier_ratios";
    pub const OVERHEAD_SECS: &str = "overhead_secs";
    pub const DURATION_EXPONENT: &str = "duration_exponent";
    pub const DURATION_SCALE: &str = "duration_scale";
    pub const SPEED_EXPONENT: &str = "speed_exponent";
    pub const DEFAULT_TARGET_HOURS: &str = "default_target_hours";
}

/// 部队载重登记项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierWeight {
    /// 部队类型标识
    pub name: String,

    /// 单兵载重（必须为正整数）
    pub capacity: i64,
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 部队载重目录（登记顺序即载重并列时的分配顺序）
    pub carriers: Vec<CarrierWeight>,

    /// 显式分配优先级（None 表示按载重降序）
    pub assignment_priority: Option<Vec<String>>,

    /// 各等级产出比（下标 + 1 = 等级）
    pub tier_ratios: Vec<f64>,

    /// 固定开销（秒）
    pub overhead_secs: f64,

    /// 时长指数
    pub duration_exponent: f64,

    /// 时长比例常数
    pub duration_scale: f64,

    /// 世界速度指数（时长系数 = speed^exponent，必须为负）
    pub speed_exponent: f64,

    /// 等时长模式的默认目标时长（小时）
    pub default_target_hours: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            carriers: REFERENCE_CARRIERS
                .iter()
                .map(|(name, capacity)| CarrierWeight {
                    name: name.to_string(),
                    capacity: i64::from(*capacity),
                })
                .collect(),
            assignment_priority: None,
            tier_ratios: REFERENCE_TIER_RATIOS.to_vec(),
            overhead_secs: FIXED_OVERHEAD_SECS,
            duration_exponent: DURATION_EXPONENT,
            duration_scale: DURATION_SCALE,
            speed_exponent: SPEED_EXPONENT,
            default_target_hours: 2.0,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 字符串加载并校验
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            carriers_count = config.carriers.len(),
            tiers_count = config.tier_ratios.len(),
            "引擎配置加载完成"
        );
        Ok(config)
    }

    /// 校验配置取值
    pub fn validate(&self) -> ConfigResult<()> {
        if self.carriers.is_empty() {
            return Err(invalid(config_keys::CARRIERS, "至少需要登记一种部队"));
        }
        for carrier in &self.carriers {
            if carrier.name.trim().is_empty() {
                return Err(invalid(config_keys::CARRIERS, "部队类型标识不能为空"));
            }
            if carrier.capacity <= 0 || carrier.capacity > i64::from(u32::MAX) {
                return Err(invalid(
                    config_keys::CARRIERS,
                    format!("部队 {} 的载重 {} 非法（必须为正整数）", carrier.name, carrier.capacity),
                ));
            }
        }

        if self.tier_ratios.is_empty() {
            return Err(invalid(config_keys::TIER_RATIOS, "至少需要一个搜刮等级"));
        }
        for (index, ratio) in self.tier_ratios.iter().enumerate() {
            if !ratio.is_finite() || *ratio <= 0.0 || *ratio > 1.0 {
                return Err(invalid(
                    config_keys::TIER_RATIOS,
                    format!("等级 {} 的产出比 {} 不在 (0, 1] 内", index + 1, ratio),
                ));
            }
        }

        require_positive(config_keys::OVERHEAD_SECS, self.overhead_secs)?;
        require_positive(config_keys::DURATION_EXPONENT, self.duration_exponent)?;
        require_positive(config_keys::DURATION_SCALE, self.duration_scale)?;
        require_positive(config_keys::DEFAULT_TARGET_HOURS, self.default_target_hours)?;
        if !self.speed_exponent.is_finite() || self.speed_exponent >= 0.0 {
            return Err(invalid(
                config_keys::SPEED_EXPONENT,
                format!("速度指数 {} 必须为负数", self.speed_exponent),
            ));
        }

        // 目录与优先级的一致性交给载重模型检查
        self.capacity_model()?;
        Ok(())
    }

    /// 构建载重模型
    pub fn capacity_model(&self) -> ConfigResult<CapacityModel> {
        let catalog = self
            .carriers
            .iter()
            .map(|c| {
                u32::try_from(c.capacity)
                    .map(|weight| (c.name.clone(), weight))
                    .map_err(|_| {
                        invalid(
                            config_keys::CARRIERS,
                            format!("部队 {} 的载重 {} 超出范围", c.name, c.capacity),
                        )
                    })
            })
            .collect::<ConfigResult<Vec<(String, u32)>>>()?;

        let model = CapacityModel::new(catalog)?;
        match &self.assignment_priority {
            Some(order) => Ok(model.with_priority(order.iter().cloned())?),
            None => Ok(model),
        }
    }

    /// 构建时长模型
    pub fn duration_model(&self) -> DurationModel {
        DurationModel::new(self.overhead_secs, self.duration_exponent, self.duration_scale)
    }

    pub fn default_target_secs(&self) -> f64 {
        self.default_target_hours * SECS_PER_HOUR
    }

    pub fn allocator(&self) -> Allocator {
        Allocator::new(self.duration_model(), self.default_target_secs())
    }

    /// 构建编排器
    pub fn orchestrator(&self) -> ConfigResult<ScavengeOrchestrator> {
        Ok(ScavengeOrchestrator::with_duration(
            self.capacity_model()?,
            self.duration_model(),
            self.default_target_secs(),
            self.speed_exponent,
        )?)
    }

    /// 等级目录
    pub fn tier_catalog(&self) -> TierCatalog {
        TierCatalog::new(self.tier_ratios.clone())
    }

    /// 某等级的产出比
    pub fn tier_ratio(&self, level: TierLevel) -> Option<f64> {
        self.tier_catalog().ratio(level)
    }

    /// 全部等级（已解锁、空闲）
    pub fn tiers(&self) -> Vec<Tier> {
        self.tier_catalog().tiers()
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

fn require_positive(key: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(key, format!("取值 {} 必须为正数", value)));
    }
    Ok(())
}
