// ==========================================
// 搜刮优化引擎 - 搜刮等级领域模型
// ==========================================
// 参与条件: 已解锁 (available) 且 未在进行中 (active=false) 且 被调用方选中
// ==========================================

use crate::domain::types::TierLevel;
use serde::{Deserialize, Serialize};

/// 参考世界的等级产出比（下标 + 1 = 等级）
pub const REFERENCE_TIER_RATIOS: [f64; 4] = [0.10, 0.25, 0.50, 0.75];

// ==========================================
// Tier - 搜刮等级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub level: TierLevel, // 等级编号 (1..K)
    pub ratio: f64,       // 产出比 (0, 1]

    #[serde(default = "default_true")]
    pub available: bool, // 是否已解锁

    #[serde(default)]
    pub active: bool, // 是否正在搜刮中
}

fn default_true() -> bool {
    true
}

impl Tier {
    /// 创建已解锁、空闲的等级
    pub fn new(level: TierLevel, ratio: f64) -> Self {
        Self {
            level,
            ratio,
            available: true,
            active: false,
        }
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// 已解锁且空闲
    pub fn is_idle(&self) -> bool {
        self.available && !self.active
    }

    /// 产出比是否位于 (0, 1]
    pub fn has_valid_ratio(&self) -> bool {
        self.ratio.is_finite() && self.ratio > 0.0 && self.ratio <= 1.0
    }

    /// 是否参与本次优化
    ///
    /// `selected_levels` 为 None 时表示全部等级都被选中。
    pub fn participates(&self, selected_levels: Option<&[TierLevel]>) -> bool {
        self.is_idle() && selected_levels.map_or(true, |levels| levels.contains(&self.level))
    }
}

// ==========================================
// TierCatalog - 等级目录
// ==========================================
// 等级 i 的产出比 = ratios[i - 1]；等级从 1 开始连续编号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierCatalog {
    ratios: Vec<f64>,
}

impl TierCatalog {
    pub fn new(ratios: Vec<f64>) -> Self {
        Self { ratios }
    }

    /// 参考世界: 0.10 / 0.25 / 0.50 / 0.75
    pub fn reference() -> Self {
        Self::new(REFERENCE_TIER_RATIOS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn ratio(&self, level: TierLevel) -> Option<f64> {
        let index = usize::try_from(level).ok()?.checked_sub(1)?;
        self.ratios.get(index).copied()
    }

    /// 构建某等级（已解锁、空闲）
    pub fn tier(&self, level: TierLevel) -> Option<Tier> {
        self.ratio(level).map(|ratio| Tier::new(level, ratio))
    }

    /// 全部等级（已解锁、空闲）
    pub fn tiers(&self) -> Vec<Tier> {
        (1..=self.ratios.len() as TierLevel)
            .filter_map(|level| self.tier(level))
            .collect()
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
