// ==========================================
// 搜刮优化引擎 - 分配向量领域模型
// ==========================================
// 顺序与参与等级的输入顺序一致，后续部队分配按此顺序消耗库存
// ==========================================

use crate::domain::tier::Tier;
use crate::domain::types::TierLevel;
use serde::{Deserialize, Serialize};

/// 单个等级的目标载重（连续值，尚未离散化）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierAllocation {
    pub level: TierLevel,
    pub ratio: f64,
    pub target_capacity: f64,
}

// ==========================================
// AllocationVector - 分配向量
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationVector {
    entries: Vec<TierAllocation>,
}

impl AllocationVector {
    /// 将等级列表与等长的载重序列配对
    ///
    /// 长度不一致时以较短者为准（调用方保证等长）。
    pub fn from_tiers(tiers: &[Tier], amounts: Vec<f64>) -> Self {
        let entries = tiers
            .iter()
            .zip(amounts)
            .map(|(tier, amount)| TierAllocation {
                level: tier.level,
                ratio: tier.ratio,
                target_capacity: amount.max(0.0),
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierAllocation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按输入顺序的载重序列
    pub fn amounts(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.target_capacity).collect()
    }

    /// 已分配载重总和
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.target_capacity).sum()
    }

    pub fn get(&self, level: TierLevel) -> Option<&TierAllocation> {
        self.entries.iter().find(|e| e.level == level)
    }
}
