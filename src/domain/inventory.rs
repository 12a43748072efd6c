// ==========================================
// 搜刮优化引擎 - 部队库存领域模型
// ==========================================
// 红线: 单次优化内库存只减不增
// 用途: 调用方快照 / 分配过程中的共享部队池 / 单个等级的派遣组合
// ==========================================

use crate::domain::types::CarrierType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Inventory - 部队库存
// ==========================================
// 按部队类型记录可用数量；未登记的类型视为 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<CarrierType, u64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式追加（同类型数量累加）
    pub fn with(mut self, carrier: impl Into<CarrierType>, count: u64) -> Self {
        self.add(carrier, count);
        self
    }

    /// 某类型的可用数量
    pub fn available(&self, carrier: &CarrierType) -> u64 {
        self.counts.get(carrier).copied().unwrap_or(0)
    }

    /// 累加数量（仅用于构建快照/派遣组合，不用于分配过程中的部队池）
    pub fn add(&mut self, carrier: impl Into<CarrierType>, count: u64) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(carrier.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// 从库存中取出至多 `count` 个，返回实际取出数量
    pub fn take(&mut self, carrier: &CarrierType, count: u64) -> u64 {
        let Some(available) = self.counts.get_mut(carrier) else {
            return 0;
        };
        let taken = count.min(*available);
        *available -= taken;
        taken
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CarrierType, u64)> {
        self.counts.iter().map(|(carrier, count)| (carrier, *count))
    }

    /// 部队总数（不区分类型）
    pub fn total_count(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// 合并两份库存（按类型求和）
    pub fn merged(&self, other: &Inventory) -> Inventory {
        let mut merged = self.clone();
        for (carrier, count) in other.iter() {
            merged.add(carrier.clone(), count);
        }
        merged
    }
}

impl<K: Into<CarrierType>> FromIterator<(K, u64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for (carrier, count) in iter {
            inventory.add(carrier, count);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_never_exceeds_available() {
        let mut pool = Inventory::new().with("spear", 10);
        let spear = CarrierType::from("spear");

        assert_eq!(pool.take(&spear, 4), 4);
        assert_eq!(pool.available(&spear), 6);
        assert_eq!(pool.take(&spear, 100), 6);
        assert_eq!(pool.available(&spear), 0);
        assert_eq!(pool.take(&CarrierType::from("axe"), 3), 0);
    }

    #[test]
    fn test_merged_sums_counts() {
        let a = Inventory::new().with("spear", 10).with("axe", 2);
        let b = Inventory::new().with("spear", 5).with("heavy", 1);
        let merged = a.merged(&b);

        assert_eq!(merged.available(&"spear".into()), 15);
        assert_eq!(merged.available(&"axe".into()), 2);
        assert_eq!(merged.available(&"heavy".into()), 1);
        assert_eq!(merged.total_count(), 18);
    }

    #[test]
    fn test_zero_counts_are_not_stored() {
        let inventory: Inventory = vec![("spear", 0u64), ("sword", 3)].into_iter().collect();
        assert_eq!(inventory.iter().count(), 1);
        assert!(!inventory.is_empty());
        assert!(Inventory::new().is_empty());
    }
}
