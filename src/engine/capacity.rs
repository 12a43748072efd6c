// ==========================================
// 搜刮优化引擎 - 载重模型
// ==========================================
// 职责: 部队数量 → 标量载重；提供部队分配优先级
// 规则: capacity = Σ count[type] * weight[type]，未登记类型贡献 0
// ==========================================

use crate::domain::{CarrierType, Inventory};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;

/// 参考世界的部队载重（登记顺序即并列时的优先顺序）
pub const REFERENCE_CARRIERS: [(&str, u32); 7] = [
    ("spear", 25),
    ("sword", 15),
    ("axe", 10),
    ("archer", 10),
    ("light", 80),
    ("marcher", 50),
    ("heavy", 50),
];

// ==========================================
// CapacityModel - 载重模型
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityModel {
    weights: BTreeMap<CarrierType, u32>,
    // 部队分配优先级（含载重）
    priority: Vec<(CarrierType, u32)>,
}

impl CapacityModel {
    /// 由 (类型, 载重) 序列构建
    ///
    /// 分配优先级默认按载重降序，载重相同时保持登记顺序。
    ///
    /// # 错误
    /// - 载重为 0：`InvalidCarrierWeight`
    /// - 类型重复：`DuplicateCarrier`
    pub fn new<K, I>(catalog: I) -> EngineResult<Self>
    where
        K: Into<CarrierType>,
        I: IntoIterator<Item = (K, u32)>,
    {
        let mut weights = BTreeMap::new();
        let mut registered = Vec::new();

        for (carrier, weight) in catalog {
            let carrier = carrier.into();
            if weight == 0 {
                return Err(EngineError::InvalidCarrierWeight {
                    carrier: carrier.to_string(),
                    weight: 0,
                });
            }
            if weights.insert(carrier.clone(), weight).is_some() {
                return Err(EngineError::DuplicateCarrier(carrier.to_string()));
            }
            registered.push((carrier, weight));
        }

        // sort_by 为稳定排序，载重相同保持登记顺序
        registered.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(Self {
            weights,
            priority: registered,
        })
    }

    /// 参考世界的七种部队
    pub fn reference() -> Self {
        let mut weights = BTreeMap::new();
        let mut priority = Vec::with_capacity(REFERENCE_CARRIERS.len());
        for (name, weight) in REFERENCE_CARRIERS {
            weights.insert(CarrierType::from(name), weight);
            priority.push((CarrierType::from(name), weight));
        }
        priority.sort_by(|a, b| b.1.cmp(&a.1));
        Self { weights, priority }
    }

    /// 显式指定分配优先级
    ///
    /// 列出的类型按给定顺序排在前面，未列出的类型按默认顺序追加在后。
    pub fn with_priority<K, I>(mut self, order: I) -> EngineResult<Self>
    where
        K: Into<CarrierType>,
        I: IntoIterator<Item = K>,
    {
        let mut prioritized: Vec<(CarrierType, u32)> = Vec::with_capacity(self.priority.len());
        for carrier in order {
            let carrier = carrier.into();
            let weight = self
                .weights
                .get(&carrier)
                .copied()
                .ok_or_else(|| EngineError::UnknownCarrierInPriority(carrier.to_string()))?;
            if prioritized.iter().any(|(c, _)| c == &carrier) {
                return Err(EngineError::DuplicateCarrier(carrier.to_string()));
            }
            prioritized.push((carrier, weight));
        }

        for (carrier, weight) in &self.priority {
            if !prioritized.iter().any(|(c, _)| c == carrier) {
                prioritized.push((carrier.clone(), *weight));
            }
        }

        self.priority = prioritized;
        Ok(self)
    }

    pub fn weight(&self, carrier: &CarrierType) -> Option<u32> {
        self.weights.get(carrier).copied()
    }

    /// 按分配优先级遍历 (类型, 载重)
    pub fn prioritized(&self) -> impl Iterator<Item = (&CarrierType, u32)> {
        self.priority.iter().map(|(carrier, weight)| (carrier, *weight))
    }

    /// 分配优先级（仅类型）
    pub fn priority_order(&self) -> Vec<CarrierType> {
        self.priority.iter().map(|(carrier, _)| carrier.clone()).collect()
    }

    /// 计算库存的总载重
    pub fn capacity(&self, inventory: &Inventory) -> u64 {
        inventory.iter().fold(0u64, |total, (carrier, count)| {
            let weight = u64::from(self.weight(carrier).unwrap_or(0));
            total.saturating_add(count.saturating_mul(weight))
        })
    }
}

impl Default for CapacityModel {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_sums_weights() {
        let model = CapacityModel::reference();
        let inventory = Inventory::new()
            .with("spear", 100) // 2500
            .with("light", 10) // 800
            .with("heavy", 2); // 100

        assert_eq!(model.capacity(&inventory), 3400);
    }

    #[test]
    fn test_unknown_carrier_contributes_zero() {
        let model = CapacityModel::new([("heavy", 50u32)]).unwrap();
        let inventory = Inventory::new().with("heavy", 1000).with("ram", 50);

        assert_eq!(model.capacity(&inventory), 50_000);
    }

    #[test]
    fn test_default_priority_is_weight_descending() {
        let model = CapacityModel::reference();
        let order: Vec<String> = model
            .priority_order()
            .iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            order,
            vec!["light", "marcher", "heavy", "spear", "sword", "axe", "archer"]
        );
    }

    #[test]
    fn test_explicit_priority_appends_unlisted() {
        let model = CapacityModel::reference()
            .with_priority(["heavy", "spear"])
            .unwrap();
        let order: Vec<String> = model
            .priority_order()
            .iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            order,
            vec!["heavy", "spear", "light", "marcher", "sword", "axe", "archer"]
        );
    }

    #[test]
    fn test_invalid_catalogs() {
        assert!(matches!(
            CapacityModel::new([("spear", 0u32)]),
            Err(EngineError::InvalidCarrierWeight { .. })
        ));
        assert!(matches!(
            CapacityModel::new([("spear", 25u32), ("spear", 30)]),
            Err(EngineError::DuplicateCarrier(_))
        ));
        assert!(matches!(
            CapacityModel::reference().with_priority(["catapult"]),
            Err(EngineError::UnknownCarrierInPriority(_))
        ));
    }
}
