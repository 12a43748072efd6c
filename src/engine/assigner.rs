// ==========================================
// 搜刮优化引擎 - 部队分配器
// ==========================================
// 职责: 连续目标载重 → 离散部队组合
// 输入: 目标载重 + 共享部队池（会被消耗）
// 输出: 派遣部队组合（Inventory）
// 红线: 不派遣小数部队；不超过部队池现有数量；部队池只减不增
// ==========================================

use crate::domain::Inventory;
use crate::engine::capacity::CapacityModel;
use tracing::{debug, instrument};

// ==========================================
// CarrierAssigner - 部队分配器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CarrierAssigner {
    // 无状态，部队池由调用方持有
}

impl CarrierAssigner {
    pub fn new() -> Self {
        Self {}
    }

    /// 按优先级贪心分配部队
    ///
    /// 规则：
    /// 1) 按载重模型的优先级遍历部队类型
    /// 2) 每类派遣 min(floor(剩余目标 / 单兵载重), 部队池现有数量)
    /// 3) 剩余目标 ≤ 0 时停止
    ///
    /// 实际载重可能低于目标（向下取整 / 高载重部队耗尽），属于预期行为。
    ///
    /// # 参数
    /// - `model`: 载重模型（提供优先级与单兵载重）
    /// - `target_capacity`: 目标载重
    /// - `pool`: 共享部队池（会被修改）
    #[instrument(skip(self, model, pool), fields(pool_count = pool.total_count()))]
    pub fn assign(
        &self,
        model: &CapacityModel,
        target_capacity: f64,
        pool: &mut Inventory,
    ) -> Inventory {
        let mut assignment = Inventory::new();
        let mut remaining = target_capacity;

        for (carrier, weight) in model.prioritized() {
            if !(remaining > 0.0) {
                break;
            }

            let available = pool.available(carrier);
            if available == 0 {
                continue;
            }

            let needed = (remaining / f64::from(weight)).floor();
            if needed < 1.0 {
                continue;
            }
            // f64 → u64 为饱和转换
            let wanted = (needed as u64).min(available);
            let taken = pool.take(carrier, wanted);
            if taken > 0 {
                assignment.add(carrier.clone(), taken);
                remaining -= (taken as f64) * f64::from(weight);
            }
        }

        debug!(
            target_capacity,
            assigned_capacity = model.capacity(&assignment),
            unfilled = remaining.max(0.0),
            "部队分配完成"
        );

        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CarrierType;

    #[test]
    fn test_assign_prefers_heavy_weights() {
        let assigner = CarrierAssigner::new();
        let model = CapacityModel::reference();
        let mut pool = Inventory::new().with("light", 10).with("spear", 100);

        let assignment = assigner.assign(&model, 1000.0, &mut pool);

        // 10 light = 800，剩余 200 → 8 spear
        assert_eq!(assignment.available(&CarrierType::from("light")), 10);
        assert_eq!(assignment.available(&CarrierType::from("spear")), 8);
        assert_eq!(model.capacity(&assignment), 1000);
        assert_eq!(pool.available(&CarrierType::from("light")), 0);
        assert_eq!(pool.available(&CarrierType::from("spear")), 92);
    }

    #[test]
    fn test_assign_rounds_down() {
        let assigner = CarrierAssigner::new();
        let model = CapacityModel::reference();
        let mut pool = Inventory::new().with("spear", 100);

        let assignment = assigner.assign(&model, 99.0, &mut pool);

        assert_eq!(model.capacity(&assignment), 75);
        assert_eq!(pool.available(&CarrierType::from("spear")), 97);
    }

    #[test]
    fn test_greedy_is_not_globally_optimal() {
        // 目标 100：贪心先取 1 个 80，剩余 20 无法凑出；最优解为 2 个 50
        let assigner = CarrierAssigner::new();
        let model = CapacityModel::new([("light", 80u32), ("heavy", 50)]).unwrap();
        let mut pool = Inventory::new().with("light", 5).with("heavy", 5);

        let assignment = assigner.assign(&model, 100.0, &mut pool);

        assert_eq!(model.capacity(&assignment), 80);
    }

    #[test]
    fn test_shared_pool_is_consumed_across_calls() {
        let assigner = CarrierAssigner::new();
        let model = CapacityModel::reference();
        let mut pool = Inventory::new().with("heavy", 10);

        let first = assigner.assign(&model, 400.0, &mut pool);
        let second = assigner.assign(&model, 400.0, &mut pool);
        let third = assigner.assign(&model, 400.0, &mut pool);

        assert_eq!(model.capacity(&first), 400);
        assert_eq!(model.capacity(&second), 100);
        assert!(third.is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_zero_target_assigns_nothing() {
        let assigner = CarrierAssigner::new();
        let model = CapacityModel::reference();
        let mut pool = Inventory::new().with("spear", 10);
        let before = pool.clone();

        assert!(assigner.assign(&model, 0.0, &mut pool).is_empty());
        assert_eq!(pool, before);
    }
}
