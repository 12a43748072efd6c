// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供部队库存、搜刮等级、原始输入的构建函数
// ==========================================
#![allow(dead_code)]

use scavenge_optimizer::api::RawInventory;
use scavenge_optimizer::domain::{Inventory, Tier, TierCatalog};
use scavenge_optimizer::engine::DurationFactor;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-6;

/// 构建部队库存
///
/// # 示例
/// ```ignore
/// let inv = inventory(&[("heavy", 1000), ("spear", 200)]);
/// ```
pub fn inventory(entries: &[(&str, u64)]) -> Inventory {
    entries
        .iter()
        .fold(Inventory::new(), |inv, (carrier, count)| inv.with(*carrier, *count))
}

/// 构建原始输入（允许负数）
pub fn raw_inventory(entries: &[(&str, i64)]) -> RawInventory {
    entries
        .iter()
        .map(|(carrier, count)| (carrier.to_string(), *count))
        .collect()
}

/// 参考世界的四个等级（全部可用、空闲）
pub fn reference_tiers() -> Vec<Tier> {
    TierCatalog::reference().tiers()
}

/// 速度 1 的时长系数
pub fn unit_factor() -> DurationFactor {
    DurationFactor::new(1.0).expect("系数 1.0 合法")
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON * a.abs().max(1.0)
}
