// ==========================================
// 搜刮优化引擎 - 领域模型层
// ==========================================
// 职责: 定义部队库存、搜刮等级、分配向量、搜刮结果
// 红线: 不含分配算法，不含外部环境访问
// ==========================================

pub mod allocation;
pub mod inventory;
pub mod result;
pub mod tier;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationVector, TierAllocation};
pub use inventory::Inventory;
pub use result::{ResourceSplit, RunResult, RunSummary, SECS_PER_HOUR};
pub use tier::{Tier, TierCatalog, REFERENCE_TIER_RATIOS};
pub use types::{format_duration_hours, CarrierType, ResourceKind, TierLevel};
