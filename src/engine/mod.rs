// ==========================================
// 搜刮优化引擎 - 引擎层
// ==========================================
// 职责: 载重模型、时长模型、分配策略、部队离散化、结果汇总
// 红线: 引擎为纯计算，不访问外部环境，不持有跨调用状态
// ==========================================

pub mod aggregator;
pub mod allocator;
pub mod assigner;
pub mod capacity;
pub mod duration;
pub mod error;
pub mod orchestrator;
pub mod strategy;

// 重导出核心引擎
pub use aggregator::ResultAggregator;
pub use allocator::{Allocator, DEFAULT_TARGET_SECS};
pub use assigner::CarrierAssigner;
pub use capacity::{CapacityModel, REFERENCE_CARRIERS};
pub use duration::{
    DurationFactor, DurationModel, DURATION_EXPONENT, DURATION_SCALE, FIXED_OVERHEAD_SECS,
    SPEED_EXPONENT,
};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{OptimizationPlan, OptimizationRequest, ScavengeOrchestrator};
pub use strategy::OptimizationMode;
