// ==========================================
// 搜刮优化引擎 - 核心库
// ==========================================
// 职责: 将可用部队的总载重分配到各搜刮等级，输出部队组合、产出与时长
// 系统定位: 纯计算引擎（读取游戏状态与派遣由外部协作方完成）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 部队库存、等级、分配向量、结果
pub mod domain;

// 引擎层 - 载重/时长模型、分配策略、部队离散化
pub mod engine;

// 配置层 - 引擎常数
pub mod config;

// API 层 - 边界校验与协作方端口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    format_duration_hours, AllocationVector, CarrierType, Inventory, ResourceKind, ResourceSplit,
    RunResult, RunSummary, Tier, TierCatalog, TierLevel,
};

// 引擎
pub use engine::{
    Allocator, CapacityModel, CarrierAssigner, DurationFactor, DurationModel, EngineError,
    EngineResult, OptimizationMode, OptimizationPlan, OptimizationRequest, ResultAggregator,
    ScavengeOrchestrator,
};

// 配置
pub use config::{ConfigError, ConfigResult, EngineConfig};

// API
pub use api::{
    ApiError, ApiResult, GameSnapshot, GameStateReader, PlanRequest, ScavengeApi,
    ScavengeDispatcher, TimeLimit,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "搜刮优化引擎";
