// ==========================================
// 搜刮优化引擎 - API 层
// ==========================================
// 职责: 边界输入校验、调用引擎、对接外部协作方端口
// ==========================================

pub mod error;
pub mod ports;
pub mod scavenge_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use ports::{
    DispatchReceipt, GameSnapshot, GameStateReader, InMemoryGameState, NoOpDispatcher,
    ScavengeDispatcher,
};
pub use scavenge_api::{PlanRequest, ScavengeApi};
pub use validator::{
    validate_inventory, validate_selection, validate_time_limit, RawInventory, TimeLimit,
    MAX_LIMIT_HOURS,
};
