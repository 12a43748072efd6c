// ==========================================
// 搜刮优化引擎 - 配置层
// ==========================================
// 职责: 引擎常数的加载、校验、构建引擎组件
// 存储: 调用方提供的 JSON（引擎本身不落盘）
// ==========================================

pub mod engine_config;
pub mod error;

// 重导出核心配置
pub use engine_config::{config_keys, CarrierWeight, EngineConfig};
pub use error::{ConfigError, ConfigResult};
