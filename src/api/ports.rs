// ==========================================
// 搜刮优化引擎 - 外部协作方端口
// ==========================================
// 职责: 定义游戏状态读取与派遣提交的 trait，实现依赖倒置
// 说明: 引擎层从不调用端口；API 层读取快照、提交选中的结果
// ==========================================

use crate::api::validator::RawInventory;
use crate::domain::{Inventory, RunResult, Tier, TierLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// GameSnapshot - 游戏状态快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 可派遣部队（原始数量，由 API 层校验）
    pub carriers: RawInventory,
    /// 全部等级（含未解锁/进行中）
    pub tiers: Vec<Tier>,
    /// 世界速度
    pub world_speed: f64,
}

/// 游戏状态读取端口
///
/// 读取失败属于协作方自身，API 层将其包装为 `ApiError::StateReadError`。
pub trait GameStateReader: Send + Sync {
    /// 读取当前快照
    fn read_snapshot(&self) -> anyhow::Result<GameSnapshot>;
}

/// 派遣提交端口
pub trait ScavengeDispatcher: Send + Sync {
    /// 提交某一等级的派遣组合
    ///
    /// # 参数
    /// - `result`: 选中的等级结果（含实际派遣部队）
    fn dispatch(&self, result: &RunResult) -> anyhow::Result<()>;
}

// ==========================================
// DispatchReceipt - 派遣回执
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    pub level: TierLevel,
    pub carriers: Inventory,
    pub dispatched_at: DateTime<Utc>,
    /// 预计返回时间（超出时间戳范围时为 None）
    pub returns_at: Option<DateTime<Utc>>,
}

// ==========================================
// InMemoryGameState - 内存快照读取器
// ==========================================
// 用于调用方已持有快照的场景（以及测试）
#[derive(Debug, Clone)]
pub struct InMemoryGameState {
    snapshot: GameSnapshot,
}

impl InMemoryGameState {
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self { snapshot }
    }
}

impl GameStateReader for InMemoryGameState {
    fn read_snapshot(&self) -> anyhow::Result<GameSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// 空操作派遣器
///
/// 用于只需要计划、不需要真正派遣的场景
#[derive(Debug, Clone, Default)]
pub struct NoOpDispatcher;

impl ScavengeDispatcher for NoOpDispatcher {
    fn dispatch(&self, result: &RunResult) -> anyhow::Result<()> {
        tracing::debug!(
            "NoOpDispatcher: 跳过派遣 - level={}, capacity={}",
            result.level,
            result.capacity
        );
        Ok(())
    }
}
