// ==========================================
// 搜刮优化引擎 - 搜刮 API
// ==========================================
// 职责: 边界输入校验 → 引擎优化 → 派遣提交
// 红线: 引擎只接收校验后的领域类型；协作方失败不进入引擎
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::ports::{DispatchReceipt, GameStateReader, ScavengeDispatcher};
use crate::api::validator::{
    validate_inventory, validate_selection, validate_time_limit, RawInventory, TimeLimit,
};
use crate::config::EngineConfig;
use crate::domain::{Tier, TierCatalog, TierLevel};
use crate::engine::{OptimizationMode, OptimizationPlan, OptimizationRequest, ScavengeOrchestrator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

// ==========================================
// PlanRequest - 计划请求（原始边界输入）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub carriers: RawInventory,                   // 部队数量（可能含非法负数）
    pub world_speed: f64,                         // 世界速度
    #[serde(default)]
    pub tiers: Option<Vec<Tier>>,                 // 等级状态（None = 配置目录，全部可用）
    pub mode: String,                             // 模式标识 (per_hour / per-run / ...)
    #[serde(default)]
    pub selected_levels: Option<Vec<TierLevel>>,  // 选中等级（None = 全选）
    #[serde(default)]
    pub time_limit: Option<TimeLimit>,            // 时长上限
}

impl PlanRequest {
    pub fn new(carriers: RawInventory, world_speed: f64, mode: impl Into<String>) -> Self {
        Self {
            carriers,
            world_speed,
            tiers: None,
            mode: mode.into(),
            selected_levels: None,
            time_limit: None,
        }
    }

    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    pub fn with_selected_levels(mut self, levels: Vec<TierLevel>) -> Self {
        self.selected_levels = Some(levels);
        self
    }

    pub fn with_time_limit(mut self, hours: u32, minutes: u32) -> Self {
        self.time_limit = Some(TimeLimit::new(hours, minutes));
        self
    }
}

// ==========================================
// ScavengeApi - 搜刮 API
// ==========================================
pub struct ScavengeApi {
    config: EngineConfig,
    orchestrator: ScavengeOrchestrator,
}

impl ScavengeApi {
    /// 创建 API 实例
    ///
    /// # 返回
    /// - Err(ConfigError): 配置校验失败
    pub fn new(config: EngineConfig) -> ApiResult<Self> {
        config.validate()?;
        let orchestrator = config.orchestrator()?;
        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 参考世界配置
    pub fn with_reference_config() -> ApiResult<Self> {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tier_catalog(&self) -> TierCatalog {
        self.config.tier_catalog()
    }

    /// 校验原始输入并执行优化
    ///
    /// # 返回
    /// - Ok(OptimizationPlan): 优化结果（无参与等级时 results 为空）
    /// - Err(ApiError): 输入非法 / 模式未知 / 引擎拒绝
    #[instrument(skip(self, request), fields(mode = %request.mode, world_speed = request.world_speed))]
    pub fn plan(&self, request: &PlanRequest) -> ApiResult<OptimizationPlan> {
        let mode: OptimizationMode = request.mode.parse()?;
        let inventory = validate_inventory(&request.carriers)?;
        let tiers = request
            .tiers
            .clone()
            .unwrap_or_else(|| self.config.tiers());
        validate_selection(&tiers, request.selected_levels.as_deref())?;
        let max_duration_secs = validate_time_limit(request.time_limit)?;

        let unknown: Vec<&str> = inventory
            .iter()
            .filter(|(carrier, _)| self.orchestrator.capacity_model().weight(carrier).is_none())
            .map(|(carrier, _)| carrier.as_str())
            .collect();
        if !unknown.is_empty() {
            warn!(unknown = ?unknown, "存在未登记的部队类型，载重按 0 计");
        }

        let engine_request = OptimizationRequest {
            inventory,
            world_speed: request.world_speed,
            tiers,
            mode,
            selected_levels: request.selected_levels.clone(),
            max_duration_secs,
        };
        let plan = self.orchestrator.optimize(&engine_request)?;

        info!(
            results_count = plan.results.len(),
            total_resources = plan.summary.total_resources(),
            "计划生成完成"
        );
        Ok(plan)
    }

    /// 从游戏状态读取快照后执行优化
    ///
    /// # 参数
    /// - reader: 游戏状态读取端口
    /// - mode: 模式标识
    /// - selected_levels: 选中等级（None = 全选）
    /// - time_limit: 时长上限
    pub fn plan_from_reader(
        &self,
        reader: &dyn GameStateReader,
        mode: &str,
        selected_levels: Option<Vec<TierLevel>>,
        time_limit: Option<TimeLimit>,
    ) -> ApiResult<OptimizationPlan> {
        let snapshot = reader
            .read_snapshot()
            .map_err(|e| ApiError::StateReadError(format!("{:#}", e)))?;

        let request = PlanRequest {
            carriers: snapshot.carriers,
            world_speed: snapshot.world_speed,
            tiers: Some(snapshot.tiers),
            mode: mode.to_string(),
            selected_levels,
            time_limit,
        };
        self.plan(&request)
    }

    /// 提交计划中某一等级的派遣
    ///
    /// # 返回
    /// - Ok(DispatchReceipt): 派遣部队 + 预计返回时间（超出时间戳范围时为 None）
    /// - Err(LevelNotFound): 计划中没有该等级的结果
    /// - Err(DispatchError): 派遣端口失败
    #[instrument(skip(self, plan, dispatcher))]
    pub fn dispatch_level(
        &self,
        plan: &OptimizationPlan,
        level: TierLevel,
        dispatcher: &dyn ScavengeDispatcher,
        now: DateTime<Utc>,
    ) -> ApiResult<DispatchReceipt> {
        let result = plan.result_for(level).ok_or(ApiError::LevelNotFound(level))?;

        dispatcher
            .dispatch(result)
            .map_err(|e| ApiError::DispatchError {
                level,
                reason: format!("{:#}", e),
            })?;

        let receipt = DispatchReceipt {
            level,
            carriers: result.carriers.clone(),
            dispatched_at: now,
            returns_at: result.returns_at(now),
        };
        if receipt.returns_at.is_none() {
            warn!(
                level,
                duration_secs = result.duration_secs,
                "预计返回时间超出可表示范围"
            );
        }
        info!(
            level,
            capacity = result.capacity,
            returns_at = ?receipt.returns_at,
            "派遣提交完成"
        );
        Ok(receipt)
    }
}
