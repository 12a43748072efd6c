// ==========================================
// 搜刮优化引擎 - 引擎编排器
// ==========================================
// 用途: 协调单次优化的执行顺序
// 流程: 载重模型 → 分配器 → 部队分配 → 结果汇总
// 红线: 调用方的库存快照不被修改；编排器不持有跨调用状态
// ==========================================

use crate::domain::{AllocationVector, Inventory, RunResult, RunSummary, Tier, TierLevel, SECS_PER_HOUR};
use crate::engine::aggregator::ResultAggregator;
use crate::engine::allocator::Allocator;
use crate::engine::capacity::CapacityModel;
use crate::engine::duration::{DurationFactor, DurationModel, SPEED_EXPONENT};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::strategy::OptimizationMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

// ==========================================
// OptimizationRequest - 优化请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub inventory: Inventory,                     // 可派遣部队快照
    pub world_speed: f64,                         // 世界速度
    pub tiers: Vec<Tier>,                         // 全部等级（含不可用/进行中）
    pub mode: OptimizationMode,                   // 优化模式
    #[serde(default)]
    pub selected_levels: Option<Vec<TierLevel>>,  // 选中等级（None = 全选）
    #[serde(default)]
    pub max_duration_secs: Option<f64>,           // 最大时长（秒）
}

impl OptimizationRequest {
    pub fn new(
        inventory: Inventory,
        world_speed: f64,
        tiers: Vec<Tier>,
        mode: OptimizationMode,
    ) -> Self {
        Self {
            inventory,
            world_speed,
            tiers,
            mode,
            selected_levels: None,
            max_duration_secs: None,
        }
    }

    pub fn with_selected_levels(mut self, levels: Vec<TierLevel>) -> Self {
        self.selected_levels = Some(levels);
        self
    }

    pub fn with_max_duration_secs(mut self, secs: f64) -> Self {
        self.max_duration_secs = Some(secs);
        self
    }

    pub fn with_max_duration_hours(self, hours: f64) -> Self {
        self.with_max_duration_secs(hours * SECS_PER_HOUR)
    }
}

// ==========================================
// OptimizationPlan - 优化结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    pub mode: OptimizationMode,
    pub world_speed: f64,
    pub duration_factor: DurationFactor,
    pub total_capacity: u64,
    pub max_duration_secs: Option<f64>,

    // 分配器输出（连续目标值）
    pub allocation: AllocationVector,

    // 离散化后的实际结果
    pub results: Vec<RunResult>,
    pub summary: RunSummary,
}

impl OptimizationPlan {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn result_for(&self, level: TierLevel) -> Option<&RunResult> {
        self.results.iter().find(|r| r.level == level)
    }

    /// 实际派遣载重总和
    pub fn realized_capacity(&self) -> u64 {
        self.results.iter().map(|r| r.capacity).sum()
    }
}

// ==========================================
// ScavengeOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct ScavengeOrchestrator {
    capacity: CapacityModel,
    duration: DurationModel,
    allocator: Allocator,
    aggregator: ResultAggregator,
    speed_exponent: f64,
}

impl Default for ScavengeOrchestrator {
    fn default() -> Self {
        Self::new(CapacityModel::reference(), Allocator::default())
    }
}

impl ScavengeOrchestrator {
    /// 创建编排器
    ///
    /// # 参数
    /// - capacity: 载重模型
    /// - allocator: 分配器（携带时长模型与默认目标时长）
    pub fn new(capacity: CapacityModel, allocator: Allocator) -> Self {
        Self {
            capacity,
            duration: allocator.duration_model(),
            allocator,
            aggregator: ResultAggregator::new(),
            speed_exponent: SPEED_EXPONENT,
        }
    }

    /// 自定义时长模型与速度指数
    ///
    /// # 返回
    /// - Err(InvalidSpeedExponent): 速度指数不是负的有限数
    /// - Err(InvalidTargetDuration): 默认目标时长不是正的有限数
    pub fn with_duration(
        capacity: CapacityModel,
        duration: DurationModel,
        default_target_secs: f64,
        speed_exponent: f64,
    ) -> EngineResult<Self> {
        if !speed_exponent.is_finite() || speed_exponent >= 0.0 {
            return Err(EngineError::InvalidSpeedExponent(speed_exponent));
        }
        if !default_target_secs.is_finite() || default_target_secs <= 0.0 {
            return Err(EngineError::InvalidTargetDuration(default_target_secs));
        }
        Ok(Self {
            capacity,
            duration,
            allocator: Allocator::new(duration, default_target_secs),
            aggregator: ResultAggregator::new(),
            speed_exponent,
        })
    }

    pub fn capacity_model(&self) -> &CapacityModel {
        &self.capacity
    }

    pub fn duration_model(&self) -> &DurationModel {
        &self.duration
    }

    /// 执行一次完整优化
    ///
    /// # 返回
    /// - Ok(plan): 结果（无参与等级/零载重时 results 为空）
    /// - Err: 世界速度、最大时长或产出比非法
    #[instrument(skip(self, request), fields(
        mode = %request.mode,
        world_speed = request.world_speed,
        tiers_count = request.tiers.len()
    ))]
    pub fn optimize(&self, request: &OptimizationRequest) -> EngineResult<OptimizationPlan> {
        let factor =
            DurationFactor::from_world_speed_with_exponent(request.world_speed, self.speed_exponent)?;

        if let Some(max_secs) = request.max_duration_secs {
            if !max_secs.is_finite() || max_secs < 0.0 {
                return Err(EngineError::InvalidMaxDuration(max_secs));
            }
        }

        if let Some(tier) = request.tiers.iter().find(|t| !t.has_valid_ratio()) {
            return Err(EngineError::InvalidTierRatio {
                level: tier.level,
                ratio: tier.ratio,
            });
        }
        validate_levels(&request.tiers)?;

        let total_capacity = self.capacity.capacity(&request.inventory);
        let participating: Vec<Tier> = request
            .tiers
            .iter()
            .filter(|t| t.participates(request.selected_levels.as_deref()))
            .copied()
            .collect();

        info!(
            total_capacity,
            participating_count = participating.len(),
            duration_factor = factor.value(),
            "开始执行搜刮优化"
        );

        if participating.is_empty() {
            warn!("无可参与的搜刮等级，返回空结果");
            return Ok(self.empty_plan(request, factor, total_capacity));
        }
        if total_capacity == 0 {
            warn!("总载重为 0，返回空结果");
        }

        // 步骤1: 载重分配
        let allocation = self.allocator.allocate(
            request.mode,
            total_capacity as f64,
            &participating,
            factor,
            request.max_duration_secs,
        );
        debug!(amounts = ?allocation.amounts(), "步骤1: 载重分配完成");

        // 步骤2: 部队离散化 + 结果汇总（消耗快照副本）
        let mut pool = request.inventory.clone();
        let results = self.aggregator.aggregate(
            &self.capacity,
            &self.duration,
            &allocation,
            &mut pool,
            factor,
        );
        let summary = RunSummary::from_results(&results);

        info!(
            results_count = results.len(),
            total_resources = summary.total_resources(),
            max_duration_secs = summary.max_duration_secs,
            "搜刮优化完成"
        );

        Ok(OptimizationPlan {
            mode: request.mode,
            world_speed: request.world_speed,
            duration_factor: factor,
            total_capacity,
            max_duration_secs: request.max_duration_secs,
            allocation,
            results,
            summary,
        })
    }

    fn empty_plan(
        &self,
        request: &OptimizationRequest,
        factor: DurationFactor,
        total_capacity: u64,
    ) -> OptimizationPlan {
        OptimizationPlan {
            mode: request.mode,
            world_speed: request.world_speed,
            duration_factor: factor,
            total_capacity,
            max_duration_secs: request.max_duration_secs,
            allocation: AllocationVector::default(),
            results: Vec::new(),
            summary: RunSummary::default(),
        }
    }
}

/// 等级编号从 1 开始且互不重复
fn validate_levels(tiers: &[Tier]) -> EngineResult<()> {
    let mut seen = BTreeSet::new();
    for tier in tiers {
        if tier.level == 0 {
            return Err(EngineError::InvalidTierLevel(tier.level));
        }
        if !seen.insert(tier.level) {
            return Err(EngineError::DuplicateTierLevel(tier.level));
        }
    }
    Ok(())
}
