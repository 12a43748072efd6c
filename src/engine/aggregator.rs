// ==========================================
// 搜刮优化引擎 - 结果汇总器
// ==========================================
// 职责: 按分配向量顺序离散化部队，并由实际部队组合重算载重/产出/时长
// 输出: 每个实际载重 > 0 的等级一条 RunResult
// 红线: 部队池按分配向量顺序消耗，顺序不可调换
// ==========================================

use crate::domain::{AllocationVector, Inventory, ResourceSplit, RunResult, SECS_PER_HOUR};
use crate::engine::assigner::CarrierAssigner;
use crate::engine::capacity::CapacityModel;
use crate::engine::duration::{DurationFactor, DurationModel};
use tracing::debug;

// ==========================================
// ResultAggregator - 结果汇总器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator {
    assigner: CarrierAssigner,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self {
            assigner: CarrierAssigner::new(),
        }
    }

    /// 离散化并汇总
    ///
    /// # 参数
    /// - `capacity_model`: 载重模型
    /// - `duration_model`: 时长模型
    /// - `allocation`: 分配向量
    /// - `pool`: 共享部队池（会被消耗）
    /// - `factor`: 时长系数
    pub fn aggregate(
        &self,
        capacity_model: &CapacityModel,
        duration_model: &DurationModel,
        allocation: &AllocationVector,
        pool: &mut Inventory,
        factor: DurationFactor,
    ) -> Vec<RunResult> {
        let mut results = Vec::with_capacity(allocation.len());

        for entry in allocation.iter() {
            if !(entry.target_capacity > 0.0) {
                continue;
            }

            let carriers = self
                .assigner
                .assign(capacity_model, entry.target_capacity, pool);
            let capacity = capacity_model.capacity(&carriers);
            if capacity == 0 {
                debug!(level = entry.level, target = entry.target_capacity, "实际载重为 0，跳过该等级");
                continue;
            }

            let Some(duration_secs) =
                duration_model.duration_secs(capacity as f64, entry.ratio, factor)
            else {
                continue;
            };

            let resources = ResourceSplit::from_output(capacity as f64 * entry.ratio);
            let efficiency_per_hour = resources.total() as f64 / (duration_secs / SECS_PER_HOUR);

            results.push(RunResult {
                level: entry.level,
                ratio: entry.ratio,
                carriers,
                capacity,
                resources,
                duration_secs,
                efficiency_per_hour,
            });
        }

        results
    }
}
