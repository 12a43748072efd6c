// ==========================================
// 搜刮优化引擎 - 载重分配器
// ==========================================
// 职责: 将总载重按优化模式分配到参与等级，输出分配向量
// 输入: 总载重 + 参与等级（已过滤）+ 时长系数 + 可选最大时长
// 输出: AllocationVector（与输入等级顺序一致，每项 ≥ 0）
// 红线: 不做等级可用性过滤；分配结果为纯函数
// ==========================================

use crate::domain::{AllocationVector, Tier};
use crate::engine::duration::{DurationFactor, DurationModel};
use crate::engine::strategy::OptimizationMode;
use tracing::debug;

/// 等时长模式的默认目标时长（秒，2 小时）
pub const DEFAULT_TARGET_SECS: f64 = 2.0 * 3600.0;

// ==========================================
// Allocator - 载重分配器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocator {
    duration: DurationModel,
    default_target_secs: f64,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(DurationModel::default(), DEFAULT_TARGET_SECS)
    }
}

impl Allocator {
    pub fn new(duration: DurationModel, default_target_secs: f64) -> Self {
        Self {
            duration,
            default_target_secs,
        }
    }

    pub fn duration_model(&self) -> DurationModel {
        self.duration
    }

    pub fn default_target_secs(&self) -> f64 {
        self.default_target_secs
    }

    /// 按模式分配总载重
    ///
    /// # 参数
    /// - `mode`: 优化模式
    /// - `total_capacity`: 总载重 C
    /// - `tiers`: 参与等级（顺序有意义）
    /// - `factor`: 时长系数
    /// - `max_duration_secs`: 最大时长（秒），设置时每项截断到对应载重上限
    pub fn allocate(
        &self,
        mode: OptimizationMode,
        total_capacity: f64,
        tiers: &[Tier],
        factor: DurationFactor,
        max_duration_secs: Option<f64>,
    ) -> AllocationVector {
        if tiers.is_empty() {
            return AllocationVector::default();
        }

        let total_capacity = total_capacity.max(0.0);
        let amounts = match mode {
            OptimizationMode::PerHour => {
                self.allocate_per_hour(total_capacity, tiers, factor, max_duration_secs)
            }
            OptimizationMode::PerRun => {
                self.allocate_per_run(total_capacity, tiers, factor, max_duration_secs)
            }
            OptimizationMode::EqualDuration => {
                self.allocate_equal_duration(total_capacity, tiers, factor, max_duration_secs)
            }
        };

        debug!(
            mode = %mode,
            total_capacity,
            tiers_count = tiers.len(),
            allocated = amounts.iter().sum::<f64>(),
            "载重分配完成"
        );

        AllocationVector::from_tiers(tiers, amounts)
    }

    // ==========================================
    // 效率优先：逆序遍历，除数随位置收缩
    // ==========================================
    // 第 i 个等级（正序下标）分配 min(remaining, remaining / (N - i))。
    // 最后一个等级的除数为 1，未截断时一次性拿走全部载重。
    fn allocate_per_hour(
        &self,
        total_capacity: f64,
        tiers: &[Tier],
        factor: DurationFactor,
        max_duration_secs: Option<f64>,
    ) -> Vec<f64> {
        let n = tiers.len();
        let mut distribution = vec![0.0; n];
        let mut remaining = total_capacity;

        for i in (0..n).rev() {
            if remaining <= 0.0 {
                break;
            }
            let share = remaining.min(remaining / (n - i) as f64);
            let allocation =
                self.duration
                    .clip(share, tiers[i].ratio, factor, max_duration_secs);

            distribution[i] = allocation;
            remaining -= allocation;
        }

        distribution
    }

    // ==========================================
    // 产出优先：按产出比降序，每级至多 C / N
    // ==========================================
    fn allocate_per_run(
        &self,
        total_capacity: f64,
        tiers: &[Tier],
        factor: DurationFactor,
        max_duration_secs: Option<f64>,
    ) -> Vec<f64> {
        let n = tiers.len();
        let mut distribution = vec![0.0; n];
        let mut remaining = total_capacity;
        let equal_share = total_capacity / n as f64;

        // 稳定排序：产出比相同保持输入顺序
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| tiers[b].ratio.total_cmp(&tiers[a].ratio));

        for index in order {
            if remaining <= 0.0 {
                break;
            }
            let share = remaining.min(equal_share);
            let allocation =
                self.duration
                    .clip(share, tiers[index].ratio, factor, max_duration_secs);

            distribution[index] = allocation;
            remaining -= allocation;
        }

        distribution
    }

    // ==========================================
    // 等时长：逆运算求目标时长所需载重，每级至多 C / N
    // ==========================================
    // 总和超过 C 时等比缩放到恰好 C；不足 C 时剩余载重不分配。
    fn allocate_equal_duration(
        &self,
        total_capacity: f64,
        tiers: &[Tier],
        factor: DurationFactor,
        max_duration_secs: Option<f64>,
    ) -> Vec<f64> {
        let n = tiers.len();
        let target_secs = max_duration_secs.unwrap_or(self.default_target_secs);
        let equal_share = total_capacity / n as f64;

        let mut distribution: Vec<f64> = tiers
            .iter()
            .map(|tier| {
                self.duration
                    .capacity_for(target_secs, tier.ratio, factor)
                    .min(equal_share)
            })
            .collect();

        let total_allocated: f64 = distribution.iter().sum();
        if total_allocated > total_capacity {
            let scale = total_capacity / total_allocated;
            for amount in distribution.iter_mut() {
                *amount *= scale;
            }
        }

        distribution
    }
}
