// ==========================================
// 搜刮优化引擎 - 搜刮结果领域模型
// ==========================================
// 用途: 单个等级的实际派遣结果 + 整轮汇总
// 红线: 所有数值均由离散部队组合重算，而非连续目标值
// ==========================================

use crate::domain::inventory::Inventory;
use crate::domain::types::{format_duration_hours, ResourceKind, TierLevel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const SECS_PER_HOUR: f64 = 3600.0;

// ==========================================
// ResourceSplit - 三类资源拆分
// ==========================================
// 规则: 每份 floor(total / 3)，余数第 1 份给木材、第 2 份给黏土，铁矿不补
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSplit {
    pub wood: u64,
    pub clay: u64,
    pub iron: u64,
}

impl ResourceSplit {
    /// 按余数规则拆分产出（小数部分舍去）
    pub fn from_output(output: f64) -> Self {
        let total = if output.is_finite() && output > 0.0 {
            output.floor() as u64
        } else {
            0
        };
        let per_type = total / 3;
        let remainder = total % 3;

        Self {
            wood: per_type + u64::from(remainder >= 1),
            clay: per_type + u64::from(remainder >= 2),
            iron: per_type,
        }
    }

    pub fn total(&self) -> u64 {
        self.wood + self.clay + self.iron
    }

    pub fn amount(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Clay => self.clay,
            ResourceKind::Iron => self.iron,
        }
    }
}

// ==========================================
// RunResult - 单等级搜刮结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub level: TierLevel,            // 搜刮等级
    pub ratio: f64,                  // 产出比
    pub carriers: Inventory,         // 实际派遣部队
    pub capacity: u64,               // 实际载重
    pub resources: ResourceSplit,    // 产出（三类资源）
    pub duration_secs: f64,          // 时长（秒）
    pub efficiency_per_hour: f64,    // 每小时产出
}

impl RunResult {
    pub fn total_resources(&self) -> u64 {
        self.resources.total()
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_secs / SECS_PER_HOUR
    }

    /// 时长展示文本 ("Xh Ym")
    pub fn duration_label(&self) -> String {
        format_duration_hours(self.duration_hours())
    }

    /// 从 `started_at` 出发的预计返回时间（毫秒精度）
    ///
    /// 极慢世界的时长可能超出时间戳可表示范围，此时返回 None。
    pub fn returns_at(&self, started_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let millis = (self.duration_secs * 1000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        let offset = Duration::try_milliseconds(millis as i64)?;
        started_at.checked_add_signed(offset)
    }
}

// ==========================================
// RunSummary - 整轮汇总
// ==========================================
// 总时长取各等级最大值；综合效率 = 总产出 / 总时长(小时)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub resources: ResourceSplit,
    pub total_capacity: u64,
    pub max_duration_secs: f64,
    pub efficiency_per_hour: f64,
}

impl RunSummary {
    pub fn from_results(results: &[RunResult]) -> Self {
        let mut summary = RunSummary::default();
        for result in results {
            summary.resources.wood += result.resources.wood;
            summary.resources.clay += result.resources.clay;
            summary.resources.iron += result.resources.iron;
            summary.total_capacity += result.capacity;
            summary.max_duration_secs = summary.max_duration_secs.max(result.duration_secs);
        }

        let hours = summary.max_duration_secs / SECS_PER_HOUR;
        summary.efficiency_per_hour = if hours > 0.0 {
            summary.resources.total() as f64 / hours
        } else {
            0.0
        };
        summary
    }

    pub fn total_resources(&self) -> u64 {
        self.resources.total()
    }

    pub fn max_duration_hours(&self) -> f64 {
        self.max_duration_secs / SECS_PER_HOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(level: TierLevel, wood: u64, clay: u64, iron: u64, duration_secs: f64) -> RunResult {
        RunResult {
            level,
            ratio: 0.5,
            carriers: Inventory::new(),
            capacity: (wood + clay + iron) * 2,
            resources: ResourceSplit { wood, clay, iron },
            duration_secs,
            efficiency_per_hour: 0.0,
        }
    }

    #[test]
    fn test_split_remainder_rule() {
        assert_eq!(
            ResourceSplit::from_output(9375.0),
            ResourceSplit { wood: 3125, clay: 3125, iron: 3125 }
        );
        assert_eq!(
            ResourceSplit::from_output(10.0),
            ResourceSplit { wood: 4, clay: 3, iron: 3 }
        );
        assert_eq!(
            ResourceSplit::from_output(11.0),
            ResourceSplit { wood: 4, clay: 4, iron: 3 }
        );
        // 小数部分舍去: 1234.5 -> 1234 = 412 + 411 + 411
        assert_eq!(
            ResourceSplit::from_output(1234.5),
            ResourceSplit { wood: 412, clay: 411, iron: 411 }
        );
        assert_eq!(ResourceSplit::from_output(11.0).amount(ResourceKind::Iron), 3);
        assert_eq!(ResourceSplit::from_output(0.0).total(), 0);
        assert_eq!(ResourceSplit::from_output(f64::NAN).total(), 0);
    }

    #[test]
    fn test_summary_uses_max_duration() {
        let results = vec![
            result(1, 100, 100, 100, 3600.0),
            result(2, 200, 200, 200, 7200.0),
        ];
        let summary = RunSummary::from_results(&results);

        assert_eq!(summary.resources, ResourceSplit { wood: 300, clay: 300, iron: 300 });
        assert_eq!(summary.max_duration_secs, 7200.0);
        assert!((summary.efficiency_per_hour - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_empty_results() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.total_resources(), 0);
        assert_eq!(summary.efficiency_per_hour, 0.0);
    }

    #[test]
    fn test_returns_at() {
        let start = Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap();
        let r = result(1, 1, 1, 1, 5400.0);
        assert_eq!(
            r.returns_at(start),
            Some(Utc.with_ymd_and_hms(2026, 1, 20, 9, 30, 0).unwrap())
        );
        assert_eq!(r.duration_label(), "1h 30m");
    }

    #[test]
    fn test_returns_at_out_of_range() {
        let start = Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap();
        // 约 60 万年，超出时间戳范围
        assert_eq!(result(4, 1, 1, 1, 1.9e13).returns_at(start), None);
        assert_eq!(result(4, 1, 1, 1, 1e300).returns_at(start), None);
        assert_eq!(result(4, 1, 1, 1, f64::INFINITY).returns_at(start), None);
    }
}
