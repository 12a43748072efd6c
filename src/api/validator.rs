// ==========================================
// 搜刮优化引擎 - 边界输入校验
// ==========================================
// 职责: 将调用方原始输入转换为领域类型
// 规则: 部队数量不能为负、至少一支部队、至少一个等级、时限 ≤ 23 小时 59 分
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Inventory, Tier, TierLevel, SECS_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 时长上限的小时数上限
pub const MAX_LIMIT_HOURS: u32 = 23;

/// 原始部队输入（类型标识 → 数量，允许调用方传入负数，由校验拒绝）
pub type RawInventory = BTreeMap<String, i64>;

// ==========================================
// TimeLimit - 时长上限（小时 + 分钟）
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLimit {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl TimeLimit {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    pub fn as_secs(&self) -> f64 {
        f64::from(self.hours) * SECS_PER_HOUR + f64::from(self.minutes) * 60.0
    }
}

/// 校验并转换部队输入
///
/// # 返回
/// - Ok(Inventory): 全部数量非负且至少一支部队
/// - Err(NegativeCarrierCount / NoCarriersEntered)
pub fn validate_inventory(raw: &RawInventory) -> ApiResult<Inventory> {
    let mut inventory = Inventory::new();
    for (carrier, count) in raw {
        let count = u64::try_from(*count).map_err(|_| ApiError::NegativeCarrierCount {
            carrier: carrier.clone(),
            count: *count,
        })?;
        inventory.add(carrier.as_str(), count);
    }

    if inventory.is_empty() {
        return Err(ApiError::NoCarriersEntered);
    }
    Ok(inventory)
}

/// 校验等级选择
///
/// None 表示全选；显式空列表或引用不存在的等级被拒绝。
pub fn validate_selection(
    tiers: &[Tier],
    selected_levels: Option<&[TierLevel]>,
) -> ApiResult<()> {
    let Some(levels) = selected_levels else {
        return Ok(());
    };
    if levels.is_empty() {
        return Err(ApiError::NoLevelSelected);
    }
    if let Some(missing) = levels
        .iter()
        .find(|level| !tiers.iter().any(|tier| tier.level == **level))
    {
        return Err(ApiError::LevelNotFound(*missing));
    }
    Ok(())
}

/// 校验时长上限，返回秒数
///
/// 全零视为未设置。
pub fn validate_time_limit(limit: Option<TimeLimit>) -> ApiResult<Option<f64>> {
    match limit {
        None => Ok(None),
        Some(limit) if limit.hours > MAX_LIMIT_HOURS => Err(ApiError::InvalidInput(format!(
            "时长上限小时数 {} 不能超过 {}",
            limit.hours, MAX_LIMIT_HOURS
        ))),
        Some(limit) if limit.minutes >= 60 => Err(ApiError::InvalidInput(format!(
            "时长上限分钟数 {} 必须小于 60",
            limit.minutes
        ))),
        Some(limit) if limit.is_zero() => Ok(None),
        Some(limit) => Ok(Some(limit.as_secs())),
    }
}
