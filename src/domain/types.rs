// ==========================================
// 搜刮优化引擎 - 领域类型定义
// ==========================================
// 职责: 部队类型标识、搜刮等级编号等基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 搜刮等级编号（1..K，参考世界 K=4）
pub type TierLevel = u32;

// ==========================================
// 部队类型 (Carrier Type)
// ==========================================
// 用途: Inventory / 分配结果的键
// 序列化格式: 透明字符串 (如 "spear", "heavy")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierType(String);

impl CarrierType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CarrierType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CarrierType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// ==========================================
// 资源类型 (Resource Kind)
// ==========================================
// 产出按固定顺序拆分为三份：木 → 土 → 铁
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood, // 木材（余数第一份）
    Clay, // 黏土（余数第二份）
    Iron, // 铁矿
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Wood => write!(f, "wood"),
            ResourceKind::Clay => write!(f, "clay"),
            ResourceKind::Iron => write!(f, "iron"),
        }
    }
}

/// 小时数格式化为 "Xh Ym"（不足一小时时为 "Ym"）
///
/// 分钟向下取整，与页面展示保持一致。
pub fn format_duration_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0m".to_string();
    }
    let h = hours.floor();
    let m = ((hours - h) * 60.0).floor();
    if h > 0.0 {
        format!("{}h {}m", h as u64, m as u64)
    } else {
        format!("{}m", m as u64)
    }
}
