// ==========================================
// SLCSP 费率解析 - 领域类型定义
// ==========================================
// 职责: 金属等级枚举 + 费率区复合键
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 费率输出精度（小数位数）
pub const RATE_SCALE: u32 = 2;

/// 将费率量化为固定两位小数
///
/// 源数据通常已是两位小数，此处只保证输出格式；
/// 精度更高的输入按“四舍五入（远离零）”处理。
pub fn quantize_rate(rate: Decimal) -> Decimal {
    let mut quantized =
        rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    quantized.rescale(RATE_SCALE);
    quantized
}

// ==========================================
// 金属等级 (Metal Level)
// ==========================================
// 封闭枚举: 不接受未知等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetalLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Catastrophic,
}

impl MetalLevel {
    pub const ALL: [MetalLevel; 5] = [
        MetalLevel::Bronze,
        MetalLevel::Silver,
        MetalLevel::Gold,
        MetalLevel::Platinum,
        MetalLevel::Catastrophic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetalLevel::Bronze => "Bronze",
            MetalLevel::Silver => "Silver",
            MetalLevel::Gold => "Gold",
            MetalLevel::Platinum => "Platinum",
            MetalLevel::Catastrophic => "Catastrophic",
        }
    }
}

impl fmt::Display for MetalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetalLevel {
    type Err = String;

    /// 大小写不敏感（先 TRIM）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MetalLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("未知金属等级: {}", trimmed))
    }
}

// ==========================================
// 费率区 (Rate Area)
// ==========================================
// 复合键 (state, rate_area)
// 红线: rate_area 编号仅在州内唯一，必须与州一起比较
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RateArea {
    pub state: String,
    pub rate_area: u32,
}

impl RateArea {
    pub fn new(state: impl Into<String>, rate_area: u32) -> Self {
        Self {
            state: state.into(),
            rate_area,
        }
    }
}

impl fmt::Display for RateArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.state, self.rate_area)
    }
}
