// ==========================================
// SLCSP 费率解析 - 结果实体
// ==========================================
// 职责: 单个 ZIP 的解析结果 + 结果原因 + 运行汇总
// 说明: rate 为 None 表示“无法确定”，不是错误
// ==========================================

use crate::domain::types::{quantize_rate, RateArea};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SlcspOutcome - 结果原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlcspOutcome {
    /// 唯一费率区且存在至少两个不同银级费率
    Resolved { rate_area: RateArea },
    /// ZIP 不在映射表中
    UnknownZip,
    /// ZIP 跨多个费率区（业务规则: 不猜测）
    AmbiguousZip { rate_areas: Vec<RateArea> },
    /// 费率区内不同银级费率少于两个
    InsufficientPlans {
        rate_area: RateArea,
        distinct_rates: usize,
    },
}

impl fmt::Display for SlcspOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlcspOutcome::Resolved { rate_area } => write!(f, "RESOLVED({})", rate_area),
            SlcspOutcome::UnknownZip => write!(f, "UNKNOWN_ZIP"),
            SlcspOutcome::AmbiguousZip { rate_areas } => {
                write!(f, "AMBIGUOUS_ZIP({} 个费率区)", rate_areas.len())
            }
            SlcspOutcome::InsufficientPlans {
                rate_area,
                distinct_rates,
            } => write!(
                f,
                "INSUFFICIENT_PLANS({}, {} 个不同费率)",
                rate_area, distinct_rates
            ),
        }
    }
}

// ==========================================
// SlcspResult - 单个 ZIP 的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlcspResult {
    pub zipcode: String,
    pub rate: Option<Decimal>,
    pub outcome: SlcspOutcome,
}

impl SlcspResult {
    /// 两位小数字符串；无法确定时为空串
    pub fn rate_text(&self) -> String {
        self.rate
            .map(|r| quantize_rate(r).to_string())
            .unwrap_or_default()
    }
}

// ==========================================
// RunSummary - 运行汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub resolved: usize,
    pub unknown_zip: usize,
    pub ambiguous_zip: usize,
    pub insufficient_plans: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &SlcspOutcome) {
        self.total += 1;
        match outcome {
            SlcspOutcome::Resolved { .. } => self.resolved += 1,
            SlcspOutcome::UnknownZip => self.unknown_zip += 1,
            SlcspOutcome::AmbiguousZip { .. } => self.ambiguous_zip += 1,
            SlcspOutcome::InsufficientPlans { .. } => self.insufficient_plans += 1,
        }
    }

    pub fn undetermined(&self) -> usize {
        self.total - self.resolved
    }
}

// ==========================================
// SlcspReport - 完整报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlcspReport {
    pub results: Vec<SlcspResult>,
    pub summary: RunSummary,
}

impl SlcspReport {
    pub fn push(&mut self, result: SlcspResult) {
        self.summary.record(&result.outcome);
        self.results.push(result);
    }
}
