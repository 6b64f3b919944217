// ==========================================
// SLCSP 费率解析 - 数据集与数据质量类型
// ==========================================
// 职责: 数据集类别 / DQ 违规记录 / DQ 报告 / 加载后的只读数据集
// ==========================================

use crate::domain::plan::PlanRecord;
use crate::domain::zip::ZipRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DatasetKind - 数据集类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Plans,
    Zips,
    Targets,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Plans => write!(f, "plans"),
            DatasetKind::Zips => write!(f, "zips"),
            DatasetKind::Targets => write!(f, "targets"),
        }
    }
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,   // 错误（阻断加载）
    Warning, // 警告（允许加载）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize, // 数据行号（从 1 开始，不含表头）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub accepted: usize,
    pub blocked: usize,
    pub warning: usize,
    pub info: usize,
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqReport {
    pub dataset: DatasetKind,
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.summary.blocked > 0
    }

    /// 第一条阻断级违规（用于错误提示）
    pub fn first_error(&self) -> Option<&DqViolation> {
        self.violations
            .iter()
            .find(|v| matches!(v.level, DqLevel::Error))
    }
}

// ==========================================
// RateDataset - 加载完成的只读数据集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateDataset {
    pub plans: Vec<PlanRecord>,
    pub zips: Vec<ZipRecord>,
    pub targets: Vec<String>,
}

impl RateDataset {
    pub fn silver_plan_count(&self) -> usize {
        self.plans.iter().filter(|p| p.is_silver()).count()
    }
}
