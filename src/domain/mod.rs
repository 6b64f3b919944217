// ==========================================
// SLCSP 费率解析 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、结果对象
// 红线: 不含文件读取逻辑,不含计算逻辑
// ==========================================

pub mod dataset;
pub mod plan;
pub mod slcsp;
pub mod types;
pub mod zip;

// 重导出核心类型
pub use dataset::{DatasetKind, DqLevel, DqReport, DqSummary, DqViolation, RateDataset};
pub use plan::{PlanRecord, RawPlanRecord};
pub use slcsp::{RunSummary, SlcspOutcome, SlcspReport, SlcspResult};
pub use types::{quantize_rate, MetalLevel, RateArea, RATE_SCALE};
pub use zip::{RawTargetRecord, RawZipRecord, ZipRecord};
