// ==========================================
// SLCSP 费率解析 - 引擎层
// ==========================================
// 职责: ZIP → 费率区解析, 费率区 → SLCSP 计算, 编排
// 红线: 引擎不读文件, 所有结果必须输出 outcome
// ==========================================

pub mod orchestrator;
pub mod rate_area_resolver;
pub mod slcsp_calculator;

// 重导出核心引擎
pub use orchestrator::SlcspOrchestrator;
pub use rate_area_resolver::{RateAreaResolver, Resolution};
pub use slcsp_calculator::{second_lowest_distinct, SlcspCalculator};
