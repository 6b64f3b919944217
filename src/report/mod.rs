// ==========================================
// SLCSP 费率解析 - 报告层
// ==========================================
// 职责: 将 SlcspReport 渲染为 CSV / JSON
// ==========================================

pub mod error;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use writer::{OutputFormat, ReportWriter};
