// ==========================================
// SLCSP 费率解析 - API 层
// ==========================================
// 职责: 组合 配置 → 导入 → 引擎 → 输出，对外提供统一入口
// ==========================================

pub mod error;
pub mod slcsp_api;

pub use error::{ApiError, ApiResult};
pub use slcsp_api::SlcspApi;
