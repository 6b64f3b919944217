// ==========================================
// SLCSP 费率解析 - 核心库
// ==========================================
// 职责: 为目标 ZIP 计算第二低价银级计划 (SLCSP) 月费率
// 输入: 计划表 / ZIP→费率区映射表 / 目标 ZIP 列表
// 输出: 每个目标 ZIP 一行（无法确定时费率为空）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 输出层 - 报告格式
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 统一入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{quantize_rate, MetalLevel, RateArea};

// 领域实体
pub use domain::{
    DqReport, PlanRecord, RateDataset, RunSummary, SlcspOutcome, SlcspReport, SlcspResult,
    ZipRecord,
};

// 引擎
pub use engine::{RateAreaResolver, Resolution, SlcspCalculator, SlcspOrchestrator};

// 导入 / 输出 / 配置
pub use config::{ConfigManager, RunConfig};
pub use importer::{DatasetLoader, DatasetLoaderImpl, ImportError};
pub use report::{OutputFormat, ReportWriter};

// API
pub use api::{ApiError, SlcspApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "slcsp";
