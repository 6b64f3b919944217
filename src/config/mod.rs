// ==========================================
// SLCSP 费率解析 - 配置层
// ==========================================
// 优先级: 默认值 < 配置文件 (JSON) < SLCSP_* 环境变量 < 命令行参数
// ==========================================

pub mod config_manager;
pub mod error;

pub use config_manager::{config_keys, default_config_path, ConfigManager, RunConfig};
pub use error::{ConfigError, ConfigResult};
