// ==========================================
// SLCSP 费率解析 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（默认值 → 配置文件 → 环境变量 → 命令行）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::report::writer::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// 环境变量前缀（SLCSP_DATA_DIR 等）
pub const ENV_PREFIX: &str = "SLCSP_";

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 输入
    pub const DATA_DIR: &str = "data_dir";
    pub const PLANS_FILE: &str = "plans_file";
    pub const ZIPS_FILE: &str = "zips_file";
    pub const TARGETS_FILE: &str = "targets_file";

    // 输出
    pub const OUTPUT_PATH: &str = "output_path"; // 空 → stdout
    pub const OUTPUT_FORMAT: &str = "output_format";
    pub const INCLUDE_HEADER: &str = "include_header";

    // 数据质量
    pub const RATE_WARNING_THRESHOLD: &str = "rate_warning_threshold";

    pub const ALL: [&str; 8] = [
        DATA_DIR,
        PLANS_FILE,
        ZIPS_FILE,
        TARGETS_FILE,
        OUTPUT_PATH,
        OUTPUT_FORMAT,
        INCLUDE_HEADER,
        RATE_WARNING_THRESHOLD,
    ];
}

fn default_value(key: &str) -> &'static str {
    match key {
        config_keys::DATA_DIR => ".",
        config_keys::PLANS_FILE => "plans.csv",
        config_keys::ZIPS_FILE => "zips.csv",
        config_keys::TARGETS_FILE => "slcsp.csv",
        config_keys::OUTPUT_PATH => "",
        config_keys::OUTPUT_FORMAT => "csv",
        config_keys::INCLUDE_HEADER => "true",
        config_keys::RATE_WARNING_THRESHOLD => "10000.00",
        _ => "",
    }
}

/// 默认配置文件路径: <用户配置目录>/slcsp/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slcsp").join("config.json"))
}

// ==========================================
// RunConfig - 单次运行的类型化配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub plans_path: PathBuf,
    pub zips_path: PathBuf,
    pub targets_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub include_header: bool,
    pub rate_warning_threshold: Decimal,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// 仅含默认值的配置
    pub fn new() -> Self {
        let values = config_keys::ALL
            .iter()
            .map(|key| (key.to_string(), default_value(key).to_string()))
            .collect();
        Self { values }
    }

    /// 标准加载流程
    ///
    /// - explicit_path 为 Some: 必须存在
    /// - 否则尝试默认配置文件路径（不存在则跳过）
    /// - 最后应用 SLCSP_* 环境变量
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let mut manager = Self::new();

        match explicit_path {
            Some(path) => manager.load_file(path)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.is_file()) {
                    manager.load_file(&path)?;
                }
            }
        }

        manager.apply_env();
        Ok(manager)
    }

    /// 从 JSON 对象文件加载配置
    ///
    /// 值可为字符串/数字/布尔；null 表示保持当前值。
    pub fn load_file(&mut self, path: &Path) -> ConfigResult<()> {
        let path_text = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path_text));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path_text.clone(),
            message: e.to_string(),
        })?;

        let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path_text.clone(),
            message: e.to_string(),
        })?;

        let Value::Object(entries) = parsed else {
            return Err(ConfigError::ParseError {
                path: path_text,
                message: "顶层必须是 JSON 对象".to_string(),
            });
        };

        for (key, value) in entries {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::InvalidValue {
                        key,
                        value: other.to_string(),
                        message: "仅支持字符串/数字/布尔值".to_string(),
                    })
                }
            };
            self.set(&key, text)?;
        }

        info!(path = %path_text, "配置文件已加载");
        Ok(())
    }

    /// 应用进程环境变量
    pub fn apply_env(&mut self) {
        self.apply_env_vars(std::env::vars());
    }

    /// 应用给定的环境变量集合（SLCSP_<KEY 大写>）
    pub fn apply_env_vars<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(suffix) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = suffix.to_lowercase();
            if config_keys::ALL.contains(&key.as_str()) {
                debug!(env = %name, "环境变量覆写配置");
                self.values.insert(key, value);
            }
        }
    }

    /// 覆写配置值（命令行参数等）
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> ConfigResult<()> {
        if !config_keys::ALL.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_or_default(&self, key: &str) -> &str {
        self.get(key).unwrap_or_else(|| default_value(key))
    }

    /// 数据文件路径: 绝对路径原样使用，相对路径拼接 data_dir
    fn data_path(&self, key: &str) -> PathBuf {
        Path::new(self.get_or_default(config_keys::DATA_DIR)).join(self.get_or_default(key))
    }

    fn parse_bool(&self, key: &str) -> ConfigResult<bool> {
        let raw = self.get_or_default(key);
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                message: "期望布尔值".to_string(),
            }),
        }
    }

    /// 生成类型化运行配置
    pub fn run_config(&self) -> ConfigResult<RunConfig> {
        let format_raw = self.get_or_default(config_keys::OUTPUT_FORMAT);
        let output_format =
            OutputFormat::from_str(format_raw).map_err(|e| ConfigError::InvalidValue {
                key: config_keys::OUTPUT_FORMAT.to_string(),
                value: format_raw.to_string(),
                message: e.to_string(),
            })?;

        let threshold_raw = self.get_or_default(config_keys::RATE_WARNING_THRESHOLD);
        let rate_warning_threshold =
            Decimal::from_str(threshold_raw.trim()).map_err(|e| ConfigError::InvalidValue {
                key: config_keys::RATE_WARNING_THRESHOLD.to_string(),
                value: threshold_raw.to_string(),
                message: e.to_string(),
            })?;

        let output_raw = self.get_or_default(config_keys::OUTPUT_PATH).trim();
        // 空值或 "-" 表示 stdout
        let to_stdout = output_raw.is_empty() || output_raw == "-";
        let output_path = (!to_stdout).then(|| PathBuf::from(output_raw));

        Ok(RunConfig {
            plans_path: self.data_path(config_keys::PLANS_FILE),
            zips_path: self.data_path(config_keys::ZIPS_FILE),
            targets_path: self.data_path(config_keys::TARGETS_FILE),
            output_path,
            output_format,
            include_header: self.parse_bool(config_keys::INCLUDE_HEADER)?,
            rate_warning_threshold,
        })
    }
}
