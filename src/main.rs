// ==========================================
// SLCSP 费率解析 - 命令行入口
// ==========================================
// 用法: slcsp [--data-dir DIR] [--plans FILE] [--zips FILE] [--targets FILE]
//             [--output FILE] [--format csv|json] [--no-header] [--verbose] [--log-json]
// 结果写 stdout（或 --output 文件），日志写 stderr
// ==========================================

use anyhow::Context;
use clap::Parser;
use slcsp::config::{config_keys, ConfigManager};
use slcsp::{logging, SlcspApi};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slcsp")]
#[command(version, about = "为目标 ZIP 计算第二低价银级计划 (SLCSP) 月费率")]
struct Cli {
    /// 配置文件 (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 数据目录（相对文件名基于此目录）
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// 计划表
    #[arg(long, value_name = "FILE")]
    plans: Option<String>,

    /// ZIP → 费率区映射表
    #[arg(long, value_name = "FILE")]
    zips: Option<String>,

    /// 目标 ZIP 列表
    #[arg(long, value_name = "FILE")]
    targets: Option<String>,

    /// 输出文件（默认 stdout）
    #[arg(long, short, value_name = "FILE")]
    output: Option<String>,

    /// 输出格式
    #[arg(long, value_parser = ["csv", "json"])]
    format: Option<String>,

    /// 不输出 CSV 表头
    #[arg(long)]
    no_header: bool,

    /// 输出 debug 日志
    #[arg(long, short)]
    verbose: bool,

    /// 日志以 JSON 行输出到 stderr
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// 命令行参数覆写配置（优先级最高）
    fn apply_to(&self, manager: &mut ConfigManager) -> anyhow::Result<()> {
        let overrides = [
            (config_keys::DATA_DIR, &self.data_dir),
            (config_keys::PLANS_FILE, &self.plans),
            (config_keys::ZIPS_FILE, &self.zips),
            (config_keys::TARGETS_FILE, &self.targets),
            (config_keys::OUTPUT_PATH, &self.output),
            (config_keys::OUTPUT_FORMAT, &self.format),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                manager.set(key, value.as_str())?;
            }
        }
        if self.no_header {
            manager.set(config_keys::INCLUDE_HEADER, "false")?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    tracing::debug!("{} v{}", slcsp::APP_NAME, slcsp::VERSION);

    let mut manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    cli.apply_to(&mut manager)?;
    let run_config = manager.run_config().context("配置无效")?;

    let report = SlcspApi::new(run_config)
        .run()
        .context("SLCSP 解析失败")?;

    tracing::info!(
        total = report.summary.total,
        resolved = report.summary.resolved,
        "完成"
    );
    Ok(())
}
