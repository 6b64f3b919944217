// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成计划表 / ZIP 映射表 / 目标 ZIP 文件
// ==========================================

#![allow(dead_code)]

use rust_decimal::Decimal;
use slcsp::report::OutputFormat;
use slcsp::RunConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PLANS_FILE: &str = "plans.csv";
pub const ZIPS_FILE: &str = "zips.csv";
pub const TARGETS_FILE: &str = "slcsp.csv";
pub const OUTPUT_FILE: &str = "out.csv";

pub const PLANS_HEADER: &str = "plan_id,state,metal_level,rate,rate_area";
pub const ZIPS_HEADER: &str = "zipcode,state,county_code,name,rate_area";
pub const TARGETS_HEADER: &str = "zipcode,rate";

/// 标准测试数据
///
/// - 64148 → MO 3: 银级 245.20 / 245.2 / 260.00 / 290.05 → 260.00
/// - 67118 → KS 6: 仅一个银级计划 → 无法确定
/// - 54923 → WI 11 + WI 15: 歧义
/// - 36749 → AL 11: 银级 100.00 ×2 → 无法确定
/// - 40813: 不在映射表
pub const STANDARD_PLANS: &str = "\
plan_id,state,metal_level,rate,rate_area
74449NR9870320,MO,Silver,245.20,3
26325VH2723968,MO,Silver,245.2,3
64618UJ0427811,MO,Silver,260.00,3
68493CI0477769,MO,Silver,290.05,3
09846WB8636771,MO,Gold,120.00,3
17929GG3012001,MO,Bronze,99.99,3
49128VF8041093,KS,Silver,271.64,6
34114NZ3391498,KS,Gold,150.00,6
40205HN0129213,WI,Silver,300.00,11
40205HN0129214,WI,Silver,310.00,11
55871TC1235768,AL,Silver,100.00,11
62521MR2278430,AL,Silver,100.00,11
";

pub const STANDARD_ZIPS: &str = "\
zipcode,state,county_code,name,rate_area
64148,MO,29095,Jackson,3
64148,MO,29095,Jackson,3
67118,KS,20095,Kingman,6
54923,WI,55047,Green Lake,11
54923,WI,55139,Winnebago,15
36749,AL,01001,Autauga,11
";

pub const STANDARD_TARGETS: &str = "\
zipcode,rate
64148,
67118,
40813,
54923,
36749,
64148,
";

/// 标准数据的预期 CSV 输出
pub const STANDARD_OUTPUT: &str = "\
zipcode,rate
64148,260.00
67118,
40813,
54923,
36749,
64148,260.00
";

/// 临时数据目录
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("创建临时目录失败"),
        }
    }

    /// 写入三份标准数据
    pub fn standard() -> Self {
        let fixture = Self::new();
        fixture.write(PLANS_FILE, STANDARD_PLANS);
        fixture.write(ZIPS_FILE, STANDARD_ZIPS);
        fixture.write(TARGETS_FILE, STANDARD_TARGETS);
        fixture
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("写入测试文件失败");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("读取输出文件失败")
    }

    /// 指向本目录三份文件、输出到 out.csv 的运行配置
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            plans_path: self.path(PLANS_FILE),
            zips_path: self.path(ZIPS_FILE),
            targets_path: self.path(TARGETS_FILE),
            output_path: Some(self.path(OUTPUT_FILE)),
            output_format: OutputFormat::Csv,
            include_header: true,
            rate_warning_threshold: Decimal::new(1_000_000, 2),
        }
    }
}
