// ==========================================
// SLCSP 费率解析 - 数据导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 清洗 → DQ 校验 → 只读数据集
// ==========================================

use crate::domain::dataset::{DatasetKind, DqReport, DqViolation, RateDataset};
use crate::domain::plan::{PlanRecord, RawPlanRecord};
use crate::domain::zip::{RawTargetRecord, RawZipRecord, ZipRecord};
use crate::importer::error::ImportResult;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// 解析结果
// ==========================================

/// 一行原始数据（行号为源文件数据行号，表头不计，从 1 开始）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

/// 原始表格: 表头 + 数据行（已跳过全空行，行号保持源文件位置）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录（无数据行时表头仍返回）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawPlanRecord
    ///
    /// # 返回
    /// - Err: 类型转换错误（费率不是合法十进制、rate_area 不是整数、未知金属等级）
    fn map_to_raw_plan(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawPlanRecord>;

    /// 将原始行记录映射为 RawZipRecord
    fn map_to_raw_zip(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawZipRecord>;

    /// 将原始行记录映射为 RawTargetRecord（忽略 rate 列）
    fn map_to_raw_target(&self, row: &HashMap<String, String>, row_number: usize)
        -> RawTargetRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleanerImpl
// 红线: 只做 TRIM / NULL 标准化，不做强制纠正
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 解析精确十进制费率
    ///
    /// # 返回
    /// - Err(String): 无法解析的原因（不会退化为浮点）
    fn parse_decimal(&self, value: &str) -> Result<Decimal, String>;

    /// 解析费率区编号（正整数）
    fn parse_rate_area(&self, value: &str) -> Result<u32, String>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口
// 实现者: DqValidatorImpl
pub trait DqValidator: Send + Sync {
    /// 校验计划记录（必填 / 州代码 / 费率范围 / plan_id 重复）
    fn validate_plans(&self, records: &[RawPlanRecord]) -> Vec<DqViolation>;

    /// 校验 ZIP 映射记录（必填 / ZIP 格式 / 完全重复行）
    fn validate_zips(&self, records: &[RawZipRecord]) -> Vec<DqViolation>;

    /// 校验目标 ZIP（必填 / ZIP 格式）
    fn validate_targets(&self, records: &[RawTargetRecord]) -> Vec<DqViolation>;

    /// 生成 DQ 报告
    fn generate_dq_report(
        &self,
        dataset: DatasetKind,
        total_rows: usize,
        violations: Vec<DqViolation>,
    ) -> DqReport;
}

// ==========================================
// DatasetLoader Trait
// ==========================================
// 用途: 三个数据集的加载入口
// 实现者: DatasetLoaderImpl
// 红线: 任一阻断级违规 → 整体失败，不产生部分数据
pub trait DatasetLoader: Send + Sync {
    /// 加载计划数据集
    fn load_plans(&self, file_path: &Path) -> ImportResult<(Vec<PlanRecord>, DqReport)>;

    /// 加载 ZIP 映射数据集
    fn load_zips(&self, file_path: &Path) -> ImportResult<(Vec<ZipRecord>, DqReport)>;

    /// 加载目标 ZIP 列表（保持输入顺序，保留重复）
    fn load_targets(&self, file_path: &Path) -> ImportResult<(Vec<String>, DqReport)>;

    /// 一次加载全部数据集
    fn load_all(
        &self,
        plans_path: &Path,
        zips_path: &Path,
        targets_path: &Path,
    ) -> ImportResult<RateDataset> {
        let (plans, _) = self.load_plans(plans_path)?;
        let (zips, _) = self.load_zips(zips_path)?;
        let (targets, _) = self.load_targets(targets_path)?;

        Ok(RateDataset {
            plans,
            zips,
            targets,
        })
    }
}
