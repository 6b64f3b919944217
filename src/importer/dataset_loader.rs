// ==========================================
// SLCSP 费率解析 - 数据集加载器实现
// ==========================================
// 流程: 文件解析 → 表头校验 → 字段映射 → DQ 校验 → 实体转换
// 红线: 任一 Error 级违规 → 整体失败（无部分数据）
// ==========================================

use crate::domain::dataset::{DatasetKind, DqLevel, DqReport, DqViolation};
use crate::domain::plan::{PlanRecord, RawPlanRecord};
use crate::domain::zip::{RawTargetRecord, RawZipRecord, ZipRecord};
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{
    DatasetLoader, DqValidator as _, FieldMapper as _, FileParser, RawTable,
};
use std::path::Path;
use tracing::{debug, info, warn};

// ==========================================
// DatasetLoaderImpl - 数据集加载器
// ==========================================
pub struct DatasetLoaderImpl<P: FileParser = UniversalFileParser> {
    parser: P,
    mapper: FieldMapper,
    validator: DqValidator,
}

impl Default for DatasetLoaderImpl<UniversalFileParser> {
    fn default() -> Self {
        Self::new(UniversalFileParser, DqValidator::default())
    }
}

impl<P: FileParser> DatasetLoaderImpl<P> {
    pub fn new(parser: P, validator: DqValidator) -> Self {
        Self {
            parser,
            mapper: FieldMapper::new(),
            validator,
        }
    }

    // ==========================================
    // 解析表 → 实体（不依赖文件格式）
    // ==========================================

    /// 从解析表构建计划数据集；无数据行时表头同样校验
    pub fn plans_from_table(
        &self,
        table: &RawTable,
    ) -> ImportResult<(Vec<PlanRecord>, DqReport)> {
        self.mapper.ensure_columns(DatasetKind::Plans, &table.headers)?;

        let raw: Vec<RawPlanRecord> = table
            .rows
            .iter()
            .map(|row| self.mapper.map_to_raw_plan(&row.values, row.row_number))
            .collect::<ImportResult<_>>()?;

        let violations = self.validator.validate_plans(&raw);
        let report = self.finish_report(DatasetKind::Plans, table.rows.len(), violations)?;

        let plans = raw
            .into_iter()
            .map(|r| into_entity(DatasetKind::Plans, r.row_number, r.into_plan()))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok((plans, report))
    }

    /// 从解析表构建 ZIP 映射数据集
    pub fn zips_from_table(
        &self,
        table: &RawTable,
    ) -> ImportResult<(Vec<ZipRecord>, DqReport)> {
        self.mapper.ensure_columns(DatasetKind::Zips, &table.headers)?;

        let raw: Vec<RawZipRecord> = table
            .rows
            .iter()
            .map(|row| self.mapper.map_to_raw_zip(&row.values, row.row_number))
            .collect::<ImportResult<_>>()?;

        let violations = self.validator.validate_zips(&raw);
        let report = self.finish_report(DatasetKind::Zips, table.rows.len(), violations)?;

        let zips = raw
            .into_iter()
            .map(|r| into_entity(DatasetKind::Zips, r.row_number, r.into_zip()))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok((zips, report))
    }

    /// 从解析表构建目标 ZIP 列表（保持顺序与重复）
    pub fn targets_from_table(
        &self,
        table: &RawTable,
    ) -> ImportResult<(Vec<String>, DqReport)> {
        self.mapper.ensure_columns(DatasetKind::Targets, &table.headers)?;

        let raw: Vec<RawTargetRecord> = table
            .rows
            .iter()
            .map(|row| self.mapper.map_to_raw_target(&row.values, row.row_number))
            .collect();

        let violations = self.validator.validate_targets(&raw);
        let report = self.finish_report(DatasetKind::Targets, table.rows.len(), violations)?;

        let targets = raw
            .into_iter()
            .map(|r| into_entity(DatasetKind::Targets, r.row_number, r.zipcode))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok((targets, report))
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 生成 DQ 报告，记录日志；存在 Error 级违规时返回错误
    fn finish_report(
        &self,
        dataset: DatasetKind,
        total_rows: usize,
        violations: Vec<DqViolation>,
    ) -> ImportResult<DqReport> {
        let report = self
            .validator
            .generate_dq_report(dataset, total_rows, violations);

        for v in &report.violations {
            let row = v.row_number;
            let field = v.field.as_str();
            match v.level {
                DqLevel::Error => warn!(%dataset, row, field, "DQ 错误: {}", v.message),
                DqLevel::Warning => warn!(%dataset, row, field, "DQ 警告: {}", v.message),
                DqLevel::Info => debug!(%dataset, row, field, "DQ 提示: {}", v.message),
            }
        }

        if let Some(first) = report.first_error() {
            return Err(ImportError::DataQualityError {
                dataset,
                error_count: report.summary.blocked,
                row: first.row_number,
                field: first.field.clone(),
                message: first.message.clone(),
            });
        }

        info!(
            %dataset,
            total_rows = report.summary.total_rows,
            warnings = report.summary.warning,
            "数据集校验通过"
        );

        Ok(report)
    }
}

/// DQ 校验已保证必填字段存在；此处仍缺失说明校验规则与实体不一致
fn into_entity<T>(dataset: DatasetKind, row: usize, entity: Option<T>) -> ImportResult<T> {
    entity.ok_or_else(|| {
        ImportError::InternalError(format!(
            "数据集 {} 行 {} 通过校验但字段不完整",
            dataset, row
        ))
    })
}

impl<P: FileParser> DatasetLoader for DatasetLoaderImpl<P> {
    fn load_plans(&self, file_path: &Path) -> ImportResult<(Vec<PlanRecord>, DqReport)> {
        info!(path = %file_path.display(), "加载计划数据");
        let table = self.parser.parse_to_raw_records(file_path)?;
        let (plans, report) = self.plans_from_table(&table)?;
        info!(
            plans = plans.len(),
            silver = plans.iter().filter(|p| p.is_silver()).count(),
            "计划数据加载完成"
        );
        Ok((plans, report))
    }

    fn load_zips(&self, file_path: &Path) -> ImportResult<(Vec<ZipRecord>, DqReport)> {
        info!(path = %file_path.display(), "加载 ZIP 映射数据");
        let table = self.parser.parse_to_raw_records(file_path)?;
        let (zips, report) = self.zips_from_table(&table)?;
        info!(rows = zips.len(), "ZIP 映射数据加载完成");
        Ok((zips, report))
    }

    fn load_targets(&self, file_path: &Path) -> ImportResult<(Vec<String>, DqReport)> {
        info!(path = %file_path.display(), "加载目标 ZIP 列表");
        let table = self.parser.parse_to_raw_records(file_path)?;
        let (targets, report) = self.targets_from_table(&table)?;
        info!(targets = targets.len(), "目标 ZIP 列表加载完成");
        Ok((targets, report))
    }
}
