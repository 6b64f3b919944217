// ==========================================
// SLCSP 费率解析 - 解析 API
// ==========================================
// 流程: RunConfig → 导入三个数据集 → 建立索引 → 逐 ZIP 解析 → 输出报告
// 红线: 任一数据集加载失败 → 整体失败，不产生部分输出
// ==========================================

use crate::api::error::ApiResult;
use crate::config::config_manager::RunConfig;
use crate::domain::dataset::RateDataset;
use crate::domain::slcsp::SlcspReport;
use crate::engine::orchestrator::SlcspOrchestrator;
use crate::importer::dataset_loader::DatasetLoaderImpl;
use crate::importer::dq_validator::DqValidator;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::DatasetLoader;
use crate::report::writer::ReportWriter;
use tracing::{info, info_span};
use uuid::Uuid;

// ==========================================
// SlcspApi - 解析 API
// ==========================================
pub struct SlcspApi<L: DatasetLoader = DatasetLoaderImpl> {
    config: RunConfig,
    loader: L,
}

impl SlcspApi<DatasetLoaderImpl> {
    /// 使用默认文件解析器，DQ 阈值取自配置
    pub fn new(config: RunConfig) -> Self {
        let loader = DatasetLoaderImpl::new(
            UniversalFileParser,
            DqValidator::new(config.rate_warning_threshold),
        );
        Self::with_loader(config, loader)
    }
}

impl<L: DatasetLoader> SlcspApi<L> {
    pub fn with_loader(config: RunConfig, loader: L) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// 加载全部数据集
    pub fn load_dataset(&self) -> ApiResult<RateDataset> {
        let dataset = self.loader.load_all(
            &self.config.plans_path,
            &self.config.zips_path,
            &self.config.targets_path,
        )?;

        info!(
            plans = dataset.plans.len(),
            silver_plans = dataset.silver_plan_count(),
            zips = dataset.zips.len(),
            targets = dataset.targets.len(),
            "数据集加载完成"
        );
        Ok(dataset)
    }

    /// 加载并解析，不输出
    pub fn compute(&self) -> ApiResult<SlcspReport> {
        let dataset = self.load_dataset()?;
        let orchestrator = SlcspOrchestrator::from_dataset(&dataset);
        Ok(orchestrator.run(&dataset.targets))
    }

    /// 完整运行: 加载 → 解析 → 写出（文件或 stdout）
    pub fn run(&self) -> ApiResult<SlcspReport> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("slcsp_run", run_id = %run_id);
        let _guard = span.enter();

        info!(
            plans = %self.config.plans_path.display(),
            zips = %self.config.zips_path.display(),
            targets = %self.config.targets_path.display(),
            format = %self.config.output_format,
            "开始 SLCSP 解析"
        );

        let report = self.compute()?;

        self.writer()
            .with_run_id(run_id.as_str())
            .write_to(&report, self.config.output_path.as_deref())?;

        let destination = match &self.config.output_path {
            Some(path) => path.display().to_string(),
            None => "stdout".to_string(),
        };
        info!(
            output = %destination,
            undetermined = report.summary.undetermined(),
            "结果已输出"
        );
        Ok(report)
    }

    /// 按配置构建报告输出器
    pub fn writer(&self) -> ReportWriter {
        ReportWriter::new(self.config.output_format).with_header(self.config.include_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::importer::error::ImportError;
    use crate::report::writer::OutputFormat;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn config_for(dir: &Path) -> RunConfig {
        RunConfig {
            plans_path: dir.join("plans.csv"),
            zips_path: dir.join("zips.csv"),
            targets_path: dir.join("slcsp.csv"),
            output_path: Some(dir.join("out.csv")),
            output_format: OutputFormat::Csv,
            include_header: true,
            rate_warning_threshold: Decimal::new(1_000_000, 2),
        }
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "plans.csv",
            "plan_id,state,metal_level,rate,rate_area\n\
             A1,MO,Silver,245.20,3\n\
             A2,MO,Silver,260.00,3\n\
             A3,MO,Gold,100.00,3\n",
        );
        write(
            dir.path(),
            "zips.csv",
            "zipcode,state,county_code,name,rate_area\n\
             64148,MO,29095,Jackson,3\n\
             54923,WI,55047,Green Lake,11\n\
             54923,WI,55139,Winnebago,15\n",
        );
        write(dir.path(), "slcsp.csv", "zipcode,rate\n64148,\n54923,\n40813,\n");
        dir
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = fixture();
        let api = SlcspApi::new(config_for(dir.path()));

        let report = api.run().unwrap();
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.resolved, 1);

        let written = fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(written, "zipcode,rate\n64148,260.00\n54923,\n40813,\n");
    }

    #[test]
    fn test_bad_rate_aborts_without_output() {
        let dir = fixture();
        write(
            dir.path(),
            "plans.csv",
            "plan_id,state,metal_level,rate,rate_area\nA1,MO,Silver,abc,3\n",
        );
        let api = SlcspApi::new(config_for(dir.path()));

        let err = api.run().unwrap_err();
        assert!(matches!(err, ApiError::ImportError(_)));
        assert!(err.is_data_error());
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_missing_targets_file() {
        let dir = fixture();
        fs::remove_file(dir.path().join("slcsp.csv")).unwrap();

        let err = SlcspApi::new(config_for(dir.path())).compute().unwrap_err();
        assert!(matches!(
            err,
            ApiError::ImportError(ImportError::FileNotFound(_))
        ));
    }
}
