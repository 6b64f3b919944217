// ==========================================
// SLCSP 费率解析 - 解析编排器
// ==========================================
// 流程: 目标 ZIP → RateAreaResolver → SlcspCalculator → SlcspResult
// 红线: 每个输入 ZIP 输出一行，顺序与输入一致（含重复）
// 红线: 所有结果必须带 outcome（可解释）
// ==========================================

use crate::domain::dataset::RateDataset;
use crate::domain::slcsp::{SlcspOutcome, SlcspReport, SlcspResult};
use crate::engine::rate_area_resolver::{RateAreaResolver, Resolution};
use crate::engine::slcsp_calculator::SlcspCalculator;
use tracing::{debug, info};

// ==========================================
// SlcspOrchestrator - 解析编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct SlcspOrchestrator {
    resolver: RateAreaResolver,
    calculator: SlcspCalculator,
}

impl SlcspOrchestrator {
    pub fn new(resolver: RateAreaResolver, calculator: SlcspCalculator) -> Self {
        Self {
            resolver,
            calculator,
        }
    }

    /// 从只读数据集一次性建立两个索引
    pub fn from_dataset(dataset: &RateDataset) -> Self {
        let resolver = RateAreaResolver::new(&dataset.zips);
        let calculator = SlcspCalculator::new(&dataset.plans);

        info!(
            zipcodes = resolver.zipcode_count(),
            ambiguous_zipcodes = resolver.ambiguous_count(),
            silver_rate_areas = calculator.rate_area_count(),
            "索引建立完成"
        );

        Self::new(resolver, calculator)
    }

    /// 解析单个 ZIP
    pub fn resolve_one(&self, zipcode: &str) -> SlcspResult {
        let (rate, outcome) = match self.resolver.resolve(zipcode) {
            Resolution::Unknown => (None, SlcspOutcome::UnknownZip),
            Resolution::Ambiguous(rate_areas) => {
                (None, SlcspOutcome::AmbiguousZip { rate_areas })
            }
            Resolution::Unique(rate_area) => match self.calculator.compute(&rate_area) {
                Some(rate) => (Some(rate), SlcspOutcome::Resolved { rate_area }),
                None => {
                    let distinct_rates = self.calculator.distinct_rates(&rate_area).len();
                    (
                        None,
                        SlcspOutcome::InsufficientPlans {
                            rate_area,
                            distinct_rates,
                        },
                    )
                }
            },
        };

        debug!(zipcode, %outcome, rate = ?rate, "ZIP 解析完成");

        SlcspResult {
            zipcode: zipcode.to_string(),
            rate,
            outcome,
        }
    }

    /// 按输入顺序解析全部目标 ZIP
    pub fn run<S: AsRef<str>>(&self, targets: &[S]) -> SlcspReport {
        let mut report = SlcspReport::default();
        for zipcode in targets {
            report.push(self.resolve_one(zipcode.as_ref()));
        }

        let summary = &report.summary;
        info!(
            total = summary.total,
            resolved = summary.resolved,
            unknown_zip = summary.unknown_zip,
            ambiguous_zip = summary.ambiguous_zip,
            insufficient_plans = summary.insufficient_plans,
            "SLCSP 解析完成"
        );

        report
    }
}
