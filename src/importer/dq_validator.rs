// ==========================================
// SLCSP 费率解析 - 数据质量校验器实现
// ==========================================
// 职责: 必填 / 格式 / 范围 / 重复 校验 + DQ 报告生成
// 级别: Error 阻断加载; Warning 仅告警; Info 仅记录
// ==========================================

use crate::domain::dataset::{DatasetKind, DqLevel, DqReport, DqSummary, DqViolation};
use crate::domain::plan::RawPlanRecord;
use crate::domain::zip::{RawTargetRecord, RawZipRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::importer_trait::DqValidator as DqValidatorTrait;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// 默认费率异常阈值（月保费 10000.00 美元）
pub fn default_rate_warning_threshold() -> Decimal {
    Decimal::new(1_000_000, 2)
}

pub struct DqValidator {
    rate_warning_threshold: Decimal, // 费率异常阈值
    cleaner: DataCleaner,
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new(default_rate_warning_threshold())
    }
}

impl DqValidator {
    pub fn new(rate_warning_threshold: Decimal) -> Self {
        Self {
            rate_warning_threshold,
            cleaner: DataCleaner,
        }
    }

    fn violation(row_number: usize, level: DqLevel, field: &str, message: String) -> DqViolation {
        DqViolation {
            row_number,
            level,
            field: field.to_string(),
            message,
        }
    }

    /// 州代码校验（缺失 / 非两位字母）
    fn check_state(&self, state: &Option<String>, row_number: usize) -> Option<DqViolation> {
        match state {
            None => Some(Self::violation(
                row_number,
                DqLevel::Error,
                "state",
                "州代码缺失".to_string(),
            )),
            Some(s) if !self.cleaner.is_valid_state(s) => Some(Self::violation(
                row_number,
                DqLevel::Error,
                "state",
                format!("州代码格式错误（期望两位字母）: {}", s),
            )),
            Some(_) => None,
        }
    }

    /// ZIP 校验（缺失 / 非五位数字）
    fn check_zipcode(&self, zipcode: &Option<String>, row_number: usize) -> Option<DqViolation> {
        match zipcode {
            None => Some(Self::violation(
                row_number,
                DqLevel::Error,
                "zipcode",
                "ZIP 代码缺失".to_string(),
            )),
            Some(z) if !self.cleaner.is_valid_zipcode(z) => Some(Self::violation(
                row_number,
                DqLevel::Error,
                "zipcode",
                format!("ZIP 代码格式错误（期望五位数字）: {}", z),
            )),
            Some(_) => None,
        }
    }

    fn check_rate_area(rate_area: Option<u32>, row_number: usize) -> Option<DqViolation> {
        // 非正整数已在映射阶段拒绝，此处只检查缺失
        rate_area.is_none().then(|| {
            Self::violation(
                row_number,
                DqLevel::Error,
                "rate_area",
                "费率区缺失".to_string(),
            )
        })
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate_plans(&self, records: &[RawPlanRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in records {
            let row = record.row_number;

            match &record.plan_id {
                None => violations.push(Self::violation(
                    row,
                    DqLevel::Error,
                    "plan_id",
                    "plan_id 缺失".to_string(),
                )),
                Some(id) => {
                    if !seen_ids.insert(id.clone()) {
                        violations.push(Self::violation(
                            row,
                            DqLevel::Warning,
                            "plan_id",
                            format!("plan_id 重复: {}", id),
                        ));
                    }
                }
            }

            violations.extend(self.check_state(&record.state, row));

            if record.metal_level.is_none() {
                violations.push(Self::violation(
                    row,
                    DqLevel::Error,
                    "metal_level",
                    "金属等级缺失".to_string(),
                ));
            }

            match record.rate {
                None => violations.push(Self::violation(
                    row,
                    DqLevel::Error,
                    "rate",
                    "费率缺失".to_string(),
                )),
                Some(rate) if rate < Decimal::ZERO => {
                    violations.push(Self::violation(
                        row,
                        DqLevel::Error,
                        "rate",
                        format!("费率为负数: {}", rate),
                    ))
                }
                Some(rate) if rate > self.rate_warning_threshold => {
                    violations.push(Self::violation(
                        row,
                        DqLevel::Warning,
                        "rate",
                        format!(
                            "费率异常 ({} > {})，可能单位错误",
                            rate, self.rate_warning_threshold
                        ),
                    ))
                }
                Some(_) => {}
            }

            violations.extend(Self::check_rate_area(record.rate_area, row));
        }

        violations
    }

    fn validate_zips(&self, records: &[RawZipRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_rows = HashSet::new();

        for record in records {
            let row = record.row_number;

            violations.extend(self.check_zipcode(&record.zipcode, row));
            violations.extend(self.check_state(&record.state, row));
            violations.extend(Self::check_rate_area(record.rate_area, row));

            // 同一 (zipcode, state, rate_area) 重复出现: 无害，仅记录
            if let (Some(zip), Some(state), Some(area)) =
                (&record.zipcode, &record.state, record.rate_area)
            {
                if !seen_rows.insert((zip.clone(), state.clone(), area)) {
                    violations.push(Self::violation(
                        row,
                        DqLevel::Info,
                        "zipcode",
                        format!("重复映射行: {} → {} {}", zip, state, area),
                    ));
                }
            }
        }

        violations
    }

    fn validate_targets(&self, records: &[RawTargetRecord]) -> Vec<DqViolation> {
        records
            .iter()
            .filter_map(|record| self.check_zipcode(&record.zipcode, record.row_number))
            .collect()
    }

    fn generate_dq_report(
        &self,
        dataset: DatasetKind,
        total_rows: usize,
        violations: Vec<DqViolation>,
    ) -> DqReport {
        let count = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();

        // 同一行可能有多处错误，阻断按行计
        let blocked_rows: HashSet<usize> = violations
            .iter()
            .filter(|v| matches!(v.level, DqLevel::Error))
            .map(|v| v.row_number)
            .collect();

        DqReport {
            dataset,
            summary: DqSummary {
                total_rows,
                accepted: total_rows.saturating_sub(blocked_rows.len()),
                blocked: count(DqLevel::Error),
                warning: count(DqLevel::Warning),
                info: count(DqLevel::Info),
            },
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MetalLevel;

    fn plan(plan_id: &str, rate: Decimal, row_number: usize) -> RawPlanRecord {
        RawPlanRecord {
            plan_id: Some(plan_id.to_string()),
            state: Some("MO".to_string()),
            metal_level: Some(MetalLevel::Silver),
            rate: Some(rate),
            rate_area: Some(3),
            row_number,
        }
    }

    fn zip(zipcode: &str, state: &str, rate_area: u32, row_number: usize) -> RawZipRecord {
        RawZipRecord {
            zipcode: Some(zipcode.to_string()),
            state: Some(state.to_string()),
            county_code: Some("29095".to_string()),
            name: None,
            rate_area: Some(rate_area),
            row_number,
        }
    }

    #[test]
    fn test_validate_plans_clean() {
        let validator = DqValidator::default();
        let records = vec![
            plan("P1", Decimal::new(29005, 2), 1),
            plan("P2", Decimal::new(24520, 2), 2),
        ];
        assert!(validator.validate_plans(&records).is_empty());
    }

    #[test]
    fn test_validate_plans_negative_rate_blocks() {
        let validator = DqValidator::default();
        let records = vec![plan("P1", Decimal::new(-100, 2), 5)];

        let violations = validator.validate_plans(&records);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Error);
        assert_eq!(violations[0].field, "rate");
        assert_eq!(violations[0].row_number, 5);
    }

    #[test]
    fn test_validate_plans_rate_anomaly_warns() {
        let validator = DqValidator::new(Decimal::new(1000, 0));
        let records = vec![plan("P1", Decimal::new(150000, 2), 1)];

        let violations = validator.validate_plans(&records);

        assert!(violations
            .iter()
            .any(|v| v.field == "rate" && v.level == DqLevel::Warning));
    }

    #[test]
    fn test_validate_plans_duplicate_id_warns() {
        let validator = DqValidator::default();
        let records = vec![
            plan("P1", Decimal::new(100, 0), 1),
            plan("P1", Decimal::new(200, 0), 2),
        ];

        let violations = validator.validate_plans(&records);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Warning);
        assert_eq!(violations[0].row_number, 2);
    }

    #[test]
    fn test_validate_plans_missing_fields() {
        let validator = DqValidator::default();
        let records = vec![RawPlanRecord {
            row_number: 1,
            ..Default::default()
        }];

        let violations = validator.validate_plans(&records);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();

        assert_eq!(
            fields,
            vec!["plan_id", "state", "metal_level", "rate", "rate_area"]
        );
        assert!(violations.iter().all(|v| v.level == DqLevel::Error));
    }

    #[test]
    fn test_validate_zips_duplicate_is_info() {
        let validator = DqValidator::default();
        let records = vec![zip("64148", "MO", 3, 1), zip("64148", "MO", 3, 2)];

        let violations = validator.validate_zips(&records);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Info);
    }

    #[test]
    fn test_validate_zips_ambiguity_is_not_a_violation() {
        let validator = DqValidator::default();
        let records = vec![zip("64148", "MO", 3, 1), zip("64148", "MO", 4, 2)];

        assert!(validator.validate_zips(&records).is_empty());
    }

    #[test]
    fn test_validate_targets_bad_format() {
        let validator = DqValidator::default();
        let records = vec![
            RawTargetRecord {
                zipcode: Some("64148".to_string()),
                row_number: 1,
            },
            RawTargetRecord {
                zipcode: Some("6414".to_string()),
                row_number: 2,
            },
        ];

        let violations = validator.validate_targets(&records);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].row_number, 2);
    }

    #[test]
    fn test_generate_dq_report_counts() {
        let validator = DqValidator::default();
        let violations = vec![
            DqViolation {
                row_number: 1,
                level: DqLevel::Error,
                field: "state".to_string(),
                message: String::new(),
            },
            DqViolation {
                row_number: 1,
                level: DqLevel::Error,
                field: "rate".to_string(),
                message: String::new(),
            },
            DqViolation {
                row_number: 2,
                level: DqLevel::Warning,
                field: "plan_id".to_string(),
                message: String::new(),
            },
        ];

        let report = validator.generate_dq_report(DatasetKind::Plans, 10, violations);

        assert!(report.has_errors());
        assert_eq!(report.summary.accepted, 9);
        assert_eq!(report.summary.blocked, 2);
        assert_eq!(report.summary.warning, 1);
        assert_eq!(report.first_error().map(|v| v.field.as_str()), Some("state"));
    }
}
