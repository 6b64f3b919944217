// ==========================================
// SLCSP 费率解析 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 列名别名: rate_area/ratearea, zipcode/zip
// ==========================================

use crate::domain::dataset::DatasetKind;
use crate::domain::plan::RawPlanRecord;
use crate::domain::types::MetalLevel;
use crate::domain::zip::{RawTargetRecord, RawZipRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{DataCleaner as _, FieldMapper as FieldMapperTrait};
use rust_decimal::Decimal;
use std::collections::HashMap;

// ==========================================
// 标准字段名
// ==========================================
pub mod columns {
    pub const PLAN_ID: &str = "plan_id";
    pub const STATE: &str = "state";
    pub const METAL_LEVEL: &str = "metal_level";
    pub const RATE: &str = "rate";
    pub const RATE_AREA: &str = "rate_area";
    pub const ZIPCODE: &str = "zipcode";
    pub const COUNTY_CODE: &str = "county_code";
    pub const NAME: &str = "name";
}

/// 标准字段对应的可接受列名
pub fn column_aliases(key: &str) -> Vec<&str> {
    match key {
        columns::RATE_AREA => vec!["rate_area", "ratearea", "rate area"],
        columns::ZIPCODE => vec!["zipcode", "zip", "zip_code"],
        columns::METAL_LEVEL => vec!["metal_level", "metal"],
        _ => vec![key],
    }
}

/// 各数据集必需的标准字段
pub fn required_columns(dataset: DatasetKind) -> &'static [&'static str] {
    match dataset {
        DatasetKind::Plans => &[
            columns::PLAN_ID,
            columns::STATE,
            columns::METAL_LEVEL,
            columns::RATE,
            columns::RATE_AREA,
        ],
        DatasetKind::Zips => &[columns::ZIPCODE, columns::STATE, columns::RATE_AREA],
        DatasetKind::Targets => &[columns::ZIPCODE],
    }
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 校验表头是否覆盖必需字段（大小写不敏感）
    pub fn ensure_columns(
        &self,
        dataset: DatasetKind,
        headers: &[String],
    ) -> ImportResult<()> {
        for key in required_columns(dataset) {
            let found = column_aliases(key)
                .iter()
                .any(|alias| headers.iter().any(|h| h.eq_ignore_ascii_case(alias)));
            if !found {
                return Err(ImportError::MissingColumn {
                    dataset,
                    column: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// 提取字符串字段（返回 Option），支持列名别名
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in column_aliases(key) {
            let value = row
                .iter()
                .find(|(header, _)| header.eq_ignore_ascii_case(alias))
                .map(|(_, v)| v.clone());
            if let Some(v) = self.cleaner.normalize_null(value) {
                return Some(v);
            }
        }
        None
    }

    fn parse_decimal(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        dataset: DatasetKind,
        row_number: usize,
    ) -> ImportResult<Option<Decimal>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => self.cleaner.parse_decimal(&value).map(Some).map_err(|message| {
                ImportError::TypeConversionError {
                    dataset,
                    row: row_number,
                    field: key.to_string(),
                    message,
                }
            }),
        }
    }

    fn parse_rate_area(
        &self,
        row: &HashMap<String, String>,
        dataset: DatasetKind,
        row_number: usize,
    ) -> ImportResult<Option<u32>> {
        match self.get_string(row, columns::RATE_AREA) {
            None => Ok(None),
            Some(value) => self
                .cleaner
                .parse_rate_area(&value)
                .map(Some)
                .map_err(|message| ImportError::TypeConversionError {
                    dataset,
                    row: row_number,
                    field: columns::RATE_AREA.to_string(),
                    message,
                }),
        }
    }

    fn parse_metal_level(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<Option<MetalLevel>> {
        match self.get_string(row, columns::METAL_LEVEL) {
            None => Ok(None),
            Some(value) => value.parse::<MetalLevel>().map(Some).map_err(|message| {
                ImportError::TypeConversionError {
                    dataset: DatasetKind::Plans,
                    row: row_number,
                    field: columns::METAL_LEVEL.to_string(),
                    message,
                }
            }),
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_plan(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawPlanRecord> {
        let dataset = DatasetKind::Plans;
        Ok(RawPlanRecord {
            plan_id: self.get_string(row, columns::PLAN_ID),
            state: self.get_string(row, columns::STATE),
            metal_level: self.parse_metal_level(row, row_number)?,
            rate: self.parse_decimal(row, columns::RATE, dataset, row_number)?,
            rate_area: self.parse_rate_area(row, dataset, row_number)?,
            row_number,
        })
    }

    fn map_to_raw_zip(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawZipRecord> {
        Ok(RawZipRecord {
            zipcode: self.get_string(row, columns::ZIPCODE),
            state: self.get_string(row, columns::STATE),
            county_code: self.get_string(row, columns::COUNTY_CODE),
            name: self.get_string(row, columns::NAME),
            rate_area: self.parse_rate_area(row, DatasetKind::Zips, row_number)?,
            row_number,
        })
    }

    fn map_to_raw_target(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawTargetRecord {
        RawTargetRecord {
            zipcode: self.get_string(row, columns::ZIPCODE),
            row_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_plan_basic() {
        let mapper = FieldMapper::new();
        let record = mapper
            .map_to_raw_plan(
                &row(&[
                    ("plan_id", "74449NR9870320"),
                    ("state", "GA"),
                    ("metal_level", "Silver"),
                    ("rate", "298.62"),
                    ("rate_area", "7"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(record.plan_id, Some("74449NR9870320".to_string()));
        assert_eq!(record.metal_level, Some(MetalLevel::Silver));
        assert_eq!(record.rate, Some(Decimal::new(29862, 2)));
        assert_eq!(record.rate_area, Some(7));
    }

    #[test]
    fn test_map_plan_invalid_rate_names_field() {
        let mapper = FieldMapper::new();
        let result = mapper.map_to_raw_plan(
            &row(&[
                ("plan_id", "P1"),
                ("state", "GA"),
                ("metal_level", "Silver"),
                ("rate", "abc"),
                ("rate_area", "7"),
            ]),
            4,
        );

        match result {
            Err(ImportError::TypeConversionError { row, field, .. }) => {
                assert_eq!(row, 4);
                assert_eq!(field, "rate");
            }
            other => panic!("期望 TypeConversionError, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_map_plan_unknown_metal_level() {
        let mapper = FieldMapper::new();
        let result = mapper.map_to_raw_plan(
            &row(&[("plan_id", "P1"), ("metal_level", "Titanium")]),
            2,
        );
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { ref field, .. }) if field == "metal_level"
        ));
    }

    #[test]
    fn test_map_zip_with_aliases() {
        let mapper = FieldMapper::new();
        let record = mapper
            .map_to_raw_zip(
                &row(&[
                    ("ZIP", "36749"),
                    ("State", "AL"),
                    ("county_code", "01001"),
                    ("name", "Autauga"),
                    ("RateArea", "11"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(record.zipcode, Some("36749".to_string()));
        assert_eq!(record.state, Some("AL".to_string()));
        assert_eq!(record.rate_area, Some(11));
        assert_eq!(record.name, Some("Autauga".to_string()));
    }

    #[test]
    fn test_map_target_ignores_rate_column() {
        let mapper = FieldMapper::new();
        let record = mapper.map_to_raw_target(&row(&[("zipcode", "64148"), ("rate", "")]), 3);
        assert_eq!(record.zipcode, Some("64148".to_string()));
        assert_eq!(record.row_number, 3);
    }

    #[test]
    fn test_empty_value_as_none() {
        let mapper = FieldMapper::new();
        let record = mapper
            .map_to_raw_zip(&row(&[("zipcode", "64148"), ("state", "  ")]), 1)
            .unwrap();
        assert_eq!(record.state, None);
        assert_eq!(record.rate_area, None);
    }

    #[test]
    fn test_ensure_columns() {
        let mapper = FieldMapper::new();
        let headers = vec!["zipcode".to_string(), "rate".to_string()];
        assert!(mapper.ensure_columns(DatasetKind::Targets, &headers).is_ok());

        let result = mapper.ensure_columns(DatasetKind::Zips, &headers);
        assert!(matches!(
            result,
            Err(ImportError::MissingColumn { ref column, .. }) if column == "state"
        ));
    }
}
