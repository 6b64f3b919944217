// ==========================================
// SLCSP 费率解析 - ZIP 映射实体
// ==========================================
// 职责: ZIP→费率区映射记录 + 待解析目标 ZIP
// 说明: 同一 zipcode 允许多行（重复或跨费率区），由解析器区分
// ==========================================

use crate::domain::types::RateArea;
use serde::{Deserialize, Serialize};

// ==========================================
// RawZipRecord - ZIP 映射原始记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawZipRecord {
    pub zipcode: Option<String>,
    pub state: Option<String>,
    pub county_code: Option<String>,
    pub name: Option<String>,
    pub rate_area: Option<u32>,

    // 元信息
    pub row_number: usize,
}

impl RawZipRecord {
    /// county_code / name 不参与核心计算，缺失时不阻断
    pub fn into_zip(self) -> Option<ZipRecord> {
        Some(ZipRecord {
            zipcode: self.zipcode?,
            state: self.state?,
            county_code: self.county_code.unwrap_or_default(),
            name: self.name,
            rate_area: self.rate_area?,
        })
    }
}

// ==========================================
// ZipRecord - ZIP 映射实体
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipRecord {
    pub zipcode: String,
    pub state: String,
    pub county_code: String,
    pub name: Option<String>,
    pub rate_area: u32,
}

impl ZipRecord {
    pub fn rate_area_key(&self) -> RateArea {
        RateArea::new(self.state.clone(), self.rate_area)
    }
}

// ==========================================
// RawTargetRecord - 待解析目标 ZIP
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTargetRecord {
    pub zipcode: Option<String>,
    pub row_number: usize,
}
