// ==========================================
// SLCSP 费率解析 - 费率区解析器
// ==========================================
// 规则: zipcode 精确匹配 → 去重 (state, rate_area)
// 结果: 0 个 → 未知 ZIP; 1 个 → 唯一费率区; >1 个 → 歧义（不猜测）
// 红线: 同州不同费率区同样视为歧义
// ==========================================

use crate::domain::types::RateArea;
use crate::domain::zip::ZipRecord;
use std::collections::{BTreeSet, HashMap};

/// 费率区解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unknown,
    Unique(RateArea),
    Ambiguous(Vec<RateArea>),
}

impl Resolution {
    pub fn unique(&self) -> Option<&RateArea> {
        match self {
            Resolution::Unique(area) => Some(area),
            Resolution::Unknown | Resolution::Ambiguous(_) => None,
        }
    }
}

/// RateAreaResolver - 费率区解析器
///
/// 加载时一次性建立 zipcode → {RateArea} 索引，查询为纯函数。
#[derive(Debug, Clone, Default)]
pub struct RateAreaResolver {
    index: HashMap<String, BTreeSet<RateArea>>,
}

impl RateAreaResolver {
    pub fn new(zips: &[ZipRecord]) -> Self {
        let mut index: HashMap<String, BTreeSet<RateArea>> = HashMap::new();
        for zip in zips {
            index
                .entry(zip.zipcode.clone())
                .or_default()
                .insert(zip.rate_area_key());
        }
        Self { index }
    }

    /// 去重后的费率区集合（未知 ZIP 返回空集合）
    pub fn rate_areas(&self, zipcode: &str) -> BTreeSet<RateArea> {
        self.index.get(zipcode).cloned().unwrap_or_default()
    }

    pub fn resolve(&self, zipcode: &str) -> Resolution {
        let Some(areas) = self.index.get(zipcode) else {
            return Resolution::Unknown;
        };

        let mut iter = areas.iter();
        match (iter.next(), iter.next()) {
            (None, _) => Resolution::Unknown,
            (Some(area), None) => Resolution::Unique(area.clone()),
            (Some(_), Some(_)) => Resolution::Ambiguous(areas.iter().cloned().collect()),
        }
    }

    pub fn zipcode_count(&self) -> usize {
        self.index.len()
    }

    /// 跨多个费率区的 ZIP 数量
    pub fn ambiguous_count(&self) -> usize {
        self.index.values().filter(|areas| areas.len() > 1).count()
    }
}
