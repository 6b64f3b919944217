// ==========================================
// SLCSP 费率解析 - 第二低价银级计划计算器
// ==========================================
// 规则:
// 1) 只取银级计划
// 2) (state, rate_area) 同时匹配
// 3) 按费率精确去重（同价计划只算一个价位）
// 4) 升序排列，取第二个不同费率；不足两个 → 无法确定
// 红线: 费率比较使用精确十进制，禁止浮点
// ==========================================

use crate::domain::plan::PlanRecord;
use crate::domain::types::{quantize_rate, RateArea};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

/// 升序去重费率中的第二个（已量化为两位小数）
///
/// 输入无需有序或去重。
pub fn second_lowest_distinct<I>(rates: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let distinct: BTreeSet<Decimal> = rates.into_iter().collect();
    distinct.into_iter().nth(1).map(quantize_rate)
}

/// SlcspCalculator - SLCSP 计算器
///
/// 加载时建立 RateArea → 升序去重银级费率 索引。
#[derive(Debug, Clone, Default)]
pub struct SlcspCalculator {
    silver_rates: HashMap<RateArea, Vec<Decimal>>,
}

impl SlcspCalculator {
    pub fn new(plans: &[PlanRecord]) -> Self {
        let mut grouped: HashMap<RateArea, BTreeSet<Decimal>> = HashMap::new();
        for plan in plans.iter().filter(|p| p.is_silver()) {
            grouped
                .entry(plan.rate_area_key())
                .or_default()
                .insert(plan.rate);
        }

        let silver_rates = grouped
            .into_iter()
            .map(|(area, rates)| (area, rates.into_iter().collect()))
            .collect();

        Self { silver_rates }
    }

    /// 费率区内升序去重的银级费率（无银级计划时为空）
    pub fn distinct_rates(&self, rate_area: &RateArea) -> &[Decimal] {
        self.silver_rates
            .get(rate_area)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn compute(&self, rate_area: &RateArea) -> Option<Decimal> {
        second_lowest_distinct(self.distinct_rates(rate_area).iter().copied())
    }

    pub fn rate_area_count(&self) -> usize {
        self.silver_rates.len()
    }
}
