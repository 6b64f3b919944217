// ==========================================
// SLCSP 费率解析 - 计划实体
// ==========================================
// 职责: 计划原始记录（映射后、校验前）+ 计划实体（校验后，只读）
// ==========================================

use crate::domain::types::{MetalLevel, RateArea};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// RawPlanRecord - 计划原始记录
// ==========================================
// 字段映射阶段的输出，所有字段可能缺失，由 DQ 校验决定是否可用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlanRecord {
    pub plan_id: Option<String>,
    pub state: Option<String>,
    pub metal_level: Option<MetalLevel>,
    pub rate: Option<Decimal>,
    pub rate_area: Option<u32>,

    // 元信息
    pub row_number: usize,
}

impl RawPlanRecord {
    /// 转换为计划实体（任一必填字段缺失时返回 None）
    pub fn into_plan(self) -> Option<PlanRecord> {
        Some(PlanRecord {
            plan_id: self.plan_id?,
            state: self.state?,
            metal_level: self.metal_level?,
            rate: self.rate?,
            rate_area: self.rate_area?,
        })
    }
}

// ==========================================
// PlanRecord - 计划实体
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: String,
    pub state: String,
    pub metal_level: MetalLevel,
    pub rate: Decimal,
    pub rate_area: u32,
}

impl PlanRecord {
    pub fn rate_area_key(&self) -> RateArea {
        RateArea::new(self.state.clone(), self.rate_area)
    }

    pub fn is_silver(&self) -> bool {
        matches!(self.metal_level, MetalLevel::Silver)
    }
}
