// ==========================================
// SLCSP 费率解析 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 精确十进制解析 / 费率区编号解析
// 红线: 不强制纠正坏数据（如货币符号、小数费率区），直接拒绝
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use rust_decimal::Decimal;
use std::str::FromStr;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value
            .map(|v| self.clean_text(&v))
            .filter(|v| !v.is_empty())
    }

    fn parse_decimal(&self, value: &str) -> Result<Decimal, String> {
        let trimmed = value.trim();
        // Decimal::from_str 接受 "1_000" 形式，此处只允许数字/符号/小数点
        if trimmed.is_empty()
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        {
            return Err(format!("无法解析为十进制数: {}", value));
        }
        Decimal::from_str(trimmed).map_err(|e| format!("无法解析为十进制数: {} ({})", value, e))
    }

    fn parse_rate_area(&self, value: &str) -> Result<u32, String> {
        let trimmed = value.trim();
        let parsed = trimmed
            .parse::<u32>()
            .map_err(|_| format!("无法解析为正整数: {}", value))?;
        if parsed == 0 {
            return Err("费率区编号必须为正整数: 0".to_string());
        }
        Ok(parsed)
    }
}

impl DataCleaner {
    /// 州代码: 恰好两个 ASCII 字母
    pub fn is_valid_state(&self, value: &str) -> bool {
        value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// ZIP 代码: 恰好五位 ASCII 数字
    pub fn is_valid_zipcode(&self, value: &str) -> bool {
        value.len() == 5 && value.chars().all(|c| c.is_ascii_digit())
    }
}
