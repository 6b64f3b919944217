// ==========================================
// SLCSP 费率解析 - 报告输出错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报告写入失败: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("CSV 输出失败: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("不支持的输出格式: {0}（仅支持 csv/json）")]
    UnsupportedFormat(String),
}

pub type ReportResult<T> = Result<T, ReportError>;
