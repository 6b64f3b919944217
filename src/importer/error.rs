// ==========================================
// SLCSP 费率解析 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 坏数据快速失败，错误信息必须指明数据集/行/字段
// ==========================================

use crate::domain::dataset::DatasetKind;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列 (数据集 {dataset}): {column}")]
    MissingColumn { dataset: DatasetKind, column: String },

    #[error("类型转换失败 (数据集 {dataset}, 行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        dataset: DatasetKind,
        row: usize,
        field: String,
        message: String,
    },

    // ===== 数据质量错误 =====
    #[error("数据质量校验未通过 (数据集 {dataset}): 共 {error_count} 处错误，首个错误 行 {row} 字段 {field}: {message}")]
    DataQualityError {
        dataset: DatasetKind,
        error_count: usize,
        row: usize,
        field: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
