// ==========================================
// SLCSP 费率解析 - API层错误类型
// ==========================================
// 职责: 汇总导入/配置/输出错误，转换为用户可读的错误消息
// 红线: 错误信息必须包含显式原因（数据集/行/字段）
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use crate::report::error::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 上游层错误
    // ==========================================
    #[error("数据导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("结果输出失败: {0}")]
    OutputError(#[from] ReportError),
}

impl ApiError {
    /// 是否为输入数据问题（而非环境/输出问题）
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ApiError::ImportError(
                ImportError::MissingColumn { .. }
                    | ImportError::TypeConversionError { .. }
                    | ImportError::DataQualityError { .. }
            )
        )
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
