// ==========================================
// SLCSP 费率解析 - 导入层
// ==========================================
// 职责: 外部数据导入,生成只读数据集
// 支持: Excel, CSV, 内存行记录
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dataset_loader;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dataset_loader::DatasetLoaderImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, DatasetLoader, DqValidator, FieldMapper, FileParser};
