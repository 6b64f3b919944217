// ==========================================
// SLCSP 费率解析 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 行号: 源文件中的数据行号（表头不计），跳过空行后保持不变
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawRow, RawTable};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 按表头组装一行；短行补空值，全空行返回 None
fn build_row<'a, I>(headers: &[String], cells: I, row_number: usize) -> Option<RawRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells = cells.into_iter();
    let values: HashMap<String, String> = headers
        .iter()
        .map(|header| {
            let value = cells.next().unwrap_or("").trim().to_string();
            (header.clone(), value)
        })
        .collect();

    if values.values().all(|v| v.is_empty()) {
        return None;
    }

    Some(RawRow { row_number, values })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析 CSV（首行为表头）
    pub fn parse_reader<R: Read>(&self, source: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(source);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;

            // 行号 = 源文件行号 - 表头行
            let row_number = record
                .position()
                .map(|pos| (pos.line() as usize).saturating_sub(1))
                .unwrap_or(idx + 1);

            if let Some(row) = build_row(&headers, record.iter(), row_number) {
                rows.push(row);
            }
        }

        Ok(RawTable { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 数值单元格按 Display 渲染: 3.0 → "3", 64148.0 → "64148"
        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            let cells: Vec<String> = data_row.iter().map(|cell| cell.to_string()).collect();
            if let Some(row) = build_row(&headers, cells.iter().map(String::as_str), idx + 1) {
                rows.push(row);
            }
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawTable> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn value<'a>(row: &'a RawRow, key: &str) -> Option<&'a str> {
        row.values.get(key).map(String::as_str)
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["zipcode,state,rate_area", "64148,MO,3", "67118,KS,6"]);

        let table = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(table.headers, ["zipcode", "state", "rate_area"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(value(&table.rows[0], "zipcode"), Some("64148"));
        assert_eq!(value(&table.rows[1], "state"), Some("KS"));
        assert_eq!(table.rows[1].row_number, 2);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_keeps_row_numbers() {
        let temp_file = csv_file(&["zipcode,rate", "64148,", ",", " , ", "67118,"]);

        let table = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].row_number, 1);
        assert_eq!(value(&table.rows[1], "zipcode"), Some("67118"));
        assert_eq!(table.rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_parser_strips_bom_and_whitespace() {
        let data = "\u{feff} zipcode , rate\n 64148 , \n";
        let table = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(value(&table.rows[0], "zipcode"), Some("64148"));
        assert_eq!(value(&table.rows[0], "rate"), Some(""));
    }

    #[test]
    fn test_csv_parser_pads_short_rows() {
        let data = "zipcode,rate\n64148\n";
        let table = CsvParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values.len(), 2);
        assert_eq!(value(&table.rows[0], "rate"), Some(""));
    }

    #[test]
    fn test_csv_parser_header_only_keeps_headers() {
        let table = CsvParser.parse_reader("zipcode,state\n".as_bytes()).unwrap();

        assert!(table.rows.is_empty());
        assert_eq!(table.headers, ["zipcode", "state"]);
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let table = ExcelParser
            .parse_to_raw_records(&fixture("zips.xlsx"))
            .unwrap();

        assert_eq!(table.headers, ["zipcode", "state", "county_code", "name", "rate_area"]);
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.row_number, 1);
        assert_eq!(value(first, "zipcode"), Some("64148"));
        assert_eq!(value(first, "rate_area"), Some("3"));
        assert_eq!(value(first, "name"), Some("Jackson"));

        // 第 2 行为空行，被跳过
        assert_eq!(table.rows[1].row_number, 3);
        assert_eq!(value(&table.rows[1], "zipcode"), Some("07055"));
    }

    #[test]
    fn test_universal_parser_dispatches_xlsx() {
        let table = UniversalFileParser
            .parse_to_raw_records(&fixture("plans.xlsx"))
            .unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(value(&table.rows[0], "rate"), Some("245.2"));
        assert_eq!(value(&table.rows[1], "rate"), Some("260"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
