// ==========================================
// SLCSP 费率解析 - 报告输出
// ==========================================
// CSV: 表头 zipcode,rate + 每个目标 ZIP 一行（无法确定时 rate 为空）
// JSON: results + summary（附带 outcome）
// ==========================================

use crate::domain::slcsp::{RunSummary, SlcspOutcome, SlcspReport};
use crate::report::error::{ReportError, ReportResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

// ==========================================
// OutputFormat - 输出格式
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ==========================================
// JSON 输出结构
// ==========================================
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run_id: Option<&'a str>,
    results: Vec<JsonRow<'a>>,
    summary: &'a RunSummary,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    zipcode: &'a str,
    rate: Option<String>,
    outcome: &'a SlcspOutcome,
}

// ==========================================
// ReportWriter - 报告输出器
// ==========================================
#[derive(Debug, Clone)]
pub struct ReportWriter {
    format: OutputFormat,
    include_header: bool,
    run_id: Option<String>,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(OutputFormat::Csv)
    }
}

impl ReportWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            include_header: true,
            run_id: None,
        }
    }

    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// 写入任意输出流
    pub fn write<W: Write>(&self, report: &SlcspReport, out: W) -> ReportResult<()> {
        match self.format {
            OutputFormat::Csv => self.write_csv(report, out),
            OutputFormat::Json => self.write_json(report, out),
        }
    }

    /// 写入文件；path 为 None 时写入 stdout
    pub fn write_to(&self, report: &SlcspReport, path: Option<&Path>) -> ReportResult<()> {
        match path {
            Some(p) => {
                let file = File::create(p)?;
                let mut out = BufWriter::new(file);
                self.write(report, &mut out)?;
                out.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                self.write(report, &mut out)?;
                out.flush()?;
            }
        }
        Ok(())
    }

    /// 渲染为字符串（测试与嵌入使用）
    pub fn render(&self, report: &SlcspReport) -> ReportResult<String> {
        let mut buf = Vec::new();
        self.write(report, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| ReportError::WriteError(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    fn write_csv<W: Write>(&self, report: &SlcspReport, out: W) -> ReportResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);

        if self.include_header {
            writer.write_record(["zipcode", "rate"])?;
        }
        for result in &report.results {
            writer.write_record([result.zipcode.as_str(), result.rate_text().as_str()])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_json<W: Write>(&self, report: &SlcspReport, mut out: W) -> ReportResult<()> {
        let payload = JsonReport {
            generated_at: Utc::now(),
            run_id: self.run_id.as_deref(),
            results: report
                .results
                .iter()
                .map(|r| JsonRow {
                    zipcode: &r.zipcode,
                    rate: r.rate.map(|_| r.rate_text()),
                    outcome: &r.outcome,
                })
                .collect(),
            summary: &report.summary,
        };

        serde_json::to_writer(&mut out, &payload)?;
        writeln!(out)?;
        Ok(())
    }
}
