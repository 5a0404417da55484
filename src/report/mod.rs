//! Report assembly and multi-format rendering.
//!
//! A [`ReportContent`] is a value object assembled from the current result
//! collection at generation time and handed to exactly one renderer. Each
//! output format has its own [`ReportRenderer`] implementation behind the
//! [`create_renderer`] factory so the encoders stay independently testable.

pub mod csv;
pub mod excel;
pub mod history;
pub mod json;
pub mod pdf;

#[cfg(test)]
mod render_test;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::stats::{ResultFilter, Summary};
use crate::{AnalysisResult, DashboardError, DashboardResult};

/// Timestamp format used for the generated-at line and result rows
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which kind of report is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Summary,
    Detailed,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Summary => "Classification Summary Report",
            ReportKind::Detailed => "Detailed Analysis Report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Summary => "Summary",
            ReportKind::Detailed => "Detailed",
        };
        write!(f, "{}", name)
    }
}

/// Visualization toggles offered on the report configuration panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Visualizations {
    pub distribution: bool,
    pub time_series: bool,
    pub word_cloud: bool,
    pub geographic: bool,
}

impl Default for Visualizations {
    fn default() -> Self {
        Self {
            distribution: true,
            time_series: false,
            word_cloud: false,
            geographic: false,
        }
    }
}

impl Visualizations {
    /// Identifiers of the enabled visualizations, in panel order
    pub fn enabled(&self) -> Vec<String> {
        let all = [
            (self.distribution, "distribution"),
            (self.time_series, "timeSeries"),
            (self.word_cloud, "wordCloud"),
            (self.geographic, "geographic"),
        ];
        all.iter()
            .filter(|(on, _)| *on)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

/// User-chosen report configuration
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub kind: ReportKind,
    /// Free-text date range bounds; `None` renders as "All time"
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub confidence_threshold: f64,
    pub visualizations: Visualizations,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            kind: ReportKind::Summary,
            date_start: None,
            date_end: None,
            confidence_threshold: 70.0,
            visualizations: Visualizations::default(),
        }
    }
}

/// Free-text date range shown in report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Percent-distribution strings for the summary block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBlock {
    pub neutral: String,
    pub offensive: String,
    pub hate: String,
}

/// Summary block of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBlock {
    pub total_analyzed: u64,
    pub average_confidence: String,
    pub distribution: DistributionBlock,
}

/// One result row of a report; confidence is pre-formatted as a percentage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub text: String,
    pub classification: String,
    pub confidence: String,
    pub timestamp: String,
}

/// Snapshot document handed to a renderer.
///
/// Fully reconstructed for every generation; renderers must not retain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    pub title: String,
    pub generated_at: String,
    pub date_range: DateRange,
    pub confidence_threshold: String,
    pub summary: SummaryBlock,
    pub visualizations: Vec<String>,
    pub results: Vec<ReportRow>,
}

impl ReportContent {
    /// Assemble a report snapshot from the current state.
    ///
    /// The summary block reflects the whole collection; only the result rows
    /// are filtered by the confidence threshold.
    pub fn assemble(
        params: &ReportParams,
        results: &[AnalysisResult],
        summary: &Summary,
        generated_at: DateTime<Local>,
    ) -> Self {
        let rows = ResultFilter::confidence_at_least(params.confidence_threshold)
            .apply(results)
            .into_iter()
            .map(|result| ReportRow {
                text: result.text,
                classification: result.classification.to_string(),
                confidence: format!("{:.1}%", result.confidence),
                timestamp: result.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            })
            .collect();

        Self {
            title: params.kind.title().to_string(),
            generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            date_range: DateRange {
                start: params.date_start.clone().unwrap_or_else(|| "All time".to_string()),
                end: params.date_end.clone().unwrap_or_else(|| "All time".to_string()),
            },
            confidence_threshold: format!("{}%", params.confidence_threshold),
            summary: SummaryBlock {
                total_analyzed: summary.total as u64,
                average_confidence: format!("{:.1}%", summary.average_confidence),
                distribution: DistributionBlock {
                    neutral: format!("{:.1}%", summary.distribution.neutral),
                    offensive: format!("{:.1}%", summary.distribution.offensive),
                    hate: format!("{:.1}%", summary.distribution.hate),
                },
            },
            visualizations: params.visualizations.enabled(),
            results: rows,
        }
    }
}

/// Supported report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Csv,
    Json,
    Excel,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Pdf => "PDF",
            ReportFormat::Csv => "CSV",
            ReportFormat::Json => "JSON",
            ReportFormat::Excel => "Excel",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ReportFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(DashboardError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// One encoder, pure and side-effect free
pub trait ReportRenderer {
    /// Serialize the content into this format's byte encoding
    fn render(&self, content: &ReportContent) -> DashboardResult<Vec<u8>>;

    /// MIME type of the produced payload
    fn mime_type(&self) -> &'static str;

    /// Filename extension, without the dot
    fn extension(&self) -> &'static str;
}

/// Renderer factory
pub fn create_renderer(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Pdf => Box::new(pdf::PdfRenderer),
        ReportFormat::Csv => Box::new(csv::CsvRenderer),
        ReportFormat::Json => Box::new(json::JsonRenderer),
        ReportFormat::Excel => Box::new(excel::ExcelRenderer),
    }
}

/// A rendered report, ready for the caller to persist or offer for download
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

/// Render `content` into `format`, naming the artifact after `generated_on`
pub fn render_report(
    content: &ReportContent,
    format: ReportFormat,
    generated_on: NaiveDate,
) -> DashboardResult<ReportArtifact> {
    let renderer = create_renderer(format);
    let bytes = renderer.render(content)?;

    let filename = format!(
        "hate-speech-report-{}.{}",
        generated_on.format("%Y-%m-%d"),
        renderer.extension()
    );

    info!(
        "Rendered {} report {} ({} bytes)",
        format,
        filename,
        bytes.len()
    );

    Ok(ReportArtifact {
        bytes,
        mime_type: renderer.mime_type(),
        filename,
    })
}
