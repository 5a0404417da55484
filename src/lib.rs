#[cfg(test)]
extern crate mockall;

pub mod api;
pub mod config;
pub mod formatters;
pub mod normalize;
pub mod report;
pub mod stats;
pub mod store;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Three-way classification assigned to an analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Neutral,
    Offensive,
    Hate,
}

impl Classification {
    /// All classes, in display order
    pub const ALL: [Classification; 3] = [
        Classification::Neutral,
        Classification::Offensive,
        Classification::Hate,
    ];

    /// Lowercase key used in count maps and JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            Classification::Neutral => "neutral",
            Classification::Offensive => "offensive",
            Classification::Hate => "hate",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Neutral => "Neutral",
            Classification::Offensive => "Offensive",
            Classification::Hate => "Hate",
        };
        write!(f, "{}", name)
    }
}

/// One classified text with its model confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique identifier, generated client-side
    pub id: Uuid,
    /// Original input text
    pub text: String,
    /// Assigned classification
    pub classification: Classification,
    /// Model confidence as a 0-100 percentage
    pub confidence: f64,
    /// When the result was normalized (the backend supplies no timestamps)
    pub timestamp: DateTime<Local>,
}

impl AnalysisResult {
    pub fn new(text: String, classification: Classification, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            classification,
            confidence,
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisResult {{ id: {}, text: {}, classification: {}, confidence: {:.1}% }}",
            self.id,
            if self.text.chars().count() > 30 {
                format!("{}...", self.text.chars().take(30).collect::<String>())
            } else {
                self.text.clone()
            },
            self.classification,
            self.confidence
        )
    }
}

/// Processing state of an uploaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Completed,
    Processing,
    Error,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadStatus::Completed => "completed",
            UploadStatus::Processing => "processing",
            UploadStatus::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// One entry in the upload/analysis history.
///
/// A `File` entry tracks a bulk CSV upload; its results live in the main
/// result collection, never on the entry itself. A `Text` entry always
/// carries the single result it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    File {
        id: Uuid,
        filename: String,
        uploaded_at: DateTime<Local>,
        status: UploadStatus,
    },
    Text {
        id: Uuid,
        analyzed_at: DateTime<Local>,
        result: AnalysisResult,
    },
}

impl HistoryEntry {
    pub fn id(&self) -> Uuid {
        match self {
            HistoryEntry::File { id, .. } => *id,
            HistoryEntry::Text { id, .. } => *id,
        }
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Normalization error: {0}")]
    NormalizationError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for the application
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_display_and_key() {
        assert_eq!(Classification::Neutral.to_string(), "Neutral");
        assert_eq!(Classification::Offensive.to_string(), "Offensive");
        assert_eq!(Classification::Hate.to_string(), "Hate");
        assert_eq!(Classification::Hate.key(), "hate");
    }

    #[test]
    fn result_display_truncates_long_text() {
        let result = AnalysisResult::new(
            "a very long piece of text that goes on well past thirty characters".to_string(),
            Classification::Neutral,
            92.0,
        );
        let rendered = result.to_string();
        assert!(rendered.contains("..."));
        assert!(rendered.contains("Neutral"));
    }

    #[test]
    fn history_entry_serializes_with_type_tag() {
        let entry = HistoryEntry::File {
            id: Uuid::new_v4(),
            filename: "batch.csv".to_string(),
            uploaded_at: Local::now(),
            status: UploadStatus::Processing,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["status"], "processing");

        let entry = HistoryEntry::Text {
            id: Uuid::new_v4(),
            analyzed_at: Local::now(),
            result: AnalysisResult::new("hello".to_string(), Classification::Neutral, 99.0),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["result"]["classification"], "Neutral");
    }
}
