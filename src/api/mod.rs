pub mod http;


use crate::config::AppConfig;
use crate::DashboardResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// One record from the backend's bulk results endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Tweet")]
    pub tweet: String,
    #[serde(rename = "Prediction")]
    pub prediction: String,
    #[serde(rename = "Score")]
    pub score: String,
}

/// Envelope returned by `GET /api/results`
#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<RawRecord>,
}

/// One element of the `analysis` array returned by `POST /api/analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalysis {
    pub label: String,
    pub score: String,
}

/// Envelope returned by `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub analysis: Vec<RawAnalysis>,
}

/// Client for the remote classification backend
#[async_trait]
pub trait ClassificationApi: Send + Sync {
    /// Fetch all classified records
    async fn fetch_results(&self) -> DashboardResult<Vec<RawRecord>>;

    /// Classify a single text; returns the first analysis element
    async fn analyze(&self, text: &str) -> DashboardResult<RawAnalysis>;

    /// Upload a CSV dataset for bulk classification
    async fn upload_dataset(&self, filename: &str, bytes: Vec<u8>) -> DashboardResult<()>;

    /// Clear the backend's result history
    async fn clear_results(&self) -> DashboardResult<()>;
}

/// Classification API factory
pub fn create_classification_api(
    config: &AppConfig,
) -> DashboardResult<Arc<dyn ClassificationApi>> {
    let api = http::HttpClassificationApi::new(
        config.backend_url(),
        Duration::from_secs(config.backend.timeout_secs),
    )?;
    Ok(Arc::new(api))
}
