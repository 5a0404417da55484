use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::api::{AnalyzeResponse, ClassificationApi, RawAnalysis, RawRecord, ResultsResponse};
use crate::{DashboardError, DashboardResult};

/// HTTP client for the classification backend
pub struct HttpClassificationApi {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    tweet: String,
}

impl HttpClassificationApi {
    /// Create a new backend client
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DashboardError::ConfigError(format!("Invalid backend URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::HttpError(format!("Failed to build client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> DashboardResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DashboardError::ConfigError(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn check_status(response: reqwest::Response, context: &str) -> DashboardResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DashboardError::ApiError(format!(
                "{}: HTTP status {}, {}",
                context, status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl ClassificationApi for HttpClassificationApi {
    async fn fetch_results(&self) -> DashboardResult<Vec<RawRecord>> {
        let url = self.endpoint("/api/results")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::HttpError(format!("Failed to fetch results: {}", e)))?;

        let response = Self::check_status(response, "Fetch results failed").await?;

        let results: ResultsResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::ApiError(format!("Failed to parse results: {}", e)))?;

        if !results.success {
            return Err(DashboardError::ApiError(
                "Backend returned unsuccessful response".to_string(),
            ));
        }

        info!("Fetched {} records from backend", results.data.len());
        Ok(results.data)
    }

    async fn analyze(&self, text: &str) -> DashboardResult<RawAnalysis> {
        let url = self.endpoint("/api/analyze")?;

        let request = AnalyzeRequest {
            tweet: text.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DashboardError::HttpError(format!("Failed to analyze text: {}", e)))?;

        let response = Self::check_status(response, "Analyze failed").await?;

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::ApiError(format!("Failed to parse analysis: {}", e)))?;

        // The backend may return several candidates; the first one wins
        analysis
            .analysis
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::ApiError("Empty analysis response".to_string()))
    }

    async fn upload_dataset(&self, filename: &str, bytes: Vec<u8>) -> DashboardResult<()> {
        let url = self.endpoint("/api/upload-dataset")?;

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| DashboardError::UploadError(format!("Invalid upload part: {}", e)))?;

        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DashboardError::HttpError(format!("Failed to upload dataset: {}", e)))?;

        Self::check_status(response, "Upload failed").await?;

        info!("Uploaded dataset {}", filename);
        Ok(())
    }

    async fn clear_results(&self) -> DashboardResult<()> {
        let url = self.endpoint("/api/results")?;

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| DashboardError::HttpError(format!("Failed to clear results: {}", e)))?;

        Self::check_status(response, "Clear results failed").await?;

        info!("Cleared backend result history");
        Ok(())
    }
}
