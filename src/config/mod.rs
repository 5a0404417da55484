use crate::DashboardError;
use serde::Deserialize;
use std::sync::OnceLock;
use url::Url;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_PRODUCTION_URL: &str = "https://backend-hatespeech.onrender.com";

/// 50 MB, the upload cap enforced by the backend
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the local/self-hosted classification backend
    pub base_url: String,
    /// Base URL of the hosted backend, used when online mode is enabled
    pub production_url: String,
    /// Route requests to the hosted backend instead of the local one
    pub online_mode: bool,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted dataset size in bytes
    pub max_bytes: u64,
}

impl AppConfig {
    pub fn init() -> Result<&'static Self, DashboardError> {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let production_url = std::env::var("PRODUCTION_API_URL")
            .unwrap_or_else(|_| DEFAULT_PRODUCTION_URL.to_string());

        let online_mode = std::env::var("ONLINE_MODE")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| {
                DashboardError::ConfigError(format!("Invalid REQUEST_TIMEOUT_SECS: {}", e))
            })?;

        let max_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| {
                v.parse::<u64>().map_err(|e| {
                    DashboardError::ConfigError(format!("Invalid MAX_UPLOAD_BYTES: {}", e))
                })
            })
            .unwrap_or(Ok(DEFAULT_MAX_UPLOAD_BYTES))?;

        // Both URLs must parse even if only one is ever used
        for (name, value) in [("API_URL", &base_url), ("PRODUCTION_API_URL", &production_url)] {
            Url::parse(value).map_err(|e| {
                DashboardError::ConfigError(format!("Invalid {}: {}", name, e))
            })?;
        }

        let config = AppConfig {
            backend: BackendConfig {
                base_url,
                production_url,
                online_mode,
                timeout_secs,
            },
            upload: UploadConfig { max_bytes },
        };

        CONFIG.get_or_init(|| config);
        Ok(CONFIG.get().unwrap())
    }

    /// Get the application configuration
    pub fn get() -> Result<&'static Self, DashboardError> {
        CONFIG.get().ok_or_else(|| {
            DashboardError::ConfigError("Configuration not initialized".to_string())
        })
    }

    /// Backend base URL after applying the online-mode switch
    pub fn backend_url(&self) -> &str {
        if self.backend.online_mode {
            &self.backend.production_url
        } else {
            &self.backend.base_url
        }
    }
}
