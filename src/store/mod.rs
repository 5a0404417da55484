//! In-memory client state for the dashboard.
//!
//! The store is an explicit, injected object: callers construct it with the
//! API client it should talk to and subscribe for change notifications.
//! Results are immutable snapshots; every mutation replaces state wholesale
//! and recomputes the summary from scratch.


use chrono::Local;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ClassificationApi;
use crate::normalize;
use crate::report::{render_report, ReportArtifact, ReportContent, ReportFormat, ReportParams};
use crate::stats::{aggregate, hourly_trend, ResultFilter, Summary, TrendPoint};
use crate::{AnalysisResult, DashboardError, DashboardResult, HistoryEntry, UploadStatus};

/// Notification emitted after every store mutation
#[derive(Debug, Clone)]
pub enum StoreEvent {
    ResultsRefreshed { total: usize },
    TextAnalyzed { id: Uuid },
    DatasetUploaded { filename: String },
    EntryRemoved { id: Uuid },
    HistoryCleared,
    ResultsCleared,
}

type Listener = Box<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Default)]
struct StoreState {
    results: Vec<AnalysisResult>,
    history: Vec<HistoryEntry>,
    summary: Summary,
}

/// Client-side store of analysis results and upload/analysis history
pub struct AnalysisStore {
    api: Arc<dyn ClassificationApi>,
    state: RwLock<StoreState>,
    listeners: Mutex<Vec<Listener>>,
    max_upload_bytes: u64,
}

impl AnalysisStore {
    pub fn new(api: Arc<dyn ClassificationApi>, max_upload_bytes: u64) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
            listeners: Mutex::new(Vec::new()),
            max_upload_bytes,
        }
    }

    /// Register a change listener; called synchronously after each mutation
    pub fn subscribe(&self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(Box::new(listener));
    }

    fn emit(&self, event: StoreEvent) {
        let listeners = self.listeners.lock().expect("listener lock poisoned");
        for listener in listeners.iter() {
            listener(&event);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().expect("state lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreState> {
        self.state.write().expect("state lock poisoned")
    }

    /// Replace the result collection with a fresh fetch from the backend.
    ///
    /// A record with an unknown label or bad score fails the whole refresh;
    /// the previous collection stays in place.
    pub async fn fetch_results(&self) -> DashboardResult<usize> {
        let records = self.api.fetch_results().await?;

        let results = records
            .iter()
            .map(normalize::from_record)
            .collect::<DashboardResult<Vec<_>>>()?;
        let total = results.len();

        {
            let mut state = self.write();
            state.summary = aggregate(&results);
            state.results = results;
        }

        info!("Refreshed {} results", total);
        self.emit(StoreEvent::ResultsRefreshed { total });
        Ok(total)
    }

    /// Classify one text and prepend the result and its history entry
    pub async fn analyze(&self, text: &str) -> DashboardResult<AnalysisResult> {
        let analysis = self.api.analyze(text).await?;
        let result = normalize::from_analysis(text, &analysis)?;

        {
            let mut state = self.write();
            state.results.insert(0, result.clone());
            state.summary = aggregate(&state.results);
            state.history.insert(
                0,
                HistoryEntry::Text {
                    id: Uuid::new_v4(),
                    analyzed_at: result.timestamp,
                    result: result.clone(),
                },
            );
        }

        self.emit(StoreEvent::TextAnalyzed { id: result.id });
        Ok(result)
    }

    /// Upload a CSV dataset, then refresh results from the backend.
    ///
    /// The history entry starts as `Processing` and is promoted to
    /// `Completed` once the post-upload refresh lands, or `Error` if it
    /// fails.
    pub async fn upload_dataset(&self, filename: &str, bytes: Vec<u8>) -> DashboardResult<()> {
        if bytes.len() as u64 > self.max_upload_bytes {
            return Err(DashboardError::UploadError(format!(
                "Dataset {} is {} bytes, over the {} byte limit",
                filename,
                bytes.len(),
                self.max_upload_bytes
            )));
        }

        self.api.upload_dataset(filename, bytes).await?;

        let entry_id = Uuid::new_v4();
        self.write().history.insert(
            0,
            HistoryEntry::File {
                id: entry_id,
                filename: filename.to_string(),
                uploaded_at: Local::now(),
                status: UploadStatus::Processing,
            },
        );
        self.emit(StoreEvent::DatasetUploaded {
            filename: filename.to_string(),
        });

        match self.fetch_results().await {
            Ok(_) => {
                self.set_upload_status(entry_id, UploadStatus::Completed);
                Ok(())
            }
            Err(e) => {
                warn!("Post-upload refresh failed: {}", e);
                self.set_upload_status(entry_id, UploadStatus::Error);
                Err(e)
            }
        }
    }

    fn set_upload_status(&self, entry_id: Uuid, new_status: UploadStatus) {
        let mut state = self.write();
        for entry in state.history.iter_mut() {
            if let HistoryEntry::File { id, status, .. } = entry {
                if *id == entry_id {
                    *status = new_status;
                }
            }
        }
    }

    /// Remove one history entry locally. The backend has no per-file
    /// deletion endpoint, so local and remote state may drift.
    pub fn remove_entry(&self, id: Uuid) -> bool {
        let removed = {
            let mut state = self.write();
            let before = state.history.len();
            state.history.retain(|entry| entry.id() != id);
            state.history.len() != before
        };

        if removed {
            self.emit(StoreEvent::EntryRemoved { id });
        }
        removed
    }

    /// Drop the local history list; results are untouched
    pub fn clear_history(&self) {
        self.write().history.clear();
        self.emit(StoreEvent::HistoryCleared);
    }

    /// Clear the backend's result history, then the local collection
    pub async fn clear_results(&self) -> DashboardResult<()> {
        self.api.clear_results().await?;

        {
            let mut state = self.write();
            state.results.clear();
            state.summary = Summary::default();
        }

        self.emit(StoreEvent::ResultsCleared);
        Ok(())
    }

    pub fn results(&self) -> Vec<AnalysisResult> {
        self.read().results.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.read().history.clone()
    }

    pub fn summary(&self) -> Summary {
        self.read().summary.clone()
    }

    /// Current hourly trend series, ending at this hour
    pub fn trend(&self) -> Vec<TrendPoint> {
        hourly_trend(&self.read().results, Local::now())
    }

    /// Results passing the given filter
    pub fn filtered(&self, filter: &ResultFilter) -> Vec<AnalysisResult> {
        filter.apply(&self.read().results)
    }

    /// Assemble and render a report from the current state
    pub fn generate_report(
        &self,
        params: &ReportParams,
        format: ReportFormat,
    ) -> DashboardResult<ReportArtifact> {
        let content = {
            let state = self.read();
            ReportContent::assemble(params, &state.results, &state.summary, Local::now())
        };

        render_report(&content, format, Local::now().date_naive())
    }
}
