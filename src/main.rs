use anyhow::Context;
use chrono::Local;
use std::str::FromStr;
use tracing::info;

use hatewatch::api::create_classification_api;
use hatewatch::config::AppConfig;
use hatewatch::formatters::format_number;
use hatewatch::report::history::ReportLog;
use hatewatch::report::{ReportFormat, ReportParams};
use hatewatch::stats::RiskLevel;
use hatewatch::store::AnalysisStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::init().context("loading configuration")?;
    info!("Using backend {}", config.backend_url());

    let api = create_classification_api(config)?;
    let store = AnalysisStore::new(api, config.upload.max_bytes);
    store.subscribe(|event| tracing::debug!("store event: {:?}", event));

    let total = store
        .fetch_results()
        .await
        .context("refreshing results from backend")?;

    let summary = store.summary();
    info!(
        "Analyzed {} texts, average confidence {:.1}%",
        format_number(total as u64),
        summary.average_confidence
    );
    info!(
        "Distribution: neutral {:.1}%, offensive {:.1}%, hate {:.1}%",
        summary.distribution.neutral, summary.distribution.offensive, summary.distribution.hate
    );
    info!(
        "Risk level: {}",
        RiskLevel::from_distribution(&summary.distribution)
    );

    for point in store.trend() {
        info!(
            "  {:02}:00  neutral {:.0}%  offensive {:.0}%  hate {:.0}%",
            point.hour, point.neutral, point.offensive, point.hate
        );
    }

    // An optional format argument turns the run into a report export
    if let Some(format_arg) = std::env::args().nth(1) {
        let format = ReportFormat::from_str(&format_arg)?;
        let params = ReportParams::default();

        let artifact = store.generate_report(&params, format)?;
        std::fs::write(&artifact.filename, &artifact.bytes)
            .with_context(|| format!("writing {}", artifact.filename))?;

        let mut report_log = ReportLog::new();
        report_log.record(
            params.kind.title(),
            params.kind,
            format,
            artifact.bytes.len(),
            Local::now().date_naive(),
        );
        let record = &report_log.entries()[0];
        info!(
            "Wrote {} ({}, {})",
            artifact.filename,
            artifact.mime_type,
            record.size_display()
        );
    }

    Ok(())
}
