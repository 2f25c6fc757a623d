use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use witb_indexer::witb::IndexPipeline;
use witb_indexer::{env_bool, GoogleSheetsSource, PipelineConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("WITB_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Configuration problems stop the run before any client is built.
    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        sheet_id = %config.sheet_id,
        tabs = ?config.tabs,
        out_dir = %config.out_dir.display(),
        "Starting WITB index generation"
    );

    let source = match GoogleSheetsSource::new(config.sheet_id.clone(), config.fetch_timeout) {
        Ok(source) => match &config.base_url {
            Some(base_url) => source.with_base_url(base_url.as_str()),
            None => source,
        },
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match IndexPipeline::new(source, config).run().await {
        Ok(report) => {
            info!(
                entities = report.entities_written,
                duplicates = report.duplicates_dropped,
                failed_tabs = ?report.tabs_failed,
                stats_rows = report.stats.as_ref().map(|s| s.rows_written),
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Index generation failed");
            ExitCode::FAILURE
        }
    }
}
