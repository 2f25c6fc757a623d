//! Index generation pipeline.
//!
//! This module provides the [`IndexPipeline`] coordinator that runs one
//! refresh of the published index:
//! - Concurrent tab fetches via [`TabFetchExecutor`], merged in configured order
//! - Per-tab decode → gate → build, folded into a single [`TabBuild`]
//! - First-wins deduplication and an atomic write of the index file
//! - An independent stats pass that never fails the run
//!
//! Per-tab problems are logged and skipped. Only a failure to write the
//! index itself is returned as an error.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::executor::{TabFetch, TabFetchExecutor};
use crate::traits::TabSource;
use crate::witb::dedup::dedup_first_wins;
use crate::witb::record::{build_tab, TabBuild};
use crate::witb::rows::parse_tab_csv;
use crate::witb::stats::aggregate_stats;
use crate::witb::write::{write_json_atomic, WriteError};

// ============================================================================
// Pipeline Types
// ============================================================================

/// Summary of one pipeline run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    /// Tabs fetched and decoded successfully
    pub tabs_ok: usize,

    /// Tabs skipped because fetch or decode failed
    pub tabs_failed: Vec<String>,

    /// Rows read across all decoded tabs, before the verified gate
    pub rows_seen: usize,

    /// Rows that passed the verified gate
    pub rows_verified: usize,

    /// Entities dropped as duplicate ids
    pub duplicates_dropped: usize,

    /// Entities in the written index
    pub entities_written: usize,

    pub index_path: PathBuf,

    /// Entities without a player id (indexed, not player-linked)
    pub orphan_entities: usize,

    /// `None` when the stats tab was unavailable or had no rows
    pub stats: Option<StatsReport>,

    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub rows_written: usize,
    pub path: PathBuf,
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Errors that abort a run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The main index could not be written
    #[error("Failed to write index: {0}")]
    IndexWrite(#[source] WriteError),
}

// ============================================================================
// Pipeline Executor
// ============================================================================

pub struct IndexPipeline<S>
where
    S: TabSource + 'static,
{
    source: Arc<S>,
    executor: TabFetchExecutor,
    config: PipelineConfig,
}

impl<S> IndexPipeline<S>
where
    S: TabSource + 'static,
{
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            executor: TabFetchExecutor::new(config.fetch_concurrency),
            config,
        }
    }

    /// Runs one full refresh: index first, then stats.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let start = Instant::now();
        let mut report = RunReport {
            index_path: self.config.index_path(),
            ..RunReport::default()
        };

        // ====================================================================
        // Stage 1: Fetch, decode and build every index tab
        // ====================================================================

        let fetches = self
            .executor
            .fetch_all(Arc::clone(&self.source), &self.config.tabs)
            .await;
        let built = self.build_tabs(fetches, &mut report);

        info!(
            rows_seen = built.rows_seen,
            rows_verified = built.rows_verified,
            "Rows: {} (before verified) -> {} (after verified)",
            built.rows_seen,
            built.rows_verified
        );
        report.rows_seen = built.rows_seen;
        report.rows_verified = built.rows_verified;

        // ====================================================================
        // Stage 2: Deduplicate and write the index
        // ====================================================================

        let deduped = dedup_first_wins(built.entities);
        debug!(dropped = deduped.dropped, "Dropped duplicate ids");
        report.duplicates_dropped = deduped.dropped;

        write_json_atomic(&report.index_path, &deduped.entities)
            .map_err(PipelineError::IndexWrite)?;
        report.entities_written = deduped.entities.len();
        report.orphan_entities = deduped
            .entities
            .iter()
            .filter(|e| e.fields().player.is_orphan())
            .count();
        info!(
            entities = report.entities_written,
            orphans = report.orphan_entities,
            path = %report.index_path.display(),
            "Generated index"
        );

        // ====================================================================
        // Stage 3: Player stats (never fails the run)
        // ====================================================================

        report.stats = self.run_stats().await;

        report.total_duration_ms = start.elapsed().as_millis() as u64;
        info!(
            duration_ms = report.total_duration_ms,
            tabs_ok = report.tabs_ok,
            tabs_failed = report.tabs_failed.len(),
            "Run completed"
        );
        Ok(report)
    }

    /// Folds fetched tabs into one build in configured order.
    fn build_tabs(&self, fetches: Vec<TabFetch>, report: &mut RunReport) -> TabBuild {
        let mut header_keys_logged = false;
        let mut built = TabBuild::default();

        for TabFetch { tab, result } in fetches {
            let text = match result {
                Ok(text) => text,
                Err(e) => {
                    warn!(tab = %tab, error = %e, "Fetch failed, skipping tab");
                    report.tabs_failed.push(tab);
                    continue;
                }
            };
            let rows = match parse_tab_csv(&text) {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(tab = %tab, error = %e, "Failed to parse CSV, skipping tab");
                    report.tabs_failed.push(tab);
                    continue;
                }
            };
            info!(tab = %tab, rows = rows.len(), "Fetched rows");

            if let Some(first) = rows.first().filter(|_| !header_keys_logged) {
                let keys: Vec<&str> = first.headers().collect();
                info!(tab = %tab, ?keys, "Header keys");
                header_keys_logged = true;
            }

            report.tabs_ok += 1;
            built = built.merge(build_tab(&tab, &rows));
        }
        built
    }

    async fn run_stats(&self) -> Option<StatsReport> {
        let tab = &self.config.stats_tab;

        let text = match self.source.fetch_tab(tab).await {
            Ok(text) => text,
            Err(e) => {
                warn!(tab = %tab, error = %e, "Stats tab not found or fetch failed, skipping stats output");
                return None;
            }
        };
        let rows = match parse_tab_csv(&text) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(tab = %tab, error = %e, "Failed to parse stats CSV, skipping stats output");
                return None;
            }
        };

        if rows.is_empty() {
            info!(tab = %tab, "Stats tab has no rows, skipping stats output");
            return None;
        }

        // Rows were read, so the file is rewritten even if no row has a player id.
        let stats = aggregate_stats(&rows);

        let path = self.config.stats_path();
        if let Err(e) = write_json_atomic(&path, &stats) {
            warn!(path = %path.display(), error = %e, "Failed to write stats");
            return None;
        }
        let rows_written = stats.total_rows();
        info!(rows = rows_written, path = %path.display(), "Generated player stats");
        Some(StatsReport { rows_written, path })
    }
}

// ============================================================================
// Tests
// ============================================================================
