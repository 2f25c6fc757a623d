//! WITB module - spreadsheet to search index pipeline.
//!
//! This module provides the stages of one index refresh:
//! - **Rows**: CSV decoding and loosely-keyed field lookup ([`RawRow`], [`get_field`])
//! - **Parsers**: wedge spec and shaft micro-grammars ([`parse_spec`], [`parse_shaft`])
//! - **Records**: verified gate, entity building and search text ([`build_tab`])
//! - **Dedup / Stats**: first-wins deduplication and the per-player stats index
//! - **Pipeline**: async driver via [`pipeline::IndexPipeline`]

pub mod dedup;
pub mod fields;
pub mod pipeline;
pub mod record;
pub mod rows;
pub mod search;
pub mod shaft;
pub mod spec;
pub mod stats;
pub mod write;

// Re-export commonly used types
pub use dedup::{dedup_first_wins, DedupOutcome};
pub use fields::{get_field, normalize_header, RawRow};
pub use record::{build_entity, build_tab, category_from_tab, is_verified, TabBuild};
pub use rows::parse_tab_csv;
pub use search::build_search_text;
pub use shaft::{parse_shaft, ShaftToken};
pub use spec::parse_spec;
pub use stats::aggregate_stats;
pub use write::{write_json_atomic, WriteError};

pub use pipeline::{IndexPipeline, PipelineError, RunReport, StatsReport};
