//! Crawler module for fetching pages and harvesting their links
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with error classification
//! - Pattern-based link extraction and resolution
//! - The per-seed fetch/extract/write pipeline
//! - Concurrent orchestration of all pipelines

mod extractor;
mod fetcher;
mod orchestrator;
mod pipeline;

pub use extractor::{extract_links, resolve_reference, LinkSet};
pub use fetcher::{build_http_client, fetch_html};
pub use orchestrator::{run, Orchestrator};
pub use pipeline::{process_seed, PipelineOutcome};

pub use crate::output::HarvestReport;
