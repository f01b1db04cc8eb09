//! Per-seed pipeline: fetch, extract, write
//!
//! A pipeline never returns an error. Fetch and sink failures are logged and
//! folded into a [`PipelineOutcome`] so they cannot reach sibling pipelines
//! or the orchestrator.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::fetch_html;
use crate::output::{OutputRecord, RecordSink};
use crate::seeds::SeedUrl;
use crate::state::PipelineState;
use reqwest::Client;

/// Terminal report of one pipeline instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Links were found and appended to the sink
    Written { records: usize },

    /// The page was fetched but had no links
    NoLinks,

    /// The fetch failed; `kind` is the error classification
    FetchFailed { kind: &'static str },

    /// Links were found but the sink rejected the batch
    SinkFailed,
}

impl PipelineOutcome {
    /// The terminal state this outcome corresponds to
    pub fn state(&self) -> PipelineState {
        match self {
            Self::Written { .. } => PipelineState::Done,
            Self::NoLinks => PipelineState::NoLinks,
            Self::FetchFailed { .. } | Self::SinkFailed => PipelineState::Failed,
        }
    }
}

/// Tracks the state of one seed's pipeline
struct Pipeline<'a> {
    seed: &'a SeedUrl,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    fn new(seed: &'a SeedUrl) -> Self {
        Self {
            seed,
            state: PipelineState::Fetching,
        }
    }

    /// Moves to `next` if the transition is legal
    ///
    /// An illegal transition is logged and rejected; the state is unchanged.
    fn advance(&mut self, next: PipelineState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::error!(
                "{}: rejected transition {} -> {}",
                self.seed,
                self.state,
                next
            );
            return false;
        }
        tracing::debug!("{}: {} -> {}", self.seed, self.state, next);
        self.state = next;
        true
    }

    /// Moves to the terminal state matching `outcome` and returns it
    fn finish(mut self, outcome: PipelineOutcome) -> PipelineOutcome {
        self.advance(outcome.state());
        outcome
    }
}

/// Runs the full pipeline for one seed URL
///
/// 1. Fetch the seed page; on failure log and stop.
/// 2. Extract links using the seed as base URL; stop if there are none.
/// 3. Append one `seed -> target` record per link as a single batch.
pub async fn process_seed<S: RecordSink>(
    seed: &SeedUrl,
    client: &Client,
    sink: &S,
) -> PipelineOutcome {
    let mut pipeline = Pipeline::new(seed);

    let body = match fetch_html(client, seed.url()).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Error fetching {}: {}", seed, e);
            return pipeline.finish(PipelineOutcome::FetchFailed { kind: e.kind() });
        }
    };

    pipeline.advance(PipelineState::Extracting);
    let links = extract_links(&body, seed.url());
    tracing::info!("Found {} links for {}", links.len(), seed);

    if links.is_empty() {
        return pipeline.finish(PipelineOutcome::NoLinks);
    }

    pipeline.advance(PipelineState::Writing);
    let records: Vec<OutputRecord> = links
        .into_iter()
        .map(|target| OutputRecord::new(seed.as_str(), target))
        .collect();

    match sink.append_batch(&records).await {
        Ok(written) => {
            tracing::info!("Wrote {} links for {}", written, seed);
            pipeline.finish(PipelineOutcome::Written { records: written })
        }
        Err(e) => {
            tracing::error!("Error writing links for {}: {}", seed, e);
            pipeline.finish(PipelineOutcome::SinkFailed)
        }
    }
}
