//! Harvest orchestration
//!
//! This module launches one pipeline per seed, all at once, and waits for
//! every one of them to finish:
//! - The output sink is created and its header written before any launch
//! - One HTTP client (connection pool) is shared by every pipeline
//! - A failing or panicking pipeline never cancels its siblings

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::pipeline::process_seed;
use crate::output::{FileSink, HarvestReport, RecordSink};
use crate::seeds::SeedUrl;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Runs pipelines for a set of seeds against one shared sink
pub struct Orchestrator<S> {
    client: Client,
    sink: Arc<S>,
}

impl<S: RecordSink + 'static> Orchestrator<S> {
    /// Creates an orchestrator from an already-initialized client and sink
    pub fn new(client: Client, sink: S) -> Self {
        Self {
            client,
            sink: Arc::new(sink),
        }
    }

    /// The shared sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Launches one pipeline per seed and waits for all of them
    ///
    /// There is no concurrency limit and no timeout on the wait; the only
    /// bound is the HTTP client's own pool and per-request timeouts.
    pub async fn run<I>(&self, seeds: I) -> HarvestReport
    where
        I: IntoIterator<Item = SeedUrl>,
    {
        let start_time = Instant::now();
        let mut report = HarvestReport::default();
        let mut tasks = JoinSet::new();

        for seed in seeds {
            let client = self.client.clone();
            let sink = Arc::clone(&self.sink);
            tasks.spawn(async move { process_seed(&seed, &client, sink.as_ref()).await });
            report.seeds += 1;
        }

        tracing::info!("Launched {} pipelines", report.seeds);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    tracing::error!("Pipeline task aborted: {}", e);
                    report.record_aborted();
                }
            }
        }

        report.elapsed = start_time.elapsed();
        report
    }
}

/// Runs a complete harvest
///
/// Pre-run failures (the output file cannot be created, the HTTP client
/// cannot be built) abort the run. Once pipelines are launched the run
/// always completes with `Ok`, even if every seed failed.
///
/// # Example
///
/// ```no_run
/// use link_harvest::config::load_config;
/// use link_harvest::crawler::run;
/// use link_harvest::seeds::read_seeds;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let seeds = read_seeds(&config.input.seeds_path)?;
/// let report = run(&config, seeds).await?;
/// println!("{} records written", report.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run<I>(config: &Config, seeds: I) -> crate::Result<HarvestReport>
where
    I: IntoIterator<Item = SeedUrl>,
{
    let sink = FileSink::create(&config.output.output_path).await?;
    let client = build_http_client(&config.http, &config.user_agent)?;

    let orchestrator = Orchestrator::new(client, sink);
    let report = orchestrator.run(seeds).await;

    tracing::info!(
        "Harvest completed: {} seeds, {} records written to {} in {:?} ({} failed)",
        report.seeds,
        report.records_written,
        orchestrator.sink().path().display(),
        report.elapsed,
        report.failures()
    );

    Ok(report)
}
