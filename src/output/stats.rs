//! Run statistics
//!
//! Tallies the terminal outcome of every pipeline in a run.

use crate::crawler::PipelineOutcome;
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate result of one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Number of seed pipelines launched
    pub seeds: usize,

    /// Pipelines that wrote at least one record
    pub pages_written: usize,

    /// Pipelines whose page had no links
    pub pages_without_links: usize,

    /// Pipelines that ended on a fetch error
    pub fetch_failures: usize,

    /// Fetch failures grouped by classification
    pub fetch_failures_by_kind: BTreeMap<&'static str, usize>,

    /// Pipelines whose batch could not be written
    pub sink_failures: usize,

    /// Pipeline tasks that panicked or were aborted
    pub aborted: usize,

    /// Total `source -> target` records appended
    pub records_written: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl HarvestReport {
    /// Folds one pipeline outcome into the report
    pub fn record(&mut self, outcome: &PipelineOutcome) {
        match outcome {
            PipelineOutcome::Written { records } => {
                self.pages_written += 1;
                self.records_written += records;
            }
            PipelineOutcome::NoLinks => self.pages_without_links += 1,
            PipelineOutcome::FetchFailed { kind } => {
                self.fetch_failures += 1;
                *self.fetch_failures_by_kind.entry(*kind).or_insert(0) += 1;
            }
            PipelineOutcome::SinkFailed => self.sink_failures += 1,
        }
    }

    /// Counts a pipeline task that never reported an outcome
    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Number of pipelines that reached a terminal state, aborted ones included
    pub fn completed(&self) -> usize {
        self.pages_written
            + self.pages_without_links
            + self.fetch_failures
            + self.sink_failures
            + self.aborted
    }

    /// Number of pipelines that ended in a contained failure
    pub fn failures(&self) -> usize {
        self.fetch_failures + self.sink_failures + self.aborted
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &HarvestReport) {
    println!("=== Harvest Summary ===\n");

    println!("Overview:");
    println!("  Seeds: {}", report.seeds);
    println!("  Records written: {}", report.records_written);
    println!("  Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    println!("Pages by Outcome:");
    println!("  written: {}", report.pages_written);
    println!("  no_links: {}", report.pages_without_links);
    println!("  fetch_failed: {}", report.fetch_failures);
    println!("  sink_failed: {}", report.sink_failures);
    if report.aborted > 0 {
        println!("  aborted: {}", report.aborted);
    }
    println!();

    if !report.fetch_failures_by_kind.is_empty() {
        println!("Fetch Errors:");
        for (kind, count) in &report.fetch_failures_by_kind {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    let success_rate = if report.seeds > 0 {
        (report.pages_written + report.pages_without_links) as f64 / report.seeds as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} seeds fetched)",
        success_rate,
        report.pages_written + report.pages_without_links,
        report.seeds
    );
}
