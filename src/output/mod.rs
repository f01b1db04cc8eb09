//! Output module for harvested link records
//!
//! This module handles:
//! - The `source -> target` record format
//! - The shared, append-only output sink
//! - Run statistics reporting

mod file_sink;
pub mod stats;
mod traits;

pub use file_sink::FileSink;
pub use stats::{print_report, HarvestReport};
pub use traits::{OutputRecord, RecordSink, SinkError, SinkResult, HEADER};
