//! Output sink trait and record types

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// First line of every output file
pub const HEADER: &str = "source -> target";

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// One harvested link: the seed it was found on and its absolute target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// The seed URL as given in the input
    pub source: String,

    /// The resolved link target
    pub target: Url,
}

impl OutputRecord {
    pub fn new(source: impl Into<String>, target: Url) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Destination shared by every pipeline of a run
///
/// Implementations must append a whole batch as one contiguous block: no
/// other batch may land between the first and last line of `records`.
pub trait RecordSink: Send + Sync {
    /// Appends all records of one page, returning the number written
    fn append_batch(
        &self,
        records: &[OutputRecord],
    ) -> impl Future<Output = SinkResult<usize>> + Send;
}
