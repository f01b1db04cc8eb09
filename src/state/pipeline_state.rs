/// Pipeline state definitions for one seed's fetch/extract/write run
use std::fmt;

/// Represents the current state of a seed's pipeline instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    // ===== Active States =====
    /// The seed page is being requested
    Fetching,

    /// The fetched body is being scanned for links
    Extracting,

    /// Records are being appended to the shared sink
    Writing,

    // ===== Terminal States =====
    /// Records for this seed were written
    Done,

    /// The page had no recognizable links; nothing was written
    NoLinks,

    /// Fetch or sink write failed; the failure stayed inside this pipeline
    Failed,
}

impl PipelineState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::NoLinks | Self::Failed)
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Failed)
                | (Self::Extracting, Self::Writing)
                | (Self::Extracting, Self::NoLinks)
                | (Self::Writing, Self::Done)
                | (Self::Writing, Self::Failed)
        )
    }

    /// Short lowercase label used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::NoLinks => "no_links",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
