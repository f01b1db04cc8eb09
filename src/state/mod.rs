//! Pipeline state tracking
//!
//! Each seed URL moves through one pipeline instance:
//!
//! ```text
//! Fetching -> Extracting -> Writing -> Done
//!     |           |            |
//!     v           v            v
//!   Failed     NoLinks       Failed
//! ```
//!
//! `Done`, `NoLinks` and `Failed` are terminal.

mod pipeline_state;

pub use pipeline_state::PipelineState;
