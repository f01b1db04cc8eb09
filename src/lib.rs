//! link-harvest: a concurrent one-hop link harvester
//!
//! This crate fetches a set of seed pages concurrently, scans each page for
//! `href` attributes, resolves them against the page URL and appends the
//! resulting `source -> target` pairs to one shared output file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod seeds;
pub mod state;

use thiserror::Error;

pub use output::SinkError;
pub use seeds::SeedError;

/// Main error type for link-harvest operations
///
/// Everything here except [`HarvestError::UrlResolution`] is a pre-run
/// failure: it aborts the run before any pipeline is launched.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed list error: {0}")]
    Seeds(#[from] SeedError),

    #[error("Output sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Cannot resolve '{reference}' against {base}: {source}")]
    UrlResolution {
        reference: String,
        base: String,
        source: ::url::ParseError,
    },
}

/// Classified failure of a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection refused, timeout or body read failure
    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    /// The server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Any other client failure (redirect loop, invalid request, decoding)
    #[error("Request failed for {url}: {source}")]
    Other { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. } | Self::HttpStatus { url, .. } | Self::Other { url, .. } => {
                url
            }
        }
    }

    /// Short label used in log lines and run summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Other { .. } => "other",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for link-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{extract_links, fetch_html, process_seed, run, HarvestReport, LinkSet};
pub use output::{FileSink, OutputRecord, RecordSink};
pub use seeds::{read_seeds, SeedUrl};
pub use state::PipelineState;
