//! Seed list loading
//!
//! Seeds come from a newline-delimited text file. Each line is trimmed;
//! blank lines and `#` comments are ignored and duplicates collapse, so a
//! seed is fetched at most once per run.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors raised while loading seeds
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed URL '{raw}': {reason}")]
    Invalid { raw: String, reason: String },
}

/// An absolute http(s) URL supplied as crawl input
///
/// Keeps the input text verbatim; it becomes the `source` column of every
/// output record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeedUrl {
    raw: String,
    url: Url,
}

impl SeedUrl {
    /// Parses one seed, rejecting relative URLs and non-HTTP schemes
    ///
    /// # Examples
    ///
    /// ```
    /// use link_harvest::SeedUrl;
    ///
    /// let seed = SeedUrl::parse("http://example.com").unwrap();
    /// assert_eq!(seed.as_str(), "http://example.com");
    /// assert_eq!(seed.url().as_str(), "http://example.com/");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SeedError> {
        let raw = raw.trim();
        let url = Url::parse(raw).map_err(|e| SeedError::Invalid {
            raw: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SeedError::Invalid {
                raw: raw.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if url.host_str().is_none() {
            return Err(SeedError::Invalid {
                raw: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// The seed exactly as it appeared in the input
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL, used for fetching and link resolution
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for SeedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Reads and parses the seed list at `path`
///
/// Only an unreadable file is an error; bad lines are logged and skipped.
pub fn read_seeds(path: &Path) -> Result<BTreeSet<SeedUrl>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let seeds = parse_seeds(&content);
    tracing::info!("Loaded {} seed URLs from {}", seeds.len(), path.display());
    Ok(seeds)
}

/// Parses seed list text into a de-duplicated set
pub fn parse_seeds(content: &str) -> BTreeSet<SeedUrl> {
    let mut seeds = BTreeSet::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match SeedUrl::parse(line) {
            Ok(seed) => {
                seeds.insert(seed);
            }
            Err(e) => {
                tracing::warn!("Skipping seed on line {}: {}", index + 1, e);
            }
        }
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_seed_keeps_raw_text() {
        let seed = SeedUrl::parse("  https://example.com/path?q=1  ").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/path?q=1");
        assert_eq!(seed.url().host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_seed_rejects_relative() {
        assert!(matches!(
            SeedUrl::parse("/just/a/path"),
            Err(SeedError::Invalid { .. })
        ));
    }

    #[test]
    fn test_parse_seed_rejects_other_schemes() {
        assert!(SeedUrl::parse("ftp://example.com/file").is_err());
        assert!(SeedUrl::parse("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_parse_seeds_trims_and_dedups() {
        let seeds = parse_seeds(
            "http://example.com\n  http://example.com  \nhttps://other.org/\n\n",
        );
        let raw: Vec<&str> = seeds.iter().map(SeedUrl::as_str).collect();
        assert_eq!(raw, vec!["http://example.com", "https://other.org/"]);
    }

    #[test]
    fn test_parse_seeds_skips_comments_and_invalid_lines() {
        let seeds = parse_seeds("# seeds\nnot a url\nhttps://example.com/a\r\n");
        assert_eq!(seeds.len(), 1);
        assert!(seeds.iter().any(|s| s.as_str() == "https://example.com/a"));
    }

    #[test]
    fn test_read_seeds_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com").unwrap();
        writeln!(file, "https://example.org").unwrap();
        file.flush().unwrap();

        let seeds = read_seeds(file.path()).unwrap();
        assert_eq!(seeds.len(), 2);
    }

    #[test]
    fn test_read_seeds_missing_file() {
        let result = read_seeds(Path::new("/nonexistent/urls.txt"));
        assert!(matches!(result, Err(SeedError::Io { .. })));
    }
}
