//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the shared HTTP client with a descriptive user agent
//! - GET requests for seed pages (redirects followed by the client)
//! - Error classification (network / HTTP status / other)
//!
//! There are no retries: every seed is requested exactly once.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::{FetchError, FetchResult};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Builds the HTTP client shared by every pipeline of a run
///
/// `reqwest::Client` keeps its connection pool behind an `Arc`, so clones are
/// cheap and safe to hand to concurrent tasks.
///
/// # Example
///
/// ```no_run
/// use link_harvest::config::{HttpConfig, UserAgentConfig};
/// use link_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    http: &HttpConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx after redirects | `Ok(body)` |
/// | any other final status | `FetchError::HttpStatus` |
/// | DNS, connect, timeout, body read | `FetchError::Network` |
/// | redirect limit, bad request, decode | `FetchError::Other` |
pub async fn fetch_html(client: &Client, url: &Url) -> FetchResult<String> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if response.url() != url {
        tracing::debug!("{} redirected to {}", url, response.url());
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

/// Sorts a client error into the fetch error taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    let transport = error.is_timeout()
        || error.is_connect()
        || error.is_body()
        || (error.is_request() && has_transport_source(&error));

    if transport {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Other {
            url: url.to_string(),
            source: error,
        }
    }
}

/// True if the error chain contains a hyper or I/O error
///
/// A peer that closes the connection before answering surfaces as a
/// request error wrapping `hyper::Error(IncompleteMessage)`.
fn has_transport_source(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if cause.is::<hyper::Error>() || cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}
