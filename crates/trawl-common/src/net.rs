//! HTTP fetch collaborator for trawl.
//!
//! Provides the [`Fetch`] seam the batch runner talks to, a blocking
//! `reqwest` implementation of it, and the HTML document sniffing used to
//! decide whether a response is worth tokenizing.
use std::error::Error as StdError;
use std::time::Duration;

use crate::error::TransportError;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Markers every HTML document must contain besides the doctype.
const HTML_MARKERS: [&str; 6] = ["<html", "<head", "</head>", "<body", "</body>", "</html>"];

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Retrieves the raw text of a document.
///
/// The batch runner only ever talks to this trait, so tests can swap in an
/// in-memory implementation.
pub trait Fetch {
    /// Fetch `url` and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing why the document is
    /// unavailable.
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

/// Blocking HTTP fetcher backed by a single reusable `reqwest` client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] if the HTTP client cannot be created.
    pub fn new(config: &FetchConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Other {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        check_scheme(url)?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .map_err(|e| classify_transport_error(url, &e))?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                code: response.status().as_u16(),
            });
        }

        response
            .text()
            .map_err(|e| classify_transport_error(url, &e))
    }
}

/// Reject anything that is not an `http://` or `https://` URL.
///
/// # Errors
///
/// Returns [`TransportError::UnsupportedScheme`] for other URLs.
pub fn check_scheme(url: &str) -> Result<(), TransportError> {
    let lowered = url.trim_start().to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Ok(())
    } else {
        Err(TransportError::UnsupportedScheme {
            url: url.to_string(),
        })
    }
}

/// Map a `reqwest` failure onto the transport taxonomy.
#[must_use]
pub fn classify_transport_error(url: &str, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout {
            url: url.to_string(),
        };
    }

    if chain_mentions(error, "certificate") {
        return TransportError::TlsVerification {
            message: root_message(error),
        };
    }

    if error.is_connect() {
        return TransportError::Unreachable { host: host_of(url) };
    }

    TransportError::Other {
        message: error.to_string(),
    }
}

/// Host part of `url`, or the URL itself when it does not parse.
#[must_use]
pub fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Check whether `text` looks like a complete HTML document: a doctype
/// followed by `<html>`, `<head>`/`</head>`, `<body>`/`</body>` and
/// `</html>`. Comparison is ASCII case-insensitive and leading whitespace
/// (or a byte-order mark) is ignored.
#[must_use]
pub fn is_html_document(text: &str) -> bool {
    let lowered = text
        .trim_start_matches('\u{feff}')
        .trim_start()
        .to_ascii_lowercase();

    lowered.starts_with("<!doctype html")
        && HTML_MARKERS.iter().all(|marker| lowered.contains(marker))
}

fn chain_mentions(error: &(dyn StdError + 'static), needle: &str) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if err.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Message of the innermost error in the source chain.
fn root_message(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
