//! Error taxonomy shared by every trawl crate.
//!
//! Only two things are errors here: a caller breaking the contract of a
//! public entry point, and a document that could not be fetched. Malformed
//! markup is never an error; the tokenizer degrades to partial output.

use thiserror::Error;

/// Why a document could not be retrieved.
///
/// Batch runs treat every variant as "document unavailable": the message is
/// reported and the document contributes no elements.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS lookup failed or the host refused the connection.
    #[error("{host} is not available, check your internet connection")]
    Unreachable {
        /// Host part of the requested URL.
        host: String,
    },

    /// The server certificate could not be verified.
    #[error("{message}, check the domain name of the website")]
    TlsVerification {
        /// Message reported by the TLS layer.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// The requested URL.
        url: String,
    },

    /// The server answered with a non-success status.
    #[error("HTTP error: {code}")]
    Status {
        /// Numeric HTTP status code.
        code: u16,
    },

    /// Only `http://` and `https://` URLs are fetched.
    #[error("unsupported URL scheme: {url}")]
    UnsupportedScheme {
        /// The rejected URL.
        url: String,
    },

    /// Anything the classifier does not recognise.
    #[error("Unknown error: {message}")]
    Other {
        /// Underlying error text.
        message: String,
    },
}

/// Top-level error type for trawl entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// A public entry point was called with bad or missing input
    /// (empty selector, no selectors, no links). Never retried.
    #[error("{0}")]
    InputContract(String),

    /// A document fetch failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Contract violation for a selector string that cannot be parsed.
    #[must_use]
    pub fn bad_selector(selector: &str, reason: &str) -> Self {
        Self::InputContract(format!("Bad selector: {selector:?} ({reason})"))
    }

    /// Returns true for caller-contract violations.
    #[must_use]
    pub const fn is_input_contract(&self) -> bool {
        matches!(self, Self::InputContract(_))
    }
}

/// Result alias used across trawl.
pub type Result<T, E = Error> = std::result::Result<T, E>;
