//! Common utilities for trawl.
//!
//! This crate provides shared infrastructure used by all trawl components:
//! - **Errors** - the input-contract and transport error taxonomy
//! - **Fetch** - the blocking HTTP collaborator and HTML document sniffing
//! - **Warning System** - colored, deduplicated terminal diagnostics

pub mod error;
pub mod net;
pub mod warning;

pub use error::{Error, Result, TransportError};
pub use net::{Fetch, FetchConfig, HttpFetcher};
pub use warning::{Diagnostic, Diagnostics};
