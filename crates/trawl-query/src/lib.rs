//! High-level query API for trawl.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Queries** - tokenize a document, parse a selector and
//!   filter the extracted elements in one call
//! - **Projection** - reduce matched elements to inner texts or attribute
//!   values
//! - **Batch Scraping** - named selectors over a list of links, fetched
//!   through the [`Fetch`](trawl_common::Fetch) seam
//!
//! # Not Implemented
//!
//! - Concurrent fetching. Links are visited one after another.
//! - Caching of fetched documents between runs.

pub mod batch;
pub mod projection;

pub use trawl_common as common;
pub use trawl_html as html;
pub use trawl_selector as selector;

pub use batch::{BatchReport, Scraper, render_elapsed};
pub use projection::{Projection, VALUE_KEYWORD, project_attribute};

use trawl_common::Result;
use trawl_html::{Element, ExtractMode, extract};
use trawl_selector::{parse_selector, query_elements};

/// Extract the elements of `html` that match `selector`, in document order.
///
/// # Errors
///
/// Returns an input-contract error when `selector` does not parse. Markup
/// problems are never errors.
///
/// ```
/// let html = "<div id=\"outer\"><div class=\"inner\">deep</div></div>";
/// let found = trawl_query::query_document(html, "div#outer > div.inner").unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].inner_text(), "deep");
/// ```
pub fn query_document(html: &str, selector: &str) -> Result<Vec<Element>> {
    query_document_with(html, selector, ExtractMode::Shallow)
}

/// [`query_document`] with an explicit extraction mode for the top level.
///
/// # Errors
///
/// Returns an input-contract error when `selector` does not parse.
pub fn query_document_with(html: &str, selector: &str, mode: ExtractMode) -> Result<Vec<Element>> {
    let selector = parse_selector(selector)?;
    Ok(query_elements(&extract(html, mode), &selector))
}
