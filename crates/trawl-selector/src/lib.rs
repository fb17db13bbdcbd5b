//! Selector parsing and matching for trawl.
//!
//! The language is a small subset of CSS: an optional tag name, `#id`,
//! `.class` qualifiers, one `[attr]` predicate and `>` child chains.
//!
//! ```
//! use trawl_html::extract_elements;
//! use trawl_selector::{parse_selector, query_elements};
//!
//! let elements = extract_elements("<a href=\"https://x\">in</a><a href=\"ftp://y\">out</a>");
//! let selector = parse_selector("a[href^=http]").unwrap();
//! let found = query_elements(&elements, &selector);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].inner_text(), "in");
//! ```

/// Filtering elements against a parsed selector.
pub mod matching;
/// Selector string to AST.
pub mod parser;

pub use matching::query_elements;
pub use parser::{AttributeMode, AttributePredicate, Selector, parse_selector};
