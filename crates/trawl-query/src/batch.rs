//! Named selectors over many documents.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use trawl_common::net::is_html_document;
use trawl_common::warning::clear_warnings;
use trawl_common::{Diagnostics, Error, Fetch, FetchConfig, HttpFetcher, Result};
use trawl_html::{Element, ExtractMode, extract};
use trawl_selector::{Selector, parse_selector, query_elements};

use crate::projection::Projection;

/// Component name used for printed warnings.
const COMPONENT: &str = "scraper";

/// Timing and skipped documents of one batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Wall-clock time from the first fetch to the last match.
    pub elapsed: Duration,
    /// Documents that contributed nothing, and why.
    pub diagnostics: Diagnostics,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scraper finished in {}", render_elapsed(self.elapsed))?;
        if !self.diagnostics.is_empty() {
            write!(f, " ({} skipped)", self.diagnostics.len())?;
        }
        Ok(())
    }
}

/// Human-readable duration: seconds, or minutes once past 59 seconds.
///
/// ```
/// use std::time::Duration;
/// use trawl_query::render_elapsed;
///
/// assert_eq!(render_elapsed(Duration::from_millis(1500)), "1.500 seconds");
/// assert_eq!(render_elapsed(Duration::from_secs(90)), "1.50 minutes");
/// ```
#[must_use]
pub fn render_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds > 59.0 {
        format!("{:.2} minutes", seconds / 60.0)
    } else {
        format!("{seconds:.3} seconds")
    }
}

/// Runs a set of named selectors against a list of links.
///
/// Results are keyed by selector name and concatenate the matches of every
/// link in link order. A link that cannot be fetched, or that is not an
/// HTML document, contributes nothing and is reported; it never aborts the
/// run.
///
/// ```no_run
/// use std::collections::BTreeMap;
/// use trawl_query::Scraper;
///
/// let selectors = BTreeMap::from([("links".to_string(), "a[href^=http]".to_string())]);
/// let scraper = Scraper::new(selectors, vec!["https://example.com".to_string()])?;
/// for (name, hrefs) in scraper.attr_values("href")? {
///     println!("{name}: {hrefs:?}");
/// }
/// # Ok::<(), trawl_common::Error>(())
/// ```
pub struct Scraper<F> {
    fetcher: F,
    selectors: BTreeMap<String, String>,
    links: Vec<String>,
    mode: ExtractMode,
}

impl Scraper<HttpFetcher> {
    /// Scraper over live HTTP with the default [`FetchConfig`].
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(selectors: BTreeMap<String, String>, links: Vec<String>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&FetchConfig::default())?;
        Ok(Self::with_fetcher(fetcher)
            .with_selectors(selectors)
            .with_links(links))
    }
}

impl<F: Fetch> Scraper<F> {
    /// Empty scraper that retrieves documents through `fetcher`.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            selectors: BTreeMap::new(),
            links: Vec::new(),
            mode: ExtractMode::Shallow,
        }
    }

    /// Replace the named selectors.
    #[must_use]
    pub fn with_selectors(mut self, selectors: BTreeMap<String, String>) -> Self {
        self.selectors = selectors;
        self
    }

    /// Replace the links.
    #[must_use]
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    /// Extraction mode used for every fetched document.
    #[must_use]
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    /// Matched elements per selector name.
    ///
    /// # Errors
    ///
    /// Returns an input-contract error when there are no selectors, no
    /// links, or a selector does not parse. Nothing is fetched in that
    /// case.
    pub fn parse(&self) -> Result<BTreeMap<String, Vec<Element>>> {
        self.run_with_report().map(|(results, _)| results)
    }

    /// Inner texts of the matched elements per selector name.
    ///
    /// # Errors
    ///
    /// Same as [`Scraper::parse`].
    pub fn values(&self) -> Result<BTreeMap<String, Vec<String>>> {
        Ok(self
            .parse()?
            .into_iter()
            .map(|(name, elements)| {
                let texts = elements
                    .iter()
                    .map(|element| element.inner_text().to_string())
                    .collect();
                (name, texts)
            })
            .collect())
    }

    /// Values of attribute `attr` of the matched elements per selector
    /// name. The key `value` selects inner text instead.
    ///
    /// # Errors
    ///
    /// Same as [`Scraper::parse`].
    pub fn attr_values(&self, attr: &str) -> Result<BTreeMap<String, Vec<Option<String>>>> {
        let projection = Projection::from_key(attr);
        Ok(self
            .parse()?
            .into_iter()
            .map(|(name, elements)| {
                let values = elements.iter().map(|element| projection.apply(element)).collect();
                (name, values)
            })
            .collect())
    }

    /// [`Scraper::parse`] plus timing and the documents that were skipped.
    ///
    /// # Errors
    ///
    /// Same as [`Scraper::parse`].
    pub fn run_with_report(&self) -> Result<(BTreeMap<String, Vec<Element>>, BatchReport)> {
        let selectors = self.parsed_selectors()?;
        clear_warnings();
        let started = Instant::now();
        let mut diagnostics = Diagnostics::default();

        let mut results: BTreeMap<String, Vec<Element>> = selectors
            .iter()
            .map(|(name, _)| ((*name).to_string(), Vec::new()))
            .collect();

        for link in self.unique_links() {
            let Some(elements) = self.load(link, &mut diagnostics) else {
                continue;
            };
            for (name, selector) in &selectors {
                if let Some(found) = results.get_mut(*name) {
                    found.extend(query_elements(&elements, selector));
                }
            }
        }

        let report = BatchReport {
            elapsed: started.elapsed(),
            diagnostics,
        };
        Ok((results, report))
    }

    /// Check the inputs and parse every selector before anything is fetched.
    fn parsed_selectors(&self) -> Result<Vec<(&str, Selector)>> {
        if self.selectors.is_empty() {
            return Err(Error::InputContract("Selectors not provided".to_string()));
        }
        if self.links.is_empty() {
            return Err(Error::InputContract("Links not provided".to_string()));
        }
        self.selectors
            .iter()
            .map(|(name, raw)| parse_selector(raw).map(|selector| (name.as_str(), selector)))
            .collect()
    }

    /// Links in first-seen order, each once.
    fn unique_links(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.links
            .iter()
            .map(String::as_str)
            .filter(|link| seen.insert(*link))
            .collect()
    }

    fn load(&self, link: &str, diagnostics: &mut Diagnostics) -> Option<Vec<Element>> {
        let text = match self.fetcher.fetch(link) {
            Ok(text) => text,
            Err(e) => {
                diagnostics.warn(COMPONENT, link, &e.to_string());
                return None;
            }
        };
        if !is_html_document(&text) {
            diagnostics.record(link, "not an HTML document");
            return None;
        }
        Some(extract(&text, self.mode))
    }
}
