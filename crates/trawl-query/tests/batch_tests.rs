//! Integration tests for the batch scraper, driven by an in-memory fetcher.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use trawl_common::net::host_of;
use trawl_common::{Fetch, TransportError};
use trawl_html::ExtractMode;
use trawl_query::{Scraper, render_elapsed};

/// Serves canned pages and records every URL it was asked for.
struct StubFetcher {
    pages: HashMap<&'static str, String>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.calls.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::Unreachable { host: host_of(url) })
    }
}

/// Wrap `body` in a complete HTML document.
fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>t</title></head><body>{body}</body></html>")
}

fn selectors(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, selector)| ((*name).to_string(), (*selector).to_string()))
        .collect()
}

fn links(urls: &[&str]) -> Vec<String> {
    urls.iter().map(ToString::to_string).collect()
}

fn scraper(pairs: &[(&str, &str)], urls: &[&str]) -> (Scraper<StubFetcher>, Rc<RefCell<Vec<String>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let fetcher = StubFetcher {
        pages: HashMap::from([
            (
                "https://one.test",
                page("<h2 class=\"title\">First</h2><a href=\"https://x.test\">X</a><a>bare</a>"),
            ),
            (
                "https://two.test",
                page("<h2 class=\"title\">Second</h2><div id=\"box\"><p>inside</p></div>"),
            ),
            ("https://data.test/api", "{\"ok\": true}".to_string()),
        ]),
        calls: Rc::clone(&calls),
    };
    let scraper = Scraper::with_fetcher(fetcher)
        .with_selectors(selectors(pairs))
        .with_links(links(urls));
    (scraper, calls)
}

#[test]
fn test_values_concatenate_across_links_in_order() {
    let (scraper, _) = scraper(
        &[("titles", "h2.title")],
        &["https://one.test", "https://two.test"],
    );
    let values = scraper.values().unwrap();
    assert_eq!(values["titles"], ["First", "Second"]);
}

#[test]
fn test_attr_values_keep_missing_attributes() {
    let (scraper, _) = scraper(&[("links", "a")], &["https://one.test"]);
    let hrefs = scraper.attr_values("href").unwrap();
    assert_eq!(hrefs["links"], [Some("https://x.test".to_string()), None]);
}

#[test]
fn test_value_keyword_selects_inner_text() {
    let (scraper, _) = scraper(&[("links", "a")], &["https://one.test"]);
    let values = scraper.attr_values("value").unwrap();
    assert_eq!(
        values["links"],
        [Some("X".to_string()), Some("bare".to_string())]
    );
}

#[test]
fn test_duplicate_links_are_fetched_once() {
    let (scraper, calls) = scraper(
        &[("titles", "h2")],
        &["https://two.test", "https://one.test", "https://two.test"],
    );
    let values = scraper.values().unwrap();
    assert_eq!(values["titles"], ["Second", "First"]);
    assert_eq!(*calls.borrow(), ["https://two.test", "https://one.test"]);
}

#[test]
fn test_missing_selectors_is_a_contract_error() {
    let (scraper, calls) = scraper(&[], &["https://one.test"]);
    let err = scraper.parse().unwrap_err();
    assert!(err.is_input_contract());
    assert_eq!(err.to_string(), "Selectors not provided");
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_missing_links_is_a_contract_error() {
    let (scraper, _) = scraper(&[("titles", "h2")], &[]);
    let err = scraper.parse().unwrap_err();
    assert_eq!(err.to_string(), "Links not provided");
}

#[test]
fn test_bad_selector_fails_before_any_fetch() {
    let (scraper, calls) = scraper(
        &[("good", "h2"), ("broken", "a[href")],
        &["https://one.test"],
    );
    let err = scraper.values().unwrap_err();
    assert!(err.to_string().starts_with("Bad selector:"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_unreachable_link_is_skipped_and_reported() {
    let (scraper, _) = scraper(
        &[("titles", "h2")],
        &["https://gone.test", "https://one.test"],
    );
    let (results, report) = scraper.run_with_report().unwrap();
    assert_eq!(results["titles"].len(), 1);
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = report.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.url, "https://gone.test");
    assert_eq!(
        diagnostic.message,
        "gone.test is not available, check your internet connection"
    );
}

#[test]
fn test_non_html_document_contributes_nothing() {
    let (scraper, _) = scraper(&[("any", "*")], &["https://data.test/api"]);
    let (results, report) = scraper.run_with_report().unwrap();
    assert!(results["any"].is_empty());
    assert_eq!(
        report.diagnostics.iter().map(|d| d.message.as_str()).collect::<Vec<_>>(),
        ["not an HTML document"]
    );
}

#[test]
fn test_every_selector_name_is_present() {
    let (scraper, _) = scraper(
        &[("titles", "h2"), ("tables", "table")],
        &["https://one.test"],
    );
    let results = scraper.parse().unwrap();
    assert_eq!(results.keys().collect::<Vec<_>>(), ["tables", "titles"]);
    assert!(results["tables"].is_empty());
}

#[test]
fn test_child_chain_in_batch() {
    let (scraper, _) = scraper(&[("inner", "div#box > p")], &["https://two.test"]);
    assert_eq!(scraper.values().unwrap()["inner"], ["inside"]);
}

#[test]
fn test_deep_mode_finds_nested_elements() {
    let (shallow, _) = scraper(&[("paragraphs", "p")], &["https://two.test"]);
    assert!(shallow.values().unwrap()["paragraphs"].is_empty());

    let (deep, _) = scraper(&[("paragraphs", "p")], &["https://two.test"]);
    let deep = deep.with_mode(ExtractMode::Deep);
    assert_eq!(deep.values().unwrap()["paragraphs"], ["inside"]);
}

#[test]
fn test_report_renders_elapsed_time() {
    let (scraper, _) = scraper(&[("titles", "h2")], &["https://one.test", "https://gone.test"]);
    let (_, report) = scraper.run_with_report().unwrap();
    let rendered = report.to_string();
    assert!(rendered.starts_with("Scraper finished in "));
    assert!(rendered.ends_with("(1 skipped)"));
}

#[test]
fn test_render_elapsed_switches_to_minutes() {
    use std::time::Duration;

    assert_eq!(render_elapsed(Duration::from_millis(250)), "0.250 seconds");
    assert_eq!(render_elapsed(Duration::from_secs(59)), "59.000 seconds");
    assert_eq!(render_elapsed(Duration::from_secs(120)), "2.00 minutes");
}
