//! Integration tests for shallow and deep element extraction.

use trawl_html::{Element, ExtractMode, extract, extract_elements, extract_elements_deep};

fn names(elements: &[Element]) -> Vec<&str> {
    elements.iter().map(Element::name).collect()
}

const PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>Demo</title><meta charset=\"utf-8\"></head>
<body>
<div id=\"main\"><a href=\"https://example.com\">Link</a><span>s</span></div>
<img src=\"logo.png\">
</body>
</html>";

#[test]
fn test_nested_divs_report_outer_and_inner() {
    let elements = extract_elements("<div>A<div>B</div>C</div>");
    assert_eq!(names(&elements), ["div", "div"]);
    assert_eq!(elements[0].inner_text(), "A<div>B</div>C");
    assert_eq!(elements[1].inner_text(), "B");
}

#[test]
fn test_wrapper_does_not_carry_children() {
    let elements = extract_elements("<body><p>x</p></body>");
    assert!(
        elements
            .iter()
            .all(|element| !element.inner_text().contains("<p>x</p>"))
    );
    let paragraph = elements.iter().find(|element| element.name() == "p");
    assert_eq!(paragraph.map(Element::inner_text), Some("x"));
}

#[test]
fn test_void_elements_have_no_inner_text() {
    let elements = extract_elements(PAGE);
    let voids: Vec<_> = elements
        .iter()
        .filter(|element| ["img", "meta", "link"].contains(&element.name()))
        .collect();
    assert_eq!(voids.len(), 2);
    assert!(voids.iter().all(|element| element.inner_text().is_empty()));
}

#[test]
fn test_page_in_document_order() {
    let elements = extract_elements(PAGE);
    assert_eq!(
        names(&elements),
        ["html", "head", "title", "meta", "body", "div", "img"]
    );
}

#[test]
fn test_extraction_is_idempotent() {
    assert_eq!(extract_elements(PAGE), extract_elements(PAGE));
    assert_eq!(extract_elements_deep(PAGE), extract_elements_deep(PAGE));
}

#[test]
fn test_empty_and_tagless_input() {
    assert!(extract_elements("").is_empty());
    assert!(extract_elements("no markup here").is_empty());
}

#[test]
fn test_deep_descends_into_generic_and_nestable() {
    let html = "<body><div><a href=\"x\">L</a><span>s</span></div></body>";
    assert_eq!(names(&extract_elements(html)), ["body", "div"]);
    assert_eq!(
        names(&extract_elements_deep(html)),
        ["body", "div", "a", "span"]
    );
}

#[test]
fn test_deep_skips_raw_text_elements() {
    let html = "<script>var s = \"<b>x</b>\";</script>";
    assert_eq!(names(&extract_elements_deep(html)), ["script"]);
}

#[test]
fn test_deep_does_not_repeat_refined_elements() {
    let html = "<div>A<div>B</div>C</div>";
    assert_eq!(extract_elements_deep(html), extract_elements(html));
}

#[test]
fn test_deep_handles_thousands_of_nested_levels() {
    const DEPTH: usize = 3000;
    let html = format!("{}x{}", "<b>".repeat(DEPTH), "</b>".repeat(DEPTH));

    assert_eq!(extract_elements(&html).len(), 1);

    let elements = extract_elements_deep(&html);
    assert_eq!(elements.len(), DEPTH);
    assert!(elements.iter().all(|element| element.name() == "b"));
    assert_eq!(elements[DEPTH - 2].inner_text(), "<b>x</b>");
    assert_eq!(elements[DEPTH - 1].inner_text(), "x");
}

#[test]
fn test_deep_keeps_pre_order_across_levels() {
    let html = "<q><em>a</em><i>b</i></q><u><s>c</s></u>";
    assert_eq!(
        names(&extract_elements_deep(html)),
        ["q", "em", "i", "u", "s"]
    );
}

#[test]
fn test_extract_mode_dispatch() {
    let html = "<p><em>x</em></p>";
    assert_eq!(extract(html, ExtractMode::Shallow), extract_elements(html));
    assert_eq!(names(&extract(html, ExtractMode::Deep)), ["p", "em"]);
}

#[test]
fn test_extract_mode_parses_and_displays() {
    assert_eq!("deep".parse::<ExtractMode>().ok(), Some(ExtractMode::Deep));
    assert!("sideways".parse::<ExtractMode>().is_err());
    assert_eq!(ExtractMode::default().to_string(), "shallow");
}
