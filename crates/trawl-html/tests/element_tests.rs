//! Integration tests for building elements from raw slices.

use std::collections::HashSet;

use trawl_html::{Attributes, Element};

fn build(slice: &str) -> Element {
    Element::from_slice(slice).unwrap()
}

#[test]
fn test_name_attributes_and_inner_text() {
    let element = build("<a href=\"https://example.com\" id=\"home\">Home</a>");
    assert_eq!(element.name(), "a");
    assert_eq!(element.attribute("href"), Some("https://example.com"));
    assert_eq!(element.id(), Some("home"));
    assert_eq!(element.inner_text(), "Home");
}

#[test]
fn test_void_element_has_empty_inner_text() {
    let element = build("<img src=\"a.png\" alt=\"A\">");
    assert_eq!(element.name(), "img");
    assert_eq!(element.inner_text(), "");
    assert_eq!(element.attributes().len(), 2);
}

#[test]
fn test_inner_text_runs_to_last_closing_tag() {
    let element = build("<div>A<div>B</div>C</div>");
    assert_eq!(element.inner_text(), "A<div>B</div>C");
}

#[test]
fn test_unmatched_inner_opener_is_closed() {
    let element = build("<p>one<p>two</p>");
    assert_eq!(element.inner_text(), "one<p>two</p>");
}

#[test]
fn test_attributes_come_from_opening_tag_only() {
    let element = build("<a href=\"x\"><span title=\"t\">y</span></a>");
    assert_eq!(element.attributes().len(), 1);
    assert_eq!(element.attribute("title"), None);
}

#[test]
fn test_attribute_lookup_is_case_insensitive() {
    let element = build("<DIV ID=\"main\" Class=\"wide\">x</DIV>");
    assert_eq!(element.name(), "DIV");
    assert_eq!(element.id(), Some("main"));
    assert_eq!(element.attribute("class"), Some("wide"));
}

#[test]
fn test_classes_are_split_on_whitespace() {
    let element = build("<div class=\" a  b a \">x</div>");
    let expected: HashSet<&str> = ["a", "b"].into_iter().collect();
    assert_eq!(element.classes(), expected);
}

#[test]
fn test_missing_class_gives_empty_set() {
    assert!(build("<p>x</p>").classes().is_empty());
}

#[test]
fn test_bare_and_unquoted_attributes() {
    let element = build("<input type=checkbox checked>");
    assert_eq!(element.attribute("type"), Some("checkbox"));
    assert_eq!(element.attribute("checked"), Some(""));
    assert!(element.attributes().contains("CHECKED"));
}

#[test]
fn test_void_tag_slash_is_not_part_of_the_value() {
    assert_eq!(build("<img src=a.png/>").attribute("src"), Some("a.png"));
    assert_eq!(build("<meta charset=utf-8/>").attribute("charset"), Some("utf-8"));

    let link = build("<a href=https://x.com/>Link</a>");
    assert_eq!(link.attribute("href"), Some("https://x.com/"));
    assert_eq!(link.inner_text(), "Link");
}

#[test]
fn test_hyphenated_attribute_names() {
    let element = build("<span data-id=\"7\" xml:lang=\"en\">x</span>");
    assert_eq!(element.attribute("data-id"), Some("7"));
    assert_eq!(element.attribute("xml:lang"), Some("en"));
}

#[test]
fn test_no_element_without_a_tag_name() {
    assert_eq!(Element::from_slice("<!-- note -->"), None);
    assert_eq!(Element::from_slice("just text"), None);
    assert_eq!(Element::from_slice("< p>"), None);
}

#[test]
fn test_new_matches_built_element() {
    let mut attributes = Attributes::default();
    attributes.insert("class", "x");
    let built = build("<span class=\"x\">hi</span>");
    assert_eq!(Element::new("span", attributes, "hi"), built);
}

#[test]
fn test_serializes_to_json_object() {
    let element = build("<a href=\"x\" id=\"y\">go</a>");
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "a",
            "attributes": { "href": "x", "id": "y" },
            "innerText": "go"
        })
    );
}
