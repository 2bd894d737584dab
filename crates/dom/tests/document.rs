#![allow(clippy::unwrap_used, reason = "tests unwrap fixtures that are known to parse")]

use skeleton_dom::{Document, Fragment, FragmentNode};

fn parse(html: &str) -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    Document::parse_html(html).unwrap()
}

#[test]
fn parses_elements_attributes_and_text() {
    let doc = parse(r#"<div id="card" class="card  wide card"><p>Hello <b>world</b></p></div>"#);
    let card = doc.element_by_id("card").unwrap();

    assert_eq!(doc.tag_name(card), Some("div"));
    assert_eq!(doc.class_list(card), vec!["card", "wide"]);
    assert!(doc.has_class(card, "wide"));
    assert_eq!(doc.text_content(card), "Hello world");
    assert_eq!(doc.element_children(card).len(), 1);
    assert!(doc.find_by_tag("head").is_some());
    assert!(doc.find_by_tag("body").is_some());
}

#[test]
fn whitespace_only_text_is_dropped() {
    let doc = parse("<ul id=\"list\">\n  <li>a</li>\n  <li>b</li>\n</ul>");
    let list = doc.element_by_id("list").unwrap();
    assert_eq!(doc.children(list).len(), 2);
    assert_eq!(doc.inner_html(list), "<li>a</li><li>b</li>");
}

#[test]
fn whitespace_between_inline_siblings_is_not_kept() {
    let doc = parse(r#"<p id="p"><b>a</b> <i>b</i> tail </p>"#);
    let para = doc.element_by_id("p").unwrap();
    assert_eq!(doc.inner_html(para), "<b>a</b><i>b</i> tail ");
    assert_eq!(doc.text_content(para), "ab tail ");
}

#[test]
fn attribute_and_class_mutation() {
    let mut doc = parse(r#"<div id="box" class="a"></div>"#);
    let node = doc.element_by_id("box").unwrap();

    assert!(doc.add_class(node, "b"));
    assert!(!doc.add_class(node, "b"));
    assert_eq!(doc.attribute(node, "class"), Some("a b"));
    assert!(doc.remove_class(node, "a"));
    assert_eq!(doc.attribute(node, "class"), Some("b"));

    assert!(doc.set_attribute(node, "Data-Flag", "1"));
    assert_eq!(doc.attribute(node, "data-flag"), Some("1"));
    assert!(doc.set_attribute(node, "data-flag", "2"));
    assert_eq!(doc.attribute(node, "data-flag"), Some("2"));
    assert!(doc.remove_attribute(node, "data-flag"));
    assert!(!doc.remove_attribute(node, "data-flag"));
}

#[test]
fn text_nodes_reject_attributes() {
    let mut doc = Document::new();
    let text = doc.create_text("plain");
    assert!(!doc.set_attribute(text, "id", "x"));
    assert!(doc.attributes(text).is_empty());
}

#[test]
fn replace_children_swaps_content_and_frees_old_nodes() {
    let mut doc = parse(r#"<div id="host"><span>one</span><span>two</span></div>"#);
    let host = doc.element_by_id("host").unwrap();
    let old = doc.children(host);

    let fresh = doc.create_element("em");
    let text = doc.create_text("new");
    doc.append_child(fresh, text).unwrap();
    doc.replace_children(host, &[fresh]).unwrap();

    assert_eq!(doc.inner_html(host), "<em>new</em>");
    assert!(old.iter().all(|node| !doc.contains(*node)));
    assert_eq!(doc.parent(fresh), Some(host));
}

#[test]
fn removed_nodes_are_not_addressable() {
    let mut doc = parse(r#"<section id="gone"><p>bye</p></section>"#);
    let gone = doc.element_by_id("gone").unwrap();
    doc.remove_subtree(gone);

    assert!(!doc.contains(gone));
    assert!(doc.node(gone).is_none());
    assert!(doc.element_by_id("gone").is_none());
    assert!(!doc.set_attribute(gone, "id", "back"));
}

#[test]
fn fragment_round_trips_into_markup() {
    let mut doc = parse(r#"<div id="src"><a href="/x?a=1&amp;b=2">link</a><!--note--></div>"#);
    let src = doc.element_by_id("src").unwrap();
    let before = doc.inner_html(src);
    let fragment = doc.snapshot_children(src);

    doc.clear_children(src);
    assert_eq!(doc.inner_html(src), "");

    let nodes = doc.instantiate(&fragment).unwrap();
    doc.replace_children(src, &nodes).unwrap();
    assert_eq!(doc.inner_html(src), before);
    assert_eq!(before, r#"<a href="/x?a=1&amp;b=2">link</a><!--note-->"#);
}

#[test]
fn fragment_serializes_with_serde() {
    let doc = parse(r#"<p id="p">hi <i class="fa fa-star"></i></p>"#);
    let fragment = doc.snapshot_children(doc.element_by_id("p").unwrap());
    let encoded = serde_json::to_string(&fragment).unwrap();
    let decoded: Fragment = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, fragment);
    assert!(matches!(
        decoded.nodes.first(),
        Some(FragmentNode::Text { text }) if text == "hi "
    ));
}

#[test]
fn documents_have_distinct_identities_and_liveness() {
    let first = Document::new();
    let second = Document::new();
    assert_ne!(first.id(), second.id());

    let weak = first.liveness();
    assert!(weak.upgrade().is_some());
    drop(first);
    assert!(weak.upgrade().is_none());
}
