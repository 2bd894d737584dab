#![allow(clippy::unwrap_used, reason = "tests unwrap fixtures that are known to parse")]

use skeleton::markers::ACTIVE_ATTRIBUTE;
use skeleton::{Diagnostic, SkeletonOptions, StateCache, apply_with, is_active, remove_with};
use skeleton_dom::Document;
use skeleton_style::{InlineStyleResolver, LayoutSnapshots, StyleSnapshot};

fn parse(html: &str) -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    Document::parse_html(html).unwrap()
}

fn options() -> SkeletonOptions {
    SkeletonOptions::default().with_seed(3)
}

const PANEL: &str = r#"<div id="panel" class="panel" style="width: 240px"><p>first</p><p>second</p></div>"#;

#[test]
fn entries_are_pruned_when_the_document_is_dropped() {
    let resolver = InlineStyleResolver::default();
    let mut cache = StateCache::new();

    let mut doc = parse(PANEL);
    let panel = doc.element_by_id("panel").unwrap();
    let report = apply_with(&mut doc, panel, &options(), &resolver, &mut cache);
    assert!(report.is_clean());
    assert_eq!(cache.len(), 1);
    assert!(cache.has(&doc, panel));

    drop(doc);
    let other = Document::new();
    cache.prune(&other);
    assert!(cache.is_empty());
}

#[test]
fn entries_are_pruned_when_the_node_is_removed() {
    let resolver = InlineStyleResolver::default();
    let mut cache = StateCache::new();
    let mut doc = parse(PANEL);
    let panel = doc.element_by_id("panel").unwrap();
    assert!(apply_with(&mut doc, panel, &options(), &resolver, &mut cache).is_clean());

    doc.remove_subtree(panel);
    assert!(!cache.has(&doc, panel));
    cache.prune(&doc);
    assert!(cache.is_empty());
}

#[test]
fn entries_of_other_live_documents_survive_a_prune() {
    let resolver = InlineStyleResolver::default();
    let mut cache = StateCache::new();
    let mut first = parse(PANEL);
    let mut second = parse(PANEL);
    let first_panel = first.element_by_id("panel").unwrap();
    let second_panel = second.element_by_id("panel").unwrap();

    assert!(apply_with(&mut first, first_panel, &options(), &resolver, &mut cache).is_clean());
    assert!(apply_with(&mut second, second_panel, &options(), &resolver, &mut cache).is_clean());
    assert_eq!(cache.len(), 2);

    first.remove_subtree(first_panel);
    cache.prune(&first);
    assert_eq!(cache.len(), 1);
    assert!(cache.has(&second, second_panel));
}

#[test]
fn record_keeps_the_first_capture_and_clear_keeps_everything() {
    let mut doc = parse(PANEL);
    let panel = doc.element_by_id("panel").unwrap();
    let mut cache = StateCache::new();

    assert!(cache.record(&doc, panel));
    doc.add_class(panel, "changed");
    assert!(!cache.record(&doc, panel));
    assert_eq!(cache.get(&doc, panel).unwrap().classes, vec!["panel"]);

    cache.clear();
    assert_eq!(cache.len(), 1);
}

#[test]
fn captured_attributes_exclude_reserved_ones() {
    let mut doc = parse(PANEL);
    let panel = doc.element_by_id("panel").unwrap();
    doc.set_attribute(panel, "data-sk-layout", "grid");
    doc.set_attribute(panel, "data-user", "kept");
    let mut cache = StateCache::new();
    assert!(cache.record(&doc, panel));

    let state = cache.get(&doc, panel).unwrap();
    let names: Vec<&str> = state.attributes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["id", "class", "style", "data-user"]);
    assert_eq!(state.content.nodes.len(), 2);
}

#[test]
fn missing_entry_still_clears_the_flag() {
    let mut doc = parse(PANEL);
    let panel = doc.element_by_id("panel").unwrap();
    doc.set_attribute(panel, ACTIVE_ATTRIBUTE, "true");
    let mut cache = StateCache::new();

    let report = remove_with(&mut doc, panel, &mut cache);
    assert!(!report.value);
    assert_eq!(report.diagnostic, Some(Diagnostic::MissingCacheEntry));
    assert!(!is_active(&doc, panel));
}

#[test]
fn host_snapshots_drive_geometry() {
    let mut doc = parse(r#"<div id="frame"><img id="photo" src="p.jpg"></div>"#);
    let frame = doc.element_by_id("frame").unwrap();
    let photo = doc.element_by_id("photo").unwrap();

    let mut snapshots = LayoutSnapshots::new(InlineStyleResolver::default());
    let mut measured = StyleSnapshot::sized(640.0, 480.0);
    measured.border_radius = "12px".to_owned();
    snapshots.insert(photo, measured);

    let mut cache = StateCache::new();
    let report = apply_with(&mut doc, frame, &options(), &snapshots, &mut cache);
    assert!(report.is_clean());
    assert_eq!(report.value.replaced, 1);

    let block = doc.children(photo)[0];
    let style = doc.attribute(block, "style").unwrap();
    assert!(style.contains("width: 640px; height: 480px; border-radius: 12px"), "{style}");
    assert!(style.contains("aspect-ratio: 1.3333334"), "{style}");

    let report = remove_with(&mut doc, frame, &mut cache);
    assert!(report.value);
    assert!(doc.children(photo).is_empty());
    assert!(cache.is_empty());
}
