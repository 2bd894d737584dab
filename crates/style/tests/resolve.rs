#![allow(clippy::unwrap_used, reason = "tests unwrap fixtures that are known to parse")]

use anyhow::Error;
use skeleton_dom::Document;
use skeleton_style::{
    BoxSize, Display, InlineStyleResolver, LayoutSnapshots, Sides, StyleResolver, StyleSnapshot,
};

fn fixture(html: &str) -> Result<Document, Error> {
    let _ = env_logger::builder().is_test(true).try_init();
    Document::parse_html(html)
}

#[test]
fn explicit_sizes_and_box_properties() -> Result<(), Error> {
    let doc = fixture(
        r#"<div id="card" style="width: 300px; height: 120px; border-radius: 8px;
            padding: 4px 10px; margin: 0 auto; margin-top: 12px; display: flex;
            flex-direction: column; gap: 6px"></div>"#,
    )?;
    let card = doc.element_by_id("card").unwrap();
    let snapshot = InlineStyleResolver::default().resolve(&doc, card);

    assert_eq!(snapshot.display, Display::Flex);
    assert_eq!(snapshot.width, "300px");
    assert_eq!(snapshot.height, "120px");
    assert_eq!(snapshot.border_radius, "8px");
    assert_eq!(snapshot.padding, Sides::from_shorthand("4px 10px 4px 10px").unwrap());
    assert_eq!(snapshot.margin.to_shorthand(), "12px auto 0 auto");
    assert_eq!(snapshot.flex_direction, "column");
    assert_eq!(snapshot.gap, "6px");
    assert_eq!(snapshot.grid_template_columns, "none");
    assert_eq!(snapshot.box_size, BoxSize { width: 300.0, height: 120.0 });
    assert!((snapshot.content_width() - 280.0).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn hidden_and_display_none_report_auto() -> Result<(), Error> {
    let doc = fixture(
        r#"<p id="a" style="display:none; width: 50px">x</p><p id="b" hidden>y</p>
           <p id="c" hidden style="display: block">z</p>"#,
    )?;
    let resolver = InlineStyleResolver::default();

    let first = resolver.resolve(&doc, doc.element_by_id("a").unwrap());
    assert_eq!(first.display, Display::None);
    assert_eq!(first.width, "auto");
    assert_eq!(first.box_size, BoxSize::default());
    assert!(!first.is_displayed());

    let second = resolver.resolve(&doc, doc.element_by_id("b").unwrap());
    assert_eq!(second.display, Display::None);

    let third = resolver.resolve(&doc, doc.element_by_id("c").unwrap());
    assert_eq!(third.display, Display::Block);
    Ok(())
}

#[test]
fn auto_width_fills_containing_block() -> Result<(), Error> {
    let doc = fixture(
        r#"<div id="outer" style="width: 400px; padding: 0 20px">
             <section id="inner" style="margin: 0 10px"><p id="para">text</p></section>
             <span id="label">abcd</span>
             <div id="half" style="width: 50%"></div>
           </div>"#,
    )?;
    let resolver = InlineStyleResolver::default();

    let inner = resolver.resolve(&doc, doc.element_by_id("inner").unwrap());
    assert_eq!(inner.width, "340px");

    let para = resolver.resolve(&doc, doc.element_by_id("para").unwrap());
    assert_eq!(para.width, "340px");
    assert_eq!(para.height, "20px");

    let label = resolver.resolve(&doc, doc.element_by_id("label").unwrap());
    assert_eq!(label.display, Display::Inline);
    assert_eq!(label.width, "32px");

    let half = resolver.resolve(&doc, doc.element_by_id("half").unwrap());
    assert_eq!(half.width, "180px");
    assert_eq!(half.height, "0px");
    Ok(())
}

#[test]
fn body_margin_and_viewport_width() -> Result<(), Error> {
    let doc = fixture(r#"<main id="main">hello</main>"#)?;
    let resolver = InlineStyleResolver::new(800.0, 18.0);
    let main = resolver.resolve(&doc, doc.element_by_id("main").unwrap());

    assert_eq!(main.width, "784px");
    assert_eq!(main.height, "18px");
    Ok(())
}

#[test]
fn media_attributes_size_replaced_elements() -> Result<(), Error> {
    let doc = fixture(r#"<img id="hero" src="a.png" width="300" height="150"><div id="d" width="9"></div>"#)?;
    let resolver = InlineStyleResolver::default();

    let hero = resolver.resolve(&doc, doc.element_by_id("hero").unwrap());
    assert_eq!(hero.width, "300px");
    assert_eq!(hero.height, "150px");
    assert_eq!(hero.width_px(), Some(300.0));

    let div = resolver.resolve(&doc, doc.element_by_id("d").unwrap());
    assert_ne!(div.width, "9px");
    Ok(())
}

#[test]
fn unsized_media_and_empty_glyphs_get_intrinsic_sizes() -> Result<(), Error> {
    let doc = fixture(
        r#"<div style="width: 200px">
             <img id="photo" src="a.png">
             <video id="clip" style="width: 640px"></video>
             <i id="star" class="fa fa-star"></i>
             <svg id="logo"></svg>
             <i id="worded">note</i>
           </div>"#,
    )?;
    let resolver = InlineStyleResolver::new(1024.0, 24.0);
    let size = |id: &str| {
        let snapshot = resolver.resolve(&doc, doc.element_by_id(id).unwrap());
        (snapshot.width, snapshot.height)
    };

    assert_eq!(size("photo"), ("300px".to_owned(), "150px".to_owned()));
    assert_eq!(size("clip"), ("640px".to_owned(), "150px".to_owned()));
    assert_eq!(size("star"), ("24px".to_owned(), "24px".to_owned()));
    assert_eq!(size("logo"), ("24px".to_owned(), "24px".to_owned()));
    assert_eq!(size("worded"), ("32px".to_owned(), "24px".to_owned()));
    Ok(())
}

#[test]
fn layout_snapshots_override_and_fall_back() -> Result<(), Error> {
    let doc = fixture(r#"<div id="a" style="width: 10px"></div><div id="b" style="width: 20px"></div>"#)?;
    let first = doc.element_by_id("a").unwrap();
    let second = doc.element_by_id("b").unwrap();

    let mut layout = LayoutSnapshots::new(InlineStyleResolver::default());
    assert!(layout.insert(first, StyleSnapshot::sized(640.0, 480.0)).is_none());
    assert_eq!(layout.len(), 1);

    assert_eq!(layout.resolve(&doc, first).width, "640px");
    assert_eq!(layout.resolve(&doc, second).width, "20px");
    Ok(())
}

#[test]
fn non_elements_are_not_rendered() -> Result<(), Error> {
    let doc = fixture("<p id=\"p\">words</p>")?;
    let para = doc.element_by_id("p").unwrap();
    let text = doc.children(para)[0];
    let snapshot = InlineStyleResolver::default().resolve(&doc, text);
    assert_eq!(snapshot.display, Display::None);
    Ok(())
}
