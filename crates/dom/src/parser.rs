//! HTML5 parsing using html5ever.

use crate::Document;
use anyhow::{Error, anyhow};
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::{trace, warn};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse `html` with html5ever and copy the resulting tree into a fresh [`Document`].
///
/// Whitespace-only text nodes, doctypes and processing instructions are dropped.
pub(crate) fn parse_into_document(html: &str) -> Result<Document, Error> {
    let rc_dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|err| anyhow!("failed to read html input: {err}"))?;

    let mut document = Document::new();
    let root = document.root();
    convert_node(&mut document, &rc_dom.document, root)?;
    if document.children(root).is_empty() {
        warn!("parsed html produced an empty document");
    }
    trace!("parsed document {:?}", document.id());
    Ok(document)
}

fn convert_node(document: &mut Document, rc_node: &Handle, parent: NodeId) -> Result<(), Error> {
    match &rc_node.data {
        RcNodeData::Document => {
            for child in rc_node.children.borrow().iter() {
                convert_node(document, child, parent)?;
            }
        }
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if text.trim().is_empty() {
                return Ok(());
            }
            let node = document.create_text(&text);
            document.append_child(parent, node)?;
        }
        RcNodeData::Comment { contents } => {
            let node = document.create_comment(&**contents);
            document.append_child(parent, node)?;
        }
        RcNodeData::Element { name, attrs, .. } => {
            let node = document.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                document.set_attribute(node, &attr.name.local, &attr.value);
            }
            document.append_child(parent, node)?;
            for child in rc_node.children.borrow().iter() {
                convert_node(document, child, node)?;
            }
        }
    }
    Ok(())
}
