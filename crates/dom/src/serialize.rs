//! HTML serialization and detached fragments.
//!
//! A [`Fragment`] is an owned copy of a node's content. It holds no [`NodeId`]s, so it
//! stays valid after the live nodes it was taken from are removed, and it can be
//! instantiated back into any document.

use crate::{Document, NodeKind};
use anyhow::Error;
use indextree::NodeId;
use serde::{Deserialize, Serialize};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FragmentNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<FragmentNode>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_fragment_node(&mut out, node, false);
        }
        out
    }
}

impl Document {
    /// Owned copy of the children of `node`.
    pub fn snapshot_children(&self, node: NodeId) -> Fragment {
        Fragment {
            nodes: self
                .children(node)
                .into_iter()
                .filter_map(|child| self.snapshot_node(child))
                .collect(),
        }
    }

    fn snapshot_node(&self, node: NodeId) -> Option<FragmentNode> {
        let entry = self.node(node)?;
        match &entry.kind {
            NodeKind::Document => None,
            NodeKind::Element { tag } => Some(FragmentNode::Element {
                tag: tag.clone(),
                attrs: entry.attrs.iter().cloned().collect(),
                children: self.snapshot_children(node).nodes,
            }),
            NodeKind::Text { text } => Some(FragmentNode::Text { text: text.clone() }),
            NodeKind::Comment { text } => Some(FragmentNode::Comment { text: text.clone() }),
        }
    }

    /// Create detached nodes for every top-level entry of `fragment`.
    ///
    /// # Errors
    /// Returns an error if building a nested subtree fails.
    pub fn instantiate(&mut self, fragment: &Fragment) -> Result<Vec<NodeId>, Error> {
        fragment
            .nodes
            .iter()
            .map(|node| self.instantiate_node(node))
            .collect()
    }

    fn instantiate_node(&mut self, node: &FragmentNode) -> Result<NodeId, Error> {
        match node {
            FragmentNode::Element {
                tag,
                attrs,
                children,
            } => {
                let element = self.create_element(tag);
                for (name, value) in attrs {
                    self.set_attribute(element, name, value);
                }
                for child in children {
                    let child_id = self.instantiate_node(child)?;
                    self.append_child(element, child_id)?;
                }
                Ok(element)
            }
            FragmentNode::Text { text } => Ok(self.create_text(text)),
            FragmentNode::Comment { text } => Ok(self.create_comment(text)),
        }
    }

    /// Serialized markup of the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        self.snapshot_children(node).to_html()
    }

    /// Serialized markup of `node` itself, including its own tag and attributes.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(snapshot) = self.snapshot_node(node) {
            write_fragment_node(&mut out, &snapshot, false);
        }
        out
    }
}

fn write_fragment_node(out: &mut String, node: &FragmentNode, raw_text: bool) {
    match node {
        FragmentNode::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(out, value, true);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) && children.is_empty() {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
            for child in children {
                write_fragment_node(out, child, raw);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        FragmentNode::Text { text } => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_into(out, text, false);
            }
        }
        FragmentNode::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for character in text.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(character),
        }
    }
}
