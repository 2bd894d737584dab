//! Arena-backed DOM used as the live tree for skeleton transformations.
//!
//! Nodes live in an [`indextree::Arena`] and are addressed by [`NodeId`]. Removed
//! nodes are stamped by the arena, so an id that outlived its node never resolves
//! to a different node later. Each [`Document`] also carries a liveness token that
//! side tables can hold weakly to learn when the document itself is gone.

#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

extern crate alloc;

mod parser;
mod serialize;

pub use indextree::NodeId;
pub use serialize::{Fragment, FragmentNode};

use alloc::rc::{Rc, Weak};
use anyhow::{Error, anyhow};
use core::sync::atomic::{AtomicU64, Ordering};
use indextree::{Arena, Node as ArenaNode};
use smallvec::SmallVec;

/// Attribute storage for a single element; most elements carry only a few.
pub type Attributes = SmallVec<(String, String), 4>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomNode {
    pub kind: NodeKind,
    pub attrs: Attributes,
}

/// Process-unique identity of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Strong half of the document liveness token. Only the owning [`Document`] holds it.
#[derive(Debug)]
pub struct DocumentToken {
    id: DocumentId,
}

impl DocumentToken {
    pub const fn id(&self) -> DocumentId {
        self.id
    }
}

#[derive(Debug)]
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
    token: Rc<DocumentToken>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        Self {
            arena,
            root,
            token: Rc::new(DocumentToken {
                id: DocumentId::next(),
            }),
        }
    }

    /// Parse a full HTML document.
    ///
    /// The parse is lossy in one respect: text nodes made only of whitespace are not
    /// kept, including the space between two inline siblings. `<b>a</b> <i>b</i>` comes
    /// back as `<b>a</b><i>b</i>`, and anything snapshotted from the tree afterwards
    /// (fragments, `inner_html`, `text_content`) reflects the trimmed tree.
    ///
    /// # Errors
    /// Returns an error if the input cannot be read by the parser.
    pub fn parse_html(html: &str) -> Result<Self, Error> {
        parser::parse_into_document(html)
    }

    pub fn id(&self) -> DocumentId {
        self.token.id
    }

    /// Weak handle that stops upgrading once this document is dropped.
    pub fn liveness(&self) -> Weak<DocumentToken> {
        Rc::downgrade(&self.token)
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `node` belongs to this document and has not been removed.
    pub fn contains(&self, node: NodeId) -> bool {
        self.arena
            .get(node)
            .is_some_and(|entry| !entry.is_removed())
            && !node.is_removed(&self.arena)
    }

    pub fn node(&self, node: NodeId) -> Option<&DomNode> {
        if !self.contains(node) {
            return None;
        }
        self.arena.get(node).map(ArenaNode::get)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut DomNode> {
        if !self.contains(node) {
            return None;
        }
        self.arena.get_mut(node).map(ArenaNode::get_mut)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if either node was removed or the append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(anyhow!("append_child on a removed node"));
        }
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|err| anyhow!("append_child failed: {err:?}"))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        if !self.contains(node) {
            return None;
        }
        self.arena.get(node).and_then(ArenaNode::parent)
    }

    /// All children in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        node.children(&self.arena).collect()
    }

    /// Element children in document order, skipping text and comments.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        node.children(&self.arena)
            .filter(|child| self.is_element(*child))
            .collect()
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.node(node).map(|entry| &entry.kind),
            Some(NodeKind::Element { .. })
        )
    }

    /// Lowercase tag name for element nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            NodeKind::Document | NodeKind::Text { .. } | NodeKind::Comment { .. } => None,
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if !self.contains(node) {
            return out;
        }
        for descendant in node.descendants(&self.arena) {
            if let Some(NodeKind::Text { text }) = self.node(descendant).map(|entry| &entry.kind)
            {
                out.push_str(text);
            }
        }
        out
    }

    /// Remove every child of `node` from the arena.
    pub fn clear_children(&mut self, node: NodeId) {
        for child in self.children(node) {
            child.remove_subtree(&mut self.arena);
        }
    }

    /// Full content swap: drop the current children and append `replacement` in order.
    ///
    /// # Errors
    /// Returns an error if a replacement node cannot be appended.
    pub fn replace_children(&mut self, node: NodeId, replacement: &[NodeId]) -> Result<(), Error> {
        if !self.contains(node) {
            return Err(anyhow!("replace_children on a removed node"));
        }
        self.clear_children(node);
        for child in replacement {
            self.append_child(node, *child)?;
        }
        Ok(())
    }

    /// Detach `node` from its parent and free it together with its descendants.
    pub fn remove_subtree(&mut self, node: NodeId) {
        if self.contains(node) && node != self.root {
            node.remove_subtree(&mut self.arena);
        }
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        self.node(node).map_or(&[], |entry| &entry.attrs[..])
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set or overwrite an attribute. Returns false when `node` is not an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        if !self.is_element(node) {
            return false;
        }
        let Some(entry) = self.node_mut(node) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        if let Some(slot) = entry.attrs.iter_mut().find(|(key, _)| *key == name) {
            value.clone_into(&mut slot.1);
        } else {
            entry.attrs.push((name, value.to_owned()));
        }
        true
    }

    /// Remove an attribute, returning whether it was present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        let Some(entry) = self.node_mut(node) else {
            return false;
        };
        let before = entry.attrs.len();
        entry.attrs.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        entry.attrs.len() != before
    }

    /// Class names in attribute order, without duplicates.
    pub fn class_list(&self, node: NodeId) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        for class in self
            .attribute(node, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
        {
            if !classes.iter().any(|existing| existing == class) {
                classes.push(class.to_owned());
            }
        }
        classes
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|item| item == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            return false;
        }
        let mut classes = self.class_list(node);
        classes.push(class.to_owned());
        self.set_attribute(node, "class", &classes.join(" "))
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        if !self.has_class(node, class) {
            return false;
        }
        let classes: Vec<String> = self
            .class_list(node)
            .into_iter()
            .filter(|item| item != class)
            .collect();
        self.set_attribute(node, "class", &classes.join(" "))
    }

    /// First element in document order with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .find(|node| self.tag_name(*node) == Some(tag))
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .find(|node| self.is_element(*node) && self.attribute(*node, "id") == Some(id))
    }

    /// Number of edges between `node` and the document node.
    pub fn depth(&self, node: NodeId) -> usize {
        if !self.contains(node) {
            return 0;
        }
        node.ancestors(&self.arena).skip(1).count()
    }

    /// Every node below `node` in document order, not including `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        if !self.contains(node) {
            return Vec::new();
        }
        node.descendants(&self.arena).skip(1).collect()
    }
}
