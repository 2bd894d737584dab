//! Per-root state needed to undo a transformation.
//!
//! Entries are keyed by document and node identity and only hold a weak handle to the
//! document, so the cache never keeps anything alive. An entry whose document was
//! dropped, or whose node was removed from its arena, can no longer be reached by any
//! live node and is swept on the next mutating access or [`StateCache::prune`].

use crate::markers::{ACTIVE_ATTRIBUTE, MARKER_CLASSES, is_reserved_attribute};
use alloc::rc::Weak;
use anyhow::Error;
use log::{debug, trace};
use skeleton_dom::{Document, DocumentId, DocumentToken, Fragment, NodeId};
use std::collections::HashMap;

/// Everything about a root that a transformation overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedState {
    /// Detached copy of the root's children.
    pub content: Fragment,
    /// Class names in their original order.
    pub classes: Vec<String>,
    /// Every attribute not owned by this crate, in original order.
    pub attributes: Vec<(String, String)>,
}

impl CachedState {
    fn capture(document: &Document, root: NodeId) -> Self {
        Self {
            content: document.snapshot_children(root),
            classes: document.class_list(root),
            attributes: document
                .attributes(root)
                .iter()
                .filter(|(name, _)| !is_reserved_attribute(name))
                .cloned()
                .collect(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

type CacheKey = (DocumentId, NodeId);

#[derive(Debug)]
struct Entry {
    document: Weak<DocumentToken>,
    state: CachedState,
}

#[derive(Debug, Default)]
pub struct StateCache {
    entries: HashMap<CacheKey, Entry>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `root` unless it already has an entry. Returns whether a new entry was made.
    pub fn record(&mut self, document: &Document, root: NodeId) -> bool {
        self.prune(document);
        if !document.contains(root) {
            return false;
        }
        let key = (document.id(), root);
        if self.entries.contains_key(&key) {
            debug!("state for {root:?} already cached; keeping the first capture");
            return false;
        }
        let state = CachedState::capture(document, root);
        trace!(
            "cached {root:?}: {} content nodes, {} attributes",
            state.content.nodes.len(),
            state.attributes.len()
        );
        self.entries.insert(
            key,
            Entry {
                document: document.liveness(),
                state,
            },
        );
        true
    }

    pub fn has(&self, document: &Document, root: NodeId) -> bool {
        self.get(document, root).is_some()
    }

    pub fn get(&self, document: &Document, root: NodeId) -> Option<&CachedState> {
        if !document.contains(root) {
            return None;
        }
        self.entries
            .get(&(document.id(), root))
            .filter(|entry| entry.document.upgrade().is_some())
            .map(|entry| &entry.state)
    }

    /// Consume the entry for `root` and write it back over the root's content and
    /// attributes. Returns `Ok(false)` when there was nothing cached.
    ///
    /// Attributes present on the root but absent from the capture are dropped, the
    /// transform state flag excepted; clearing that is left to the caller.
    ///
    /// # Errors
    /// Returns an error if the cached content cannot be rebuilt under the root. The entry
    /// is consumed either way.
    pub fn restore(&mut self, document: &mut Document, root: NodeId) -> Result<bool, Error> {
        self.prune(document);
        let Some(entry) = self.entries.remove(&(document.id(), root)) else {
            return Ok(false);
        };
        let state = entry.state;

        let nodes = document.instantiate(&state.content)?;
        document.replace_children(root, &nodes)?;

        let stale: Vec<String> = document
            .attributes(root)
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| name != ACTIVE_ATTRIBUTE && state.attribute(name).is_none())
            .collect();
        for name in stale {
            document.remove_attribute(root, &name);
        }
        for (name, value) in &state.attributes {
            document.set_attribute(root, name, value);
        }
        for marker in MARKER_CLASSES {
            if !state.classes.iter().any(|class| class == marker) {
                document.remove_class(root, marker);
            }
        }
        debug!("restored {root:?} from cache");
        Ok(true)
    }

    /// Deliberately does nothing: entries are reclaimed once their node or document is
    /// gone, so there is never anything to clear by hand.
    pub fn clear(&mut self) {}

    /// Drop entries whose document was dropped or whose node was removed from `document`.
    pub fn prune(&mut self, document: &Document) {
        let current = document.id();
        let before = self.entries.len();
        self.entries.retain(|(owner, node), entry| {
            if entry.document.upgrade().is_none() {
                return false;
            }
            *owner != current || document.contains(*node)
        });
        let swept = before - self.entries.len();
        if swept > 0 {
            debug!("swept {swept} unreachable cache entries");
        }
    }

    /// Number of entries, including ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
