//! Reversible skeleton placeholders for DOM subtrees.
//!
//! [`apply`] walks a subtree, classifies each element, and swaps its content for inert
//! placeholder blocks sized from the element's resolved style. Everything the walk
//! overwrites on the root is cached first, so [`remove`] can put it back. The cache is
//! held per thread and keyed weakly on the document, so dropping a document or removing
//! a transformed node releases its entry without any explicit cleanup.

#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

extern crate alloc;

pub mod builder;
mod cache;
pub mod classify;
mod config;
mod engine;
pub mod markers;
mod options;
mod report;
mod styles;

pub use cache::{CachedState, StateCache};
pub use config::{DEFAULT_CHILD_BATCH_SIZE, SkeletonConfig};
pub use engine::{MIN_VISIBLE_PX, TransformStats, is_rendered, layout_mode};
pub use options::{SkeletonOptions, Speed, Theme};
pub use report::{Diagnostic, Report};
pub use styles::{STYLE_ELEMENT_ID, ensure_styles, stylesheet};

use core::cell::RefCell;
use once_cell::sync::Lazy;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use skeleton_dom::{Document, NodeId};
use skeleton_style::StyleResolver;

static CONFIG: Lazy<SkeletonConfig> = Lazy::new(SkeletonConfig::from_env);

thread_local! {
    static CACHE: RefCell<StateCache> = RefCell::new(StateCache::new());
}

/// Process configuration, read from the environment on first use.
pub fn config() -> &'static SkeletonConfig {
    &CONFIG
}

/// Replace the content under `root` with skeleton placeholders.
///
/// Styles come from the built-in resolver configured by [`config`], and the undo state
/// goes to this thread's cache. A root that is already active, not rendered, or not a
/// live element is left untouched and the report carries the reason.
pub fn apply(document: &mut Document, root: NodeId, options: &SkeletonOptions) -> Report<TransformStats> {
    let resolver = CONFIG.resolver();
    CACHE.with_borrow_mut(|cache| apply_with(document, root, options, &resolver, cache))
}

/// [`apply`] with a caller-supplied resolver and cache.
pub fn apply_with<R>(
    document: &mut Document,
    root: NodeId,
    options: &SkeletonOptions,
    resolver: &R,
    cache: &mut StateCache,
) -> Report<TransformStats>
where
    R: StyleResolver + ?Sized,
{
    apply_batched(document, root, options, resolver, cache, CONFIG.child_batch_size)
}

/// [`apply_with`] with an explicit sibling batch size. Zero is treated as one.
pub fn apply_batched<R>(
    document: &mut Document,
    root: NodeId,
    options: &SkeletonOptions,
    resolver: &R,
    cache: &mut StateCache,
    batch_size: usize,
) -> Report<TransformStats>
where
    R: StyleResolver + ?Sized,
{
    let mut rng = options
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    engine::transform(document, root, options, resolver, cache, &mut rng, batch_size)
}

/// Restore `root` to its state before [`apply`]. The value is whether anything was restored.
pub fn remove(document: &mut Document, root: NodeId) -> Report<bool> {
    CACHE.with_borrow_mut(|cache| remove_with(document, root, cache))
}

/// [`remove`] against a caller-supplied cache.
pub fn remove_with(document: &mut Document, root: NodeId, cache: &mut StateCache) -> Report<bool> {
    engine::reverse(document, root, cache)
}

/// Whether `root` currently carries a skeleton.
pub fn is_active(document: &Document, root: NodeId) -> bool {
    engine::is_active(document, root)
}

/// Whether this thread's cache holds undo state for `root`.
pub fn is_cached(document: &Document, root: NodeId) -> bool {
    CACHE.with_borrow(|cache| cache.has(document, root))
}

/// Sweep this thread's cache of entries for dropped documents and removed nodes of
/// `document`. Returns how many entries remain.
pub fn prune_cache(document: &Document) -> usize {
    CACHE.with_borrow_mut(|cache| {
        cache.prune(document);
        cache.len()
    })
}
