//! The traversal engine: depth-first, pre-order replacement of content with placeholders.

use crate::builder::{PlaceholderBlock, build_placeholder};
use crate::cache::StateCache;
use crate::classify::{NodeCategory, classify};
use crate::markers::{ACTIVE_ATTRIBUTE, BLOCK_CLASS, CONTAINER_CLASS, LAYOUT_ATTRIBUTE, PLACEHOLDER_ATTRIBUTE};
use crate::options::SkeletonOptions;
use crate::report::{Diagnostic, Report};
use crate::styles::ensure_styles;
use anyhow::{Error, anyhow};
use log::{Level, debug, log_enabled, trace};
use rand::Rng;
use skeleton_dom::{Document, NodeId};
use skeleton_style::{StyleResolver, StyleSnapshot};

/// Boxes smaller than this in both dimensions are treated as invisible.
pub const MIN_VISIBLE_PX: f32 = 4.0;

/// Counters describing one transformation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Nodes that were classified.
    pub visited: usize,
    /// Nodes whose content was swapped for placeholders.
    pub replaced: usize,
    /// Containers that received the structural marker.
    pub containers: usize,
    /// Nodes skipped for being hidden or below the visibility floor.
    pub hidden: usize,
    /// Nodes left untouched for being deeper than `max_depth`.
    pub too_deep: usize,
    /// Nested active roots reversed before the walk.
    pub reverted: usize,
}

/// Whether a snapshot describes a box worth replacing.
pub fn is_rendered(snapshot: &StyleSnapshot) -> bool {
    snapshot.is_displayed()
        && !(snapshot.box_size.width < MIN_VISIBLE_PX && snapshot.box_size.height < MIN_VISIBLE_PX)
}

pub fn is_active(document: &Document, root: NodeId) -> bool {
    document.attribute(root, ACTIVE_ATTRIBUTE) == Some("true")
}

/// Layout mode recorded on a marked container.
pub fn layout_mode(snapshot: &StyleSnapshot) -> &'static str {
    if snapshot.display.is_flex() {
        if snapshot.flex_direction.trim().starts_with("column") {
            "flex-column"
        } else {
            "flex-row"
        }
    } else if snapshot.display.is_grid() {
        "grid"
    } else if snapshot.display.is_block_level() {
        "block"
    } else {
        "inline"
    }
}

/// Transform the subtree at `root` into placeholders.
///
/// Before anything is mutated the root is checked for an existing transformation and for
/// visibility; either check failing leaves the tree untouched. Active roots nested below
/// `root` are reversed first, so the capture only ever holds original content. Then the
/// cache is written, then the active flag, then the presentation markers, and only then
/// does the walk start. A mutation failure part way through is reported, not rolled back.
pub fn transform<R, G>(
    document: &mut Document,
    root: NodeId,
    options: &SkeletonOptions,
    resolver: &R,
    cache: &mut StateCache,
    rng: &mut G,
    batch_size: usize,
) -> Report<TransformStats>
where
    R: StyleResolver + ?Sized,
    G: Rng,
{
    let (snapshot, reverted) = match prepare(document, root, options, resolver, cache) {
        Ok(prepared) => prepared,
        Err(diagnostic) => return Report::warn(TransformStats::default(), diagnostic),
    };
    let mut walker = Walker::new(document, resolver, options, rng, batch_size);
    walker.stats.reverted = reverted;
    let outcome = walker.process(root, 0, &snapshot);
    walker.finish(root, outcome)
}

/// Pre-walk checks and root bookkeeping. Returns the root snapshot and the number of
/// nested transformations that were reversed.
fn prepare<R>(
    document: &mut Document,
    root: NodeId,
    options: &SkeletonOptions,
    resolver: &R,
    cache: &mut StateCache,
) -> Result<(StyleSnapshot, usize), Diagnostic>
where
    R: StyleResolver + ?Sized,
{
    if !document.is_element(root) {
        return Err(Diagnostic::NodeNotFound);
    }
    if is_active(document, root) {
        return Err(Diagnostic::AlreadyActive);
    }
    let snapshot = resolver.resolve(document, root);
    if !is_rendered(&snapshot) {
        return Err(Diagnostic::RootNotRendered);
    }

    let reverted = revert_nested(document, root, cache);
    ensure_styles(document);
    cache.record(document, root);
    document.set_attribute(root, ACTIVE_ATTRIBUTE, "true");
    for class in options.presentation_classes() {
        document.add_class(root, class);
    }
    Ok((snapshot, reverted))
}

/// Reverse every active root below `root`, outermost first.
fn revert_nested(document: &mut Document, root: NodeId, cache: &mut StateCache) -> usize {
    let nested: Vec<NodeId> = document
        .descendants(root)
        .into_iter()
        .filter(|node| is_active(document, *node))
        .collect();
    let mut reverted = 0;
    for node in nested {
        // Reversing an outer root rebuilds its content, which drops any inner ones.
        if !is_active(document, node) {
            continue;
        }
        debug!("reversing nested skeleton {node:?} before transforming {root:?}");
        if reverse(document, node, cache).is_clean() {
            reverted += 1;
        }
    }
    reverted
}

/// Undo the transformation of `root` from its cached state.
///
/// The cache is consumed before the active flag is cleared. An active root without a
/// cache entry still has its flag cleared so the two cannot stay out of step.
pub fn reverse(document: &mut Document, root: NodeId, cache: &mut StateCache) -> Report<bool> {
    if !is_active(document, root) {
        return Report::warn(false, Diagnostic::NotActive);
    }
    let restored = cache.restore(document, root);
    document.remove_attribute(root, ACTIVE_ATTRIBUTE);
    match restored {
        Ok(true) => Report::ok(true),
        Ok(false) => Report::warn(false, Diagnostic::MissingCacheEntry),
        Err(err) => Report::warn(false, Diagnostic::Interrupted(format!("{err:#}"))),
    }
}

struct Walker<'walk, R: ?Sized, G> {
    document: &'walk mut Document,
    resolver: &'walk R,
    options: &'walk SkeletonOptions,
    rng: &'walk mut G,
    batch_size: usize,
    stats: TransformStats,
}

impl<'walk, R, G> Walker<'walk, R, G>
where
    R: StyleResolver + ?Sized,
    G: Rng,
{
    fn new(
        document: &'walk mut Document,
        resolver: &'walk R,
        options: &'walk SkeletonOptions,
        rng: &'walk mut G,
        batch_size: usize,
    ) -> Self {
        Self {
            document,
            resolver,
            options,
            rng,
            batch_size: batch_size.max(1),
            stats: TransformStats::default(),
        }
    }

    fn finish(self, root: NodeId, outcome: Result<(), Error>) -> Report<TransformStats> {
        let stats = self.stats;
        debug!(
            "transformed {root:?}: {} visited, {} replaced, {} containers",
            stats.visited, stats.replaced, stats.containers
        );
        if log_enabled!(Level::Trace) {
            trace!("skeleton of {root:?}: {}", self.document.outer_html(root));
        }
        match outcome {
            Ok(()) => Report::ok(stats),
            Err(err) => Report::warn(stats, Diagnostic::Interrupted(format!("{err:#}"))),
        }
    }

    fn visit(&mut self, node: NodeId, depth: usize) -> Result<(), Error> {
        if !self.document.contains(node) {
            return Err(anyhow!("{node:?} was removed during the walk"));
        }
        if depth > self.options.max_depth {
            self.stats.too_deep += 1;
            return Ok(());
        }
        let snapshot = self.resolver.resolve(self.document, node);
        if !is_rendered(&snapshot) {
            trace!("skipping hidden {node:?} at depth {depth}");
            self.stats.hidden += 1;
            return Ok(());
        }
        self.process(node, depth, &snapshot)
    }

    fn process(&mut self, node: NodeId, depth: usize, snapshot: &StyleSnapshot) -> Result<(), Error> {
        self.stats.visited += 1;
        let category = classify(self.document, node);
        trace!("{node:?} at depth {depth} is {category:?}");
        match category {
            NodeCategory::Text | NodeCategory::Image | NodeCategory::Button | NodeCategory::Icon => {
                let text_len = if category == NodeCategory::Text {
                    self.document.text_content(node).trim().chars().count()
                } else {
                    0
                };
                let Some(placeholder) = build_placeholder(
                    category,
                    snapshot,
                    text_len,
                    self.options.randomize,
                    self.rng,
                ) else {
                    return Ok(());
                };
                let blocks: Vec<NodeId> = placeholder
                    .blocks()
                    .iter()
                    .map(|block| self.render_block(block))
                    .collect();
                self.document.replace_children(node, &blocks)?;
                self.stats.replaced += 1;
            }
            NodeCategory::Container => {
                self.document.add_class(node, CONTAINER_CLASS);
                self.document
                    .set_attribute(node, LAYOUT_ATTRIBUTE, layout_mode(snapshot));
                self.stats.containers += 1;
                if !self.options.deep {
                    return Ok(());
                }
                let children = self.document.element_children(node);
                for batch in children.chunks(self.batch_size) {
                    for child in batch {
                        self.visit(*child, depth + 1)?;
                    }
                }
            }
            NodeCategory::Ignore => {}
        }
        Ok(())
    }

    fn render_block(&mut self, block: &PlaceholderBlock) -> NodeId {
        let element = self.document.create_element("span");
        let class = format!("{BLOCK_CLASS} {}", block.shape.class_name());
        self.document.set_attribute(element, "class", &class);
        self.document
            .set_attribute(element, PLACEHOLDER_ATTRIBUTE, block.shape.name());
        self.document
            .set_attribute(element, "style", &block.style_text());
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;
    use skeleton_style::{Display, InlineStyleResolver};

    #[test]
    fn visibility_floor_needs_both_dimensions_small() {
        assert!(is_rendered(&StyleSnapshot::sized(3.0, 20.0)));
        assert!(is_rendered(&StyleSnapshot::sized(20.0, 3.0)));
        assert!(!is_rendered(&StyleSnapshot::sized(3.9, 3.9)));
        assert!(!is_rendered(&StyleSnapshot::not_rendered()));
    }

    #[test]
    fn layout_mode_from_display() {
        let mut snapshot = StyleSnapshot::sized(10.0, 10.0);
        assert_eq!(layout_mode(&snapshot), "block");
        snapshot.display = Display::Flex;
        assert_eq!(layout_mode(&snapshot), "flex-row");
        snapshot.flex_direction = "column-reverse".to_owned();
        assert_eq!(layout_mode(&snapshot), "flex-column");
        snapshot.display = Display::InlineGrid;
        assert_eq!(layout_mode(&snapshot), "grid");
        snapshot.display = Display::InlineBlock;
        assert_eq!(layout_mode(&snapshot), "inline");
    }

    #[test]
    fn removed_node_interrupts_but_keeps_root_state() -> Result<(), Error> {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut document = Document::parse_html(
            r#"<div id="root" style="width: 200px"><p id="a">one</p><p id="b">two</p></div>"#,
        )?;
        let root = document
            .element_by_id("root")
            .ok_or_else(|| anyhow!("missing root"))?;
        let gone = document
            .element_by_id("b")
            .ok_or_else(|| anyhow!("missing paragraph"))?;
        let resolver = InlineStyleResolver::default();
        let options = SkeletonOptions::default().with_seed(5);
        let mut cache = StateCache::new();
        let mut rng = StdRng::seed_from_u64(5);

        let (_, reverted) = prepare(&mut document, root, &options, &resolver, &mut cache)?;
        assert_eq!(reverted, 0);
        document.remove_subtree(gone);

        let mut walker = Walker::new(&mut document, &resolver, &options, &mut rng, 1);
        let outcome = walker.visit(gone, 1);
        let report = walker.finish(root, outcome);

        assert!(matches!(report.diagnostic, Some(Diagnostic::Interrupted(_))));
        assert!(is_active(&document, root));
        assert!(cache.has(&document, root));
        Ok(())
    }
}
