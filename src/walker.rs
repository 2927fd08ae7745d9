use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::folder::fold_attributes;
use crate::node::Node;

/// Counters collected while rewriting a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Nodes carrying an attribute list that went through the fold
    pub elements_visited: usize,
    /// Plain directives consumed into class utilities
    pub directives_rewritten: usize,
    /// `[fxFlex]`, `[fxHide]` and `[fxShow]` bindings turned into class bindings
    pub bindings_rewritten: usize,
    /// Elements whose attribute list came out of the fold different from how it went in
    pub elements_changed: usize,
    /// Consumed directives by attribute name, in first-seen order
    pub directives: IndexMap<String, usize>,
}

impl RewriteStats {
    pub(crate) fn record_directive(&mut self, name: &str) {
        self.directives_rewritten += 1;
        *self.directives.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Whether the rewrite left every attribute list exactly as it found it
    pub fn is_unchanged(&self) -> bool {
        self.elements_changed == 0
    }
}

/// Rewrite every element of the tree in place and hand the same root back.
pub fn transform_tree(root: &mut Node) -> &mut Node {
    transform_tree_with_stats(root);
    root
}

/// Same as [`transform_tree`], reporting what was rewritten
pub fn transform_tree_with_stats(root: &mut Node) -> RewriteStats {
    let mut stats = RewriteStats::default();
    transform_node(root, &mut stats);
    debug!(
        elements = stats.elements_visited,
        directives = stats.directives_rewritten,
        bindings = stats.bindings_rewritten,
        changed = stats.elements_changed,
        "rewrote template tree"
    );
    stats
}

/// Pre-order walk; only element children are descended into
fn transform_node(node: &mut Node, stats: &mut RewriteStats) {
    if let Some(attributes) = node.attrs.as_mut() {
        stats.elements_visited += 1;
        let before = attributes.clone();
        *attributes = fold_attributes(std::mem::take(attributes), stats);
        if *attributes != before {
            stats.elements_changed += 1;
        }
    }

    for child in node.children.iter_mut().filter(|child| child.is_element()) {
        transform_node(child, stats);
    }
}
