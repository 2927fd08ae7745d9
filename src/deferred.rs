//! Class mutations that must wait for an element's fully merged class list.
//!
//! Some directives cannot decide their utilities from their own value alone:
//! `fxLayout="row inline"` has to rewrite whatever `flex` token ends up on the
//! element, and a stretched cross axis needs to know the final flex direction.
//! Those effects are queued as plain data and interpreted once every directive
//! of the element has contributed its static tokens.

use serde::Serialize;

use crate::class_list::ClassList;

/// A pending mutation of an element's class list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferredTransform {
    /// Replace every `from` token with `to`
    RewriteToken {
        from: &'static str,
        to: &'static str,
    },
    /// Append `if_column` when any of `column_tokens` is present, `otherwise` if not
    AppendByDirection {
        column_tokens: &'static [&'static str],
        if_column: &'static str,
        otherwise: &'static str,
    },
}

impl DeferredTransform {
    pub(crate) fn apply(&self, list: &mut ClassList) {
        match self {
            DeferredTransform::RewriteToken { from, to } => {
                list.replace(from, to);
            }
            DeferredTransform::AppendByDirection {
                column_tokens,
                if_column,
                otherwise,
            } => {
                let utility = if column_tokens.iter().any(|token| list.contains(token)) {
                    if_column
                } else {
                    otherwise
                };
                list.extend([*utility]);
            }
        }
    }
}

/// Transforms registered while folding one element, in registration order.
///
/// The queue is owned by a single fold and consumed by [`DeferredQueue::drain_into`],
/// so nothing can leak from one element into the next.
#[derive(Debug, Default, Serialize)]
pub struct DeferredQueue {
    transforms: Vec<DeferredTransform>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: DeferredTransform) {
        self.transforms.push(transform);
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn as_slice(&self) -> &[DeferredTransform] {
        &self.transforms
    }

    /// Apply every queued transform to `list` in order, leaving the queue empty
    pub fn drain_into(&mut self, list: &mut ClassList) {
        for transform in self.transforms.drain(..) {
            list.apply(&transform);
        }
    }
}

impl Extend<DeferredTransform> for DeferredQueue {
    fn extend<I: IntoIterator<Item = DeferredTransform>>(&mut self, iter: I) {
        self.transforms.extend(iter);
    }
}
