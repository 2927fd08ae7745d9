//! Rewrites Angular Flex-Layout directives (`fxLayout`, `fxFlex`, `fxHide`, ...)
//! on a parsed template tree into equivalent Tailwind CSS utility classes.
//!
//! ```
//! use fxlayout_migrator::{transform_tree, Attribute, Node};
//!
//! let mut root = Node::root(vec![Node::element(
//!     "div",
//!     vec![Attribute::new("class", "card"), Attribute::new("fxShow", "false")],
//!     vec![],
//! )]);
//!
//! transform_tree(&mut root);
//! assert_eq!(root.children[0].class_value(), Some("card hidden"));
//! ```

pub mod class_list;
pub mod config;
pub mod deferred;
pub mod directive;
pub mod errors;
pub mod folder;
pub mod manifest;
pub mod node;
pub mod transform;
pub mod walker;

#[cfg(feature = "cli")]
pub mod args;
#[cfg(feature = "cli")]
pub mod pipeline;

pub use class_list::ClassList;
pub use config::{MigratorConfig, OutputConfig, SecurityConfig};
pub use deferred::{DeferredQueue, DeferredTransform};
pub use directive::{BoundDirective, Directive, Effect};
pub use errors::{MigratorError, Result};
pub use folder::fold_attributes;
pub use manifest::{Manifest, ManifestBuilder};
pub use node::{Attribute, Node, NodeKind, CLASS_ATTRIBUTE};
pub use transform::{parse_tree, transform_source, TransformConfig};
pub use walker::{transform_tree, transform_tree_with_stats, RewriteStats};

#[cfg(feature = "cli")]
pub use args::{Cli, Commands, PipeArgs, RewriteArgs};
#[cfg(feature = "cli")]
pub use pipeline::{handle_pipe_command, rewrite, PerformanceStats, RewriteResult, RewrittenFile};
