//! Source-level entry point: parsed template tree JSON in, rewritten JSON out.
//!
//! The markup parser lives outside this crate. Trees arrive as the JSON it
//! emits and leave in the same shape for the printer; fields this crate does
//! not model are preserved.

use crate::errors::{MigratorError, Result};
use crate::node::Node;
use crate::walker::{transform_tree_with_stats, RewriteStats};

/// Configuration for a single source rewrite
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// Pretty-print the emitted tree
    pub pretty: bool,
    /// Name reported in parse errors
    pub source_name: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            source_name: None,
        }
    }
}

/// Parse a template tree from JSON, rewrite it, and serialize it back
pub fn transform_source(source: &str, config: &TransformConfig) -> Result<(String, RewriteStats)> {
    let mut root = parse_tree(source, config.source_name.as_deref().unwrap_or("<input>"))?;
    let stats = transform_tree_with_stats(&mut root);

    let output = if config.pretty {
        serde_json::to_string_pretty(&root)?
    } else {
        serde_json::to_string(&root)?
    };

    Ok((output, stats))
}

/// Parse a template tree, attributing failures to `path`
pub fn parse_tree(source: &str, path: &str) -> Result<Node> {
    serde_json::from_str(source).map_err(|e| MigratorError::ParseError {
        path: path.to_string(),
        message: e.to_string(),
    })
}
