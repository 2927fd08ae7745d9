//! Template tree shapes handed over by the external markup parser.
//!
//! The engine only cares about element kinds, attribute names and values, and
//! children. Every other field the parser emits (source spans, keyed names,
//! namespace info) is carried through untouched in `extra` so the tree can be
//! handed back to a printer without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the distinguished attribute that accumulates utility classes
pub const CLASS_ATTRIBUTE: &str = "class";

/// Node discriminator, serialized as the parser's `type` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Element,
    Other(String),
}

impl From<String> for NodeKind {
    fn from(kind: String) -> Self {
        if kind == "element" {
            NodeKind::Element
        } else {
            NodeKind::Other(kind)
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Element => "element".to_string(),
            NodeKind::Other(kind) => kind,
        }
    }
}

/// A single markup attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,

    /// `None` for valueless attributes such as `<div fxFlex>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            extra: Map::new(),
        }
    }

    pub fn valueless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            extra: Map::new(),
        }
    }

    /// The attribute a parser produces for a literal `class=""`.
    ///
    /// Used whenever an element needs a class attribute synthesized from nothing.
    pub fn empty_class() -> Self {
        Self::new(CLASS_ATTRIBUTE, "")
    }

    pub fn is_class(&self) -> bool {
        self.name == CLASS_ATTRIBUTE
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// A node of the parsed template tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Present on elements; root, text and comment nodes carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Vec<Attribute>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default)]
    pub children: Vec<Node>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Other("root".to_string()),
            name: None,
            attrs: None,
            value: None,
            children,
            extra: Map::new(),
        }
    }

    pub fn element(name: impl Into<String>, attrs: Vec<Attribute>, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Element,
            name: Some(name.into()),
            attrs: Some(attrs),
            value: None,
            children,
            extra: Map::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Other("text".to_string()),
            name: None,
            attrs: None,
            value: Some(value.into()),
            children: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Look up the first attribute with the given name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.as_ref()?.iter().find(|attr| attr.name == name)
    }

    /// Value of the first `class` attribute, if any
    pub fn class_value(&self) -> Option<&str> {
        self.attribute(CLASS_ATTRIBUTE).map(Attribute::value_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_tree_deserializes() {
        let json = r#"{
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "name": "div",
                    "attrs": [
                        {"name": "fxLayout", "value": "column", "sourceSpan": {"start": 5}},
                        {"name": "fxFlex"}
                    ],
                    "children": [{"type": "text", "value": "hi"}]
                }
            ]
        }"#;

        let root: Node = serde_json::from_str(json).unwrap();
        assert!(!root.is_element());
        assert!(root.attrs.is_none());

        let div = &root.children[0];
        assert!(div.is_element());
        assert_eq!(div.attribute("fxLayout").unwrap().value_str(), "column");
        assert_eq!(div.attribute("fxFlex").unwrap().value, None);
        assert!(div.attribute("fxLayout").unwrap().extra.contains_key("sourceSpan"));
        assert_eq!(div.children[0].kind, NodeKind::Other("text".to_string()));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let json = r#"{"type":"element","name":"span","attrs":[{"name":"id","value":"a","keySpan":1}],"children":[],"startSourceSpan":7}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&node).unwrap();

        assert_eq!(back["startSourceSpan"], 7);
        assert_eq!(back["attrs"][0]["keySpan"], 1);
        assert_eq!(back["type"], "element");
    }

    #[test]
    fn test_empty_class_template() {
        let class = Attribute::empty_class();
        assert!(class.is_class());
        assert_eq!(class.value.as_deref(), Some(""));
    }
}
