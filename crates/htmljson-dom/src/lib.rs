//! Simplified HTML tree for the htmljson crates.
//!
//! This crate provides the owned, serialization-friendly tree that the
//! converter produces from a parsed document, plus the search and persistence
//! operations that work on it.
//!
//! # Design
//!
//! A [`Node`] owns its attributes and children by value and holds no parent
//! or source back-references, so a converted tree is a plain value that can be
//! cloned, compared, shared across threads, and handed to `serde_json`.
//!
//! The serialized form uses the field names `type`, `data`, `namespace`,
//! `attr` and `child`:
//!
//! ```json
//! {"type":"element","data":"div","namespace":"",
//!  "attr":[{"namespace":"","key":"id","val":"x"}],"child":[]}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Depth-safe JSON encoding and decoding.
pub mod json;
/// Persisting trees as JSON files.
pub mod save;
/// Depth-first search over a tree.
pub mod search;

pub use save::{LoadError, SaveError};
pub use search::{PreOrder, Query, find_all, find_first, search_all_nodes, search_node};

/// What a [`Node`] represents.
///
/// The string form (used for serialization and by [`Query`] kind filters) is
/// the lowercase variant name. [`NodeKind::Unknown`] stands for parser output
/// the converter did not recognize and is written as the empty string, which
/// keeps the serialized schema to the five documented kind names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Character data.
    Text,
    /// The document root.
    Document,
    /// An element; its `data` is the tag name.
    Element,
    /// A comment; its `data` is the comment body.
    Comment,
    /// A DOCTYPE declaration; its `data` is the doctype name.
    Doctype,
    /// A source node kind the converter does not know about.
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Unknown,
}

impl NodeKind {
    /// The serialized name of this kind (`""` for [`NodeKind::Unknown`]).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute namespace prefix (`xlink`, `xml`, ...), usually empty.
    #[serde(default)]
    pub namespace: String,
    /// Attribute name.
    pub key: String,
    /// Attribute value, possibly empty.
    #[serde(default)]
    pub val: String,
}

impl Attribute {
    /// Create an attribute with no namespace.
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            key: key.into(),
            val: val.into(),
        }
    }

    /// Set the attribute's namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// One node of the simplified tree.
///
/// Attribute order and child order are exactly those of the source document.
/// Duplicate attribute keys are kept as they appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// What this node represents.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Tag name, text, comment body, or doctype name depending on `kind`.
    #[serde(default)]
    pub data: String,
    /// Element namespace; empty for plain HTML.
    #[serde(default)]
    pub namespace: String,
    /// Attributes in source order.
    #[serde(rename = "attr", default, deserialize_with = "null_as_empty")]
    pub attributes: Vec<Attribute>,
    /// Children in document order.
    #[serde(rename = "child", default, deserialize_with = "null_as_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a childless node with no namespace and no attributes.
    pub fn new(kind: NodeKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            namespace: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the node's namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute named `key`, if any.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.val.as_str())
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted here, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Iterate over this node and all its descendants in pre-order.
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }
}

// Dropping is done with a work list so very deep trees don't recurse.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Accepts a missing or `null` sequence as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
