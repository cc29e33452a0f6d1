//! Depth-first search over a simplified tree.
//!
//! Both operations walk the tree in pre-order (a node before its children,
//! children left to right) and include the starting node itself as a
//! candidate. Traversal uses an explicit stack, so search depth is bounded by
//! heap memory rather than the call stack.
//!
//! # Matching
//!
//! A [`Query`] holds up to five filters. An unset filter always matches; a set
//! filter must match by exact, case-sensitive string equality. The attribute
//! key and attribute value filters are checked against the attribute list
//! independently: a node with `id="x" class="y"` matches `key = "id"` together
//! with `val = "y"` even though no single attribute carries both. Callers that
//! need a key/value pair should check [`Node::attr`] on the results.

use crate::{Node, NodeKind};

/// Pre-order iterator over a subtree.
///
/// Yields the starting node first, then each child subtree from left to right.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    /// Start a traversal at `root`.
    #[must_use]
    pub fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// An AND-combined predicate over a node's kind, data, namespace and
/// attributes.
///
/// ```
/// use htmljson_dom::{Attribute, Node, NodeKind, Query};
///
/// let div = Node::new(NodeKind::Element, "div").with_attribute(Attribute::new("id", "x"));
/// assert!(Query::new().kind(NodeKind::Element).attr_key("id").matches(&div));
/// assert!(!Query::new().data("p").matches(&div));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    kind: Option<String>,
    data: Option<String>,
    namespace: Option<String>,
    attr_key: Option<String>,
    attr_val: Option<String>,
}

impl Query {
    /// A query with every filter unset; it matches any node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from five raw filter strings, where an empty string
    /// leaves that filter unset.
    ///
    /// `kind` is compared against [`NodeKind::as_str`], so an unrecognized
    /// name simply matches nothing.
    #[must_use]
    pub fn from_filters(kind: &str, data: &str, namespace: &str, key: &str, val: &str) -> Self {
        Self {
            kind: non_empty(kind),
            data: non_empty(data),
            namespace: non_empty(namespace),
            attr_key: non_empty(key),
            attr_val: non_empty(val),
        }
    }

    /// Require the node's kind.
    ///
    /// Unlike an empty string in [`Query::from_filters`], passing
    /// [`NodeKind::Unknown`] here selects unknown nodes.
    #[must_use]
    pub fn kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind.as_str().to_owned());
        self
    }

    /// Require the node's data (tag name, text, ...).
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Require the node's namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Require some attribute with this key.
    #[must_use]
    pub fn attr_key(mut self, key: impl Into<String>) -> Self {
        self.attr_key = Some(key.into());
        self
    }

    /// Require some attribute with this value, under any key.
    #[must_use]
    pub fn attr_val(mut self, val: impl Into<String>) -> Self {
        self.attr_val = Some(val.into());
        self
    }

    /// Whether no filter is set.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.kind.is_none()
            && self.data.is_none()
            && self.namespace.is_none()
            && self.attr_key.is_none()
            && self.attr_val.is_none()
    }

    /// Whether `node` satisfies every set filter.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        if self.kind.as_deref().is_some_and(|k| node.kind.as_str() != k) {
            return false;
        }
        if self.data.as_deref().is_some_and(|d| node.data != d) {
            return false;
        }
        if self.namespace.as_deref().is_some_and(|ns| node.namespace != ns) {
            return false;
        }
        // Key and value are looked up separately, not as a pair.
        if let Some(key) = &self.attr_key
            && !node.attributes.iter().any(|a| &a.key == key)
        {
            return false;
        }
        if let Some(val) = &self.attr_val
            && !node.attributes.iter().any(|a| &a.val == val)
        {
            return false;
        }
        true
    }
}

fn non_empty(filter: &str) -> Option<String> {
    (!filter.is_empty()).then(|| filter.to_owned())
}

/// First node in pre-order under (and including) `root` that matches `query`.
#[must_use]
pub fn find_first<'a>(query: &Query, root: &'a Node) -> Option<&'a Node> {
    root.pre_order().find(|node| query.matches(node))
}

/// Every node under (and including) `root` that matches `query`, in pre-order.
///
/// Returns an empty vector when nothing matches.
#[must_use]
pub fn find_all<'a>(query: &Query, root: &'a Node) -> Vec<&'a Node> {
    root.pre_order().filter(|node| query.matches(node)).collect()
}

/// [`find_first`] taking the five raw filter strings (empty = any).
#[must_use]
pub fn search_node<'a>(
    kind: &str,
    data: &str,
    namespace: &str,
    key: &str,
    val: &str,
    root: &'a Node,
) -> Option<&'a Node> {
    find_first(&Query::from_filters(kind, data, namespace, key, val), root)
}

/// [`find_all`] taking the five raw filter strings (empty = any).
#[must_use]
pub fn search_all_nodes<'a>(
    kind: &str,
    data: &str,
    namespace: &str,
    key: &str,
    val: &str,
    root: &'a Node,
) -> Vec<&'a Node> {
    find_all(&Query::from_filters(kind, data, namespace, key, val), root)
}
