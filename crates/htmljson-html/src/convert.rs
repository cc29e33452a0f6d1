//! Copying a parse tree into a simplified tree.
//!
//! Conversion runs in two passes so that neither depends on the call stack:
//!
//! 1. A work list walks the source in pre-order and records every node in a
//!    flat arena together with the arena index of its parent. Pre-order
//!    guarantees a parent's index is smaller than any of its descendants'.
//! 2. The arena is drained from the back. Each node is moved into its parent,
//!    so when a node is reached all of its children are already attached
//!    (in reverse, since the last child is drained first).

use htmljson_common::warning::{clear_warnings, warn_once};
use htmljson_dom::{Node, NodeKind};

use crate::source::SourceNode;

/// Convert the tree rooted at `root` into an owned simplified tree.
///
/// The result has exactly the same shape as the source: one node per source
/// node, children in document order, nothing filtered. A source node of an
/// unrecognized kind becomes [`NodeKind::Unknown`] and is reported once per
/// conversion through the warning channel.
#[must_use]
pub fn convert<N: SourceNode>(root: &N) -> Node {
    // Warnings are deduplicated per document, not per process.
    clear_warnings();
    let mut root_node = shell(root);

    // (node, parent slot); `None` means the parent is the root.
    let mut arena: Vec<(Node, Option<usize>)> = Vec::new();
    let mut work: Vec<(N, Option<usize>)> = root
        .children()
        .into_iter()
        .rev()
        .map(|child| (child, None))
        .collect();

    while let Some((source, parent)) = work.pop() {
        let slot = arena.len();
        arena.push((shell(&source), parent));
        work.extend(
            source
                .children()
                .into_iter()
                .rev()
                .map(|child| (child, Some(slot))),
        );
    }

    while let Some((mut node, parent)) = arena.pop() {
        node.children.reverse();
        match parent {
            Some(index) => arena[index].0.children.push(node),
            None => root_node.children.push(node),
        }
    }
    root_node.children.reverse();
    root_node
}

const COMPONENT: &str = "Convert";

fn unknown_kind_message(data: &str) -> String {
    format!("unrecognized node kind (data {data:?}) converted as unknown")
}

/// Copy one source node's own fields, without children.
fn shell<N: SourceNode>(source: &N) -> Node {
    let data = source.data();
    let kind = source.kind().unwrap_or_else(|| {
        let _ = warn_once(COMPONENT, &unknown_kind_message(&data));
        NodeKind::Unknown
    });
    Node {
        kind,
        data,
        namespace: source.namespace(),
        attributes: source.attributes(),
        children: Vec::new(),
    }
}
