//! Ordered traversal and teardown.
//!
//! One recursion shape serves every pass over a document: roots, tables and
//! inline tables visit their entries in insertion order, lists and table
//! arrays visit their elements in order, and scalars have no children. The
//! only choice is whether the visitor sees a node before its children
//! ([`walk`], pre-order) or after them ([`dive`], post-order).
//!
//! Visitor state lives in the closure's captures.
//!
//! ```rust
//! use toml_tree::{dive, init, saw_table, walk, Node};
//!
//! let mut root = init();
//! saw_table(&mut root, "a.b").unwrap().insert("c", Node::from(1)).unwrap();
//!
//! let mut pre = Vec::new();
//! walk(&root, |node| pre.push(node.name().unwrap_or("<root>").to_string()));
//! assert_eq!(pre, ["<root>", "a", "b", "c"]);
//!
//! let mut post = Vec::new();
//! dive(&root, |node| post.push(node.name().unwrap_or("<root>").to_string()));
//! assert_eq!(post, ["c", "b", "a", "<root>"]);
//! ```

use crate::{Node, NodeMut, Value};
use log::debug;
use std::mem;

/// When the visitor runs relative to a node's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Pre,
    Post,
}

/// Visits every node below and including `node`, in the given order.
pub fn traverse<F>(node: &Node, order: Order, visitor: &mut F)
where
    F: FnMut(&Node),
{
    if order == Order::Pre {
        visitor(node);
    }
    match &node.value {
        Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
            for child in map.values() {
                traverse(child, order, visitor);
            }
        }
        Value::List(items) | Value::TableArray(items) => {
            for child in items {
                traverse(child, order, visitor);
            }
        }
        Value::Int(_)
        | Value::Float(_)
        | Value::String(_)
        | Value::Date(_)
        | Value::Boolean(_) => {}
    }
    if order == Order::Post {
        visitor(node);
    }
}

/// Like [`traverse`], but the visitor gets a [`NodeMut`] for each node.
///
/// In pre-order the children are read after the visitor returns, so a
/// visitor that replaces the current node's payload changes what gets
/// visited next.
pub fn traverse_mut<F>(node: &mut Node, order: Order, visitor: &mut F)
where
    F: FnMut(NodeMut<'_>),
{
    if order == Order::Pre {
        visitor(NodeMut::new(node));
    }
    match &mut node.value {
        Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
            for child in map.values_mut() {
                traverse_mut(child, order, visitor);
            }
        }
        Value::List(items) | Value::TableArray(items) => {
            for child in items.iter_mut() {
                traverse_mut(child, order, visitor);
            }
        }
        Value::Int(_)
        | Value::Float(_)
        | Value::String(_)
        | Value::Date(_)
        | Value::Boolean(_) => {}
    }
    if order == Order::Post {
        visitor(NodeMut::new(node));
    }
}

/// Pre-order traversal: each node is visited before its children.
pub fn walk<F>(node: &Node, mut visitor: F)
where
    F: FnMut(&Node),
{
    traverse(node, Order::Pre, &mut visitor);
}

/// Post-order traversal: each node is visited after its children.
pub fn dive<F>(node: &Node, mut visitor: F)
where
    F: FnMut(&Node),
{
    traverse(node, Order::Post, &mut visitor);
}

/// Pre-order traversal with mutable access.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{get, init, walk_mut, Node};
///
/// let mut root = init();
/// root.insert("a", Node::from(1)).unwrap();
/// root.insert("b", Node::from(2)).unwrap();
///
/// walk_mut(&mut root, |mut node| {
///     if let Some(i) = node.as_int() {
///         node.replace(Node::from(i * 10)).unwrap();
///     }
/// });
/// assert_eq!(get(&root, "b").and_then(Node::as_int), Some(20));
/// ```
pub fn walk_mut<F>(node: &mut Node, mut visitor: F)
where
    F: FnMut(NodeMut<'_>),
{
    traverse_mut(node, Order::Pre, &mut visitor);
}

/// Post-order traversal with mutable access.
pub fn dive_mut<F>(node: &mut Node, mut visitor: F)
where
    F: FnMut(NodeMut<'_>),
{
    traverse_mut(node, Order::Post, &mut visitor);
}

/// Post-order traversal that hands each node over by value.
///
/// Every node reaches the visitor already detached from its parent and with
/// its own children removed (they were visited first), so the visitor owns
/// it outright. Runs on an explicit stack, so depth is not limited by the
/// call stack.
pub fn dive_owned<F>(node: Node, mut visitor: F)
where
    F: FnMut(Node),
{
    enum Frame {
        Enter(Node),
        Leave(Node),
    }

    let mut stack = vec![Frame::Enter(node)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(mut node) => {
                let children = detach_children(&mut node);
                stack.push(Frame::Leave(node));
                stack.extend(children.into_iter().rev().map(Frame::Enter));
            }
            Frame::Leave(node) => visitor(node),
        }
    }
}

/// Empties a container in place and returns its former children in order.
fn detach_children(node: &mut Node) -> Vec<Node> {
    match &mut node.value {
        Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
            mem::take(map).into_iter().map(|(_, child)| child).collect()
        }
        Value::List(items) | Value::TableArray(items) => mem::take(items),
        Value::Int(_)
        | Value::Float(_)
        | Value::String(_)
        | Value::Date(_)
        | Value::Boolean(_) => Vec::new(),
    }
}

/// What [`free`] released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeStats {
    /// Nodes released, the root included.
    pub nodes: usize,
    /// Owned strings released: node names plus string payloads.
    pub strings: usize,
}

/// Consumes a document, releasing every node children-first and the root last.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{free, init, Node};
///
/// let mut root = init();
/// root.insert("name", Node::from("Tom")).unwrap();
///
/// let stats = free(root);
/// assert_eq!(stats.nodes, 2);
/// assert_eq!(stats.strings, 2);
/// ```
pub fn free(root: Node) -> FreeStats {
    debug_assert!(root.is_root(), "free on a {} node", root.kind());

    let mut stats = FreeStats::default();
    dive_owned(root, |node| release(node, &mut stats));
    debug!(
        "freed document: {} nodes, {} strings",
        stats.nodes, stats.strings
    );
    stats
}

fn release(node: Node, stats: &mut FreeStats) {
    let Node { name, value } = node;
    stats.nodes += 1;
    if name.is_some() {
        stats.strings += 1;
    }
    if let Value::String(_) = value {
        stats.strings += 1;
    }
}
