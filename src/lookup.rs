//! Dotted-path lookup.
//!
//! Paths are split on `.` and matched segment by segment against table
//! keys: exact, case-sensitive, no wildcards and no array indexing. Lookup
//! only descends through roots, tables and inline tables; a path that runs
//! into anything else simply misses.

use crate::{Node, NodeMut};

/// Finds the node at `path` below `node`.
///
/// Returns `None` when any segment is missing, including when the path
/// tries to go through a non-table node.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{get, init, saw_table, Node};
///
/// let mut root = init();
/// saw_table(&mut root, "owner")
///     .unwrap()
///     .insert("name", Node::from("Tom"))
///     .unwrap();
///
/// assert_eq!(get(&root, "owner.name").and_then(Node::as_str), Some("Tom"));
/// assert!(get(&root, "owner.Name").is_none());
/// assert!(get(&root, "owner.name.first").is_none());
/// ```
#[must_use]
pub fn get<'a>(node: &'a Node, path: &str) -> Option<&'a Node> {
    path.split('.')
        .try_fold(node, |place, segment| place.as_table()?.get(segment))
}

/// Mutable counterpart of [`get`].
///
/// The result is a [`NodeMut`], which can grow the node or swap its payload
/// but cannot rename it or change its kind.
pub fn get_mut<'a>(node: &'a mut Node, path: &str) -> Option<NodeMut<'a>> {
    path.split('.')
        .try_fold(node, |place, segment| place.as_table_mut()?.entry_mut(segment))
        .map(NodeMut::new)
}

impl NodeMut<'_> {
    /// [`get_mut`] below the handled node.
    pub fn get_mut(&mut self, path: &str) -> Option<NodeMut<'_>> {
        get_mut(self.node_mut(), path)
    }
}
