//! Ordered table storage.
//!
//! [`TableMap`] is the payload of every `Root`, `Table` and `InlineTable`
//! node. It wraps an [`IndexMap`] so that iteration follows insertion order,
//! which is also the order both serializers emit entries in.
//!
//! The map key and the child's own [`Node::name`] are always the same string;
//! entries only get in through [`TableMap::try_insert`] and friends, which set
//! the name on the way in.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Node, TableMap};
//!
//! let mut map = TableMap::new();
//! map.try_insert("name", Node::from("Alice")).unwrap();
//! map.try_insert("age", Node::from(30)).unwrap();
//!
//! let keys: Vec<_> = map.keys().map(String::as_str).collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! assert_eq!(map.get("name").and_then(|n| n.name()), Some("name"));
//! ```

use crate::{Error, Node, NodeKind, NodeMut, Result};
use indexmap::IndexMap;

/// An insertion-ordered map from key to named child node.
///
/// There is no `FromIterator`; collecting pairs would skip the key checks.
///
/// ```compile_fail
/// use toml_tree::{Node, TableMap};
///
/// let map: TableMap = vec![(String::new(), Node::from(1))].into_iter().collect();
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableMap(IndexMap<String, Node>);

impl TableMap {
    /// Creates an empty `TableMap`.
    #[must_use]
    pub fn new() -> Self {
        TableMap(IndexMap::new())
    }

    /// Creates an empty `TableMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TableMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts `node` under `name`, naming the node after its key.
    ///
    /// Unlike a plain map insert this never replaces: an existing key is a
    /// [`Error::DuplicateDeclaration`].
    ///
    /// # Errors
    ///
    /// - [`Error::TypeConflict`] if `node` is a document root
    /// - [`Error::EmptyKeySegment`] if `name` is empty
    /// - [`Error::DuplicateDeclaration`] if `name` is already present
    /// - [`Error::AllocationFailure`] if the map cannot grow
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Node, TableMap};
    ///
    /// let mut map = TableMap::new();
    /// assert!(map.try_insert("key", Node::from(42)).is_ok());
    /// assert!(map.try_insert("key", Node::from(43)).is_err());
    /// assert_eq!(map.get("key").and_then(|n| n.as_int()), Some(42));
    /// ```
    pub fn try_insert(&mut self, name: &str, node: Node) -> Result<NodeMut<'_>> {
        self.insert_node(name, node).map(NodeMut::new)
    }

    pub(crate) fn insert_node(&mut self, name: &str, mut node: Node) -> Result<&mut Node> {
        if node.is_root() {
            return Err(Error::type_conflict(name, NodeKind::Table, NodeKind::Root));
        }
        if name.is_empty() {
            return Err(Error::empty_key(name));
        }
        if self.0.contains_key(name) {
            return Err(Error::duplicate(name));
        }
        self.0.try_reserve(1)?;
        node.name = Some(name.to_string());
        let (index, _) = self.0.insert_full(name.to_string(), node);
        Ok(&mut self.0[index])
    }

    /// Returns a reference to the child named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Returns a mutable handle to the child named `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<NodeMut<'_>> {
        self.0.get_mut(key).map(NodeMut::new)
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns `true` if a child named `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the children, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    pub(crate) fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Node> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-child pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl IntoIterator for TableMap {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TableMap {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
