//! Header-driven document construction.
//!
//! A parser feeds the document one event at a time, in source order:
//!
//! - `[a.b.c]` → [`saw_table`], which returns the table later key/value
//!   lines belong to
//! - `[[a.b]]` → [`saw_table_array`], which appends a fresh table to the
//!   `a.b` array and returns it
//! - `key = value` → [`Node::insert`] on the current table
//! - array elements → [`Node::push`] on the list being built
//!
//! Missing ancestors on a header path are created as empty tables
//! (auto-vivification). A header whose whole path already existed is a
//! duplicate; a path running into a non-table is a kind conflict. Nothing
//! here panics on bad input: every rule violation comes back as an
//! [`Error`] and the caller decides whether to keep going.
//!
//! The returned tables are [`NodeMut`] handles. They can take new entries
//! but cannot be renamed or turned into something else.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{get, init, saw_table, saw_table_array, Node};
//!
//! let mut root = init();
//!
//! // [servers.alpha]
//! let mut alpha = saw_table(&mut root, "servers.alpha").unwrap();
//! alpha.insert("ip", Node::from("10.0.0.1")).unwrap();
//!
//! // [[products]] twice
//! saw_table_array(&mut root, "products").unwrap().insert("sku", Node::from(1)).unwrap();
//! saw_table_array(&mut root, "products").unwrap().insert("sku", Node::from(2)).unwrap();
//!
//! assert!(get(&root, "servers").unwrap().is_table());
//! assert_eq!(get(&root, "products").unwrap().as_array().unwrap().len(), 2);
//! ```

use crate::{Error, Node, NodeKind, NodeMut, Result, Value};
use log::{debug, trace};

/// Declares the table `dotted` (a `[dotted]` header) and returns it.
///
/// Each missing segment is created as an empty table. An intermediate
/// segment naming a table array resolves to that array's most recent table.
/// The missing tail of the path is assembled before anything is attached,
/// so a failed call leaves the document exactly as it was.
///
/// # Errors
///
/// - [`Error::EmptyKeySegment`] if any segment of `dotted` is empty
/// - [`Error::TypeConflict`] if a segment exists but is not a table
/// - [`Error::DuplicateDeclaration`] if the whole path already existed
/// - [`Error::AllocationFailure`] if a table cannot grow
///
/// # Examples
///
/// ```rust
/// use toml_tree::{init, saw_table, Error, Node};
///
/// let mut root = init();
/// root.insert("a", Node::from(1)).unwrap();
///
/// assert!(matches!(saw_table(&mut root, "a"), Err(Error::TypeConflict { .. })));
/// assert!(matches!(saw_table(&mut root, "b."), Err(Error::EmptyKeySegment { .. })));
/// ```
pub fn saw_table<'a>(root: &'a mut Node, dotted: &str) -> Result<NodeMut<'a>> {
    debug_assert!(root.is_root(), "saw_table on a {} node", root.kind());

    let segments = split_path(dotted)?;
    match survey(root, &segments)? {
        Survey::Complete(NodeKind::Table) => {
            debug!("rejected [{}]: declared twice", dotted);
            Err(Error::duplicate(dotted))
        }
        Survey::Complete(kind) => {
            debug!("rejected [{}]: already a {}", dotted, kind);
            Err(Error::type_conflict(dotted, NodeKind::Table, kind))
        }
        Survey::Missing(from) => {
            attach(root, &segments, from, Node::table())?;
            trace!("declared table [{}]", dotted);
            resolve_mut(root, &segments).map(NodeMut::new)
        }
    }
}

/// Handles a `[[dotted]]` header: appends a new table to the array at
/// `dotted` (creating the array if needed) and returns that table.
///
/// # Errors
///
/// - [`Error::EmptyKeySegment`] if any segment of `dotted` is empty
/// - [`Error::TypeConflict`] if an intermediate segment is not a table, or
///   the final one exists and is not a table array
/// - [`Error::AllocationFailure`] if a container cannot grow
///
/// # Examples
///
/// ```rust
/// use toml_tree::{get, init, saw_table_array};
///
/// let mut root = init();
/// for _ in 0..3 {
///     saw_table_array(&mut root, "a.b").unwrap();
/// }
/// assert_eq!(get(&root, "a.b").unwrap().as_array().unwrap().len(), 3);
/// ```
pub fn saw_table_array<'a>(root: &'a mut Node, dotted: &str) -> Result<NodeMut<'a>> {
    debug_assert!(root.is_root(), "saw_table_array on a {} node", root.kind());

    let segments = split_path(dotted)?;
    match survey(root, &segments)? {
        Survey::Complete(NodeKind::TableArray) => {}
        Survey::Complete(kind) => {
            debug!("rejected [[{}]]: already a {}", dotted, kind);
            return Err(Error::type_conflict(dotted, NodeKind::TableArray, kind));
        }
        Survey::Missing(from) => {
            attach(root, &segments, from, Node::table_array())?;
            trace!("declared table array [[{}]]", dotted);
        }
    }

    let tables = resolve_mut(root, &segments)?
        .as_array_mut()
        .ok_or_else(|| Error::type_conflict(dotted, NodeKind::TableArray, NodeKind::Table))?;
    tables.try_reserve(1)?;
    tables.push(Node::table());
    trace!("[[{}]] now holds {} tables", dotted, tables.len());
    let index = tables.len() - 1;
    Ok(NodeMut::new(&mut tables[index]))
}

/// Splits a dotted path, rejecting empty segments before anything is touched.
fn split_path(dotted: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = dotted.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        debug!("rejected header `{}`: empty key segment", dotted);
        return Err(Error::empty_key(dotted));
    }
    Ok(segments)
}

/// How much of a header path is already in the document.
#[derive(Debug, PartialEq)]
enum Survey {
    /// Every segment exists; the last one has this kind.
    Complete(NodeKind),
    /// Segments from this index on have to be created.
    Missing(usize),
}

/// Checks a header path against the document without changing it.
fn survey(root: &Node, segments: &[&str]) -> Result<Survey> {
    let mut place = root;
    for (depth, segment) in segments.iter().enumerate() {
        let Some(child) = place.as_table().and_then(|map| map.get(segment)) else {
            return Ok(Survey::Missing(depth));
        };
        if depth + 1 == segments.len() {
            return Ok(Survey::Complete(child.kind()));
        }
        place = match child.kind() {
            NodeKind::Table => child,
            NodeKind::TableArray => child
                .as_array()
                .and_then(<[Node]>::last)
                .ok_or_else(|| conflict(segments, depth, NodeKind::TableArray))?,
            kind => return Err(conflict(segments, depth, kind)),
        };
    }
    Err(Error::empty_key(""))
}

fn conflict(segments: &[&str], depth: usize, found: NodeKind) -> Error {
    let path = segments[..=depth].join(".");
    debug!("rejected header: [{}] is a {}", path, found);
    Error::type_conflict(&path, NodeKind::Table, found)
}

/// Creates `segments[from..]`, ending in `leaf`, with a single insert into
/// the existing document.
///
/// The new tables are nested off to the side first; if that runs out of
/// memory, nothing has been attached yet.
fn attach(root: &mut Node, segments: &[&str], from: usize, leaf: Node) -> Result<()> {
    let mut chain = leaf;
    for segment in segments[from + 1..].iter().rev() {
        let mut parent = Node::table();
        parent.insert(segment, chain)?;
        chain = parent;
    }

    let parent = resolve_mut(root, &segments[..from])?;
    let kind = parent.kind();
    parent
        .as_table_mut()
        .ok_or_else(|| conflict(segments, from, kind))?
        .insert_node(segments[from], chain)?;

    for depth in from..segments.len() - 1 {
        trace!("auto-vivified table [{}]", segments[..=depth].join("."));
    }
    Ok(())
}

/// Follows a path that is known to exist, stepping into the most recent
/// table of any intermediate table array.
fn resolve_mut<'a>(root: &'a mut Node, segments: &[&str]) -> Result<&'a mut Node> {
    let mut place = root;
    for (depth, segment) in segments.iter().enumerate() {
        let kind = place.kind();
        let child = place
            .as_table_mut()
            .and_then(|map| map.entry_mut(segment))
            .ok_or_else(|| conflict(segments, depth, kind))?;
        place = if depth + 1 < segments.len() && child.kind() == NodeKind::TableArray {
            child
                .as_array_mut()
                .and_then(|tables| tables.last_mut())
                .ok_or_else(|| conflict(segments, depth, NodeKind::TableArray))?
        } else {
            child
        };
    }
    Ok(place)
}

/// Lists hold elements of one class; standard and inline tables share a class.
fn element_class(kind: NodeKind) -> NodeKind {
    match kind {
        NodeKind::Table | NodeKind::InlineTable => NodeKind::InlineTable,
        other => other,
    }
}

impl Node {
    /// Adds `node` to this table under `name` and returns it.
    ///
    /// # Errors
    ///
    /// - [`Error::TypeConflict`] if `self` is not a root, table or inline
    ///   table, or `node` is a root
    /// - [`Error::EmptyKeySegment`] if `name` is empty
    /// - [`Error::DuplicateDeclaration`] if `name` is already taken
    /// - [`Error::AllocationFailure`] if the table cannot grow
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{init, Error, Node};
    ///
    /// let mut root = init();
    /// root.insert("port", Node::from(8080)).unwrap();
    /// let err = root.insert("port", Node::from(8081)).unwrap_err();
    /// assert!(matches!(err, Error::DuplicateDeclaration { .. }));
    /// ```
    pub fn insert(&mut self, name: &str, node: Node) -> Result<NodeMut<'_>> {
        let kind = self.kind();
        match &mut self.value {
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
                map.try_insert(name, node)
            }
            _ => Err(Error::type_conflict(
                self.name.as_deref().unwrap_or_default(),
                NodeKind::Table,
                kind,
            )),
        }
    }

    /// Appends `node` to this list as an anonymous element and returns it.
    ///
    /// Every element must share the class of the first one (integer,
    /// float, string, datetime, boolean, array, or table).
    ///
    /// # Errors
    ///
    /// - [`Error::TypeConflict`] if `self` is not a list, or `node` is a root
    /// - [`Error::HeterogeneousList`] if `node` breaks the element class
    /// - [`Error::AllocationFailure`] if the list cannot grow
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Error, Node};
    ///
    /// let mut list = Node::empty_list();
    /// list.push(Node::from(1)).unwrap();
    /// assert!(matches!(
    ///     list.push(Node::from("string")),
    ///     Err(Error::HeterogeneousList { .. })
    /// ));
    /// assert_eq!(list.as_array().unwrap().len(), 1);
    /// ```
    pub fn push(&mut self, mut node: Node) -> Result<NodeMut<'_>> {
        if node.is_root() {
            return Err(Error::type_conflict(
                self.name().unwrap_or_default(),
                NodeKind::List,
                NodeKind::Root,
            ));
        }
        let kind = self.kind();
        let items = match &mut self.value {
            Value::List(items) => items,
            _ => {
                return Err(Error::type_conflict(
                    self.name.as_deref().unwrap_or_default(),
                    NodeKind::List,
                    kind,
                ))
            }
        };

        if let Some(first) = items.first() {
            if element_class(first.kind()) != element_class(node.kind()) {
                return Err(Error::HeterogeneousList {
                    expected: first.kind(),
                    found: node.kind(),
                });
            }
        }

        items.try_reserve(1)?;
        node.name = None;
        items.push(node);
        let index = items.len() - 1;
        Ok(NodeMut::new(&mut items[index]))
    }

    /// Builds a list from `elements`, applying the same rules as [`Node::push`].
    ///
    /// # Errors
    ///
    /// Returns the first error [`Node::push`] reports.
    pub fn list<I>(elements: I) -> Result<Node>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut list = Node::empty_list();
        for element in elements {
            list.push(element)?;
        }
        Ok(list)
    }
}

impl NodeMut<'_> {
    /// [`Node::insert`] on the handled node.
    ///
    /// # Errors
    ///
    /// See [`Node::insert`].
    pub fn insert(&mut self, name: &str, node: Node) -> Result<NodeMut<'_>> {
        self.node_mut().insert(name, node)
    }

    /// [`Node::push`] on the handled node.
    ///
    /// # Errors
    ///
    /// See [`Node::push`].
    pub fn push(&mut self, node: Node) -> Result<NodeMut<'_>> {
        self.node_mut().push(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get, init};

    #[test]
    fn test_auto_vivification_creates_every_ancestor() {
        let mut root = init();
        saw_table(&mut root, "x.y.z").unwrap();

        for path in ["x", "x.y", "x.y.z"] {
            assert!(get(&root, path).unwrap().is_table(), "{} missing", path);
        }
        assert_eq!(root.as_table().unwrap().len(), 1);
        assert_eq!(get(&root, "x").unwrap().as_table().unwrap().len(), 1);
        assert_eq!(get(&root, "x.y").unwrap().as_table().unwrap().len(), 1);
        assert!(get(&root, "x.y.z").unwrap().as_table().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_table_is_rejected() {
        let mut root = init();
        assert!(saw_table(&mut root, "a").is_ok());
        assert_eq!(saw_table(&mut root, "a").unwrap_err(), Error::duplicate("a"));
    }

    #[test]
    fn test_redeclaring_an_implicit_parent_counts_as_duplicate() {
        let mut root = init();
        saw_table(&mut root, "a.b").unwrap();
        assert_eq!(saw_table(&mut root, "a").unwrap_err(), Error::duplicate("a"));
    }

    #[test]
    fn test_sibling_under_existing_table_is_fine() {
        let mut root = init();
        saw_table(&mut root, "a.b").unwrap();
        saw_table(&mut root, "a.c").unwrap();
        let keys: Vec<_> = get(&root, "a").unwrap().as_table().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_table_over_scalar_is_a_conflict() {
        let mut root = init();
        root.insert("a", Node::from(1)).unwrap();
        assert_eq!(
            saw_table(&mut root, "a").unwrap_err(),
            Error::type_conflict("a", NodeKind::Table, NodeKind::Int)
        );
        assert_eq!(
            saw_table(&mut root, "a.b").unwrap_err(),
            Error::type_conflict("a", NodeKind::Table, NodeKind::Int)
        );
    }

    #[test]
    fn test_scalar_then_subtable_reports_full_prefix() {
        // [fruit] type = "apple" then [fruit.type]
        let mut root = init();
        let mut fruit = saw_table(&mut root, "fruit").unwrap();
        fruit.insert("type", Node::from("apple")).unwrap();

        assert_eq!(
            saw_table(&mut root, "fruit.type").unwrap_err(),
            Error::type_conflict("fruit.type", NodeKind::Table, NodeKind::String)
        );
    }

    #[test]
    fn test_empty_segments_are_rejected_without_mutation() {
        let mut root = init();
        for path in ["", ".a", "a.", "a..b"] {
            assert_eq!(
                saw_table(&mut root, path).unwrap_err(),
                Error::empty_key(path)
            );
            assert_eq!(
                saw_table_array(&mut root, path).unwrap_err(),
                Error::empty_key(path)
            );
        }
        assert!(root.as_table().unwrap().is_empty());
    }

    #[test]
    fn test_table_array_accumulates_in_call_order() {
        let mut root = init();
        for i in 0..3 {
            let mut table = saw_table_array(&mut root, "a.b").unwrap();
            assert!(table.is_table());
            assert_eq!(table.name(), None);
            table.insert("n", Node::from(i)).unwrap();
        }

        let entries = get(&root, "a.b").unwrap().as_array().unwrap();
        let seen: Vec<_> = entries
            .iter()
            .map(|t| t.as_table().unwrap().get("n").unwrap().as_int().unwrap())
            .collect();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_table_array_over_table_is_a_conflict() {
        let mut root = init();
        saw_table(&mut root, "a").unwrap();
        assert_eq!(
            saw_table_array(&mut root, "a").unwrap_err(),
            Error::type_conflict("a", NodeKind::TableArray, NodeKind::Table)
        );
    }

    #[test]
    fn test_table_over_table_array_is_a_conflict() {
        let mut root = init();
        saw_table_array(&mut root, "a").unwrap();
        assert_eq!(
            saw_table(&mut root, "a").unwrap_err(),
            Error::type_conflict("a", NodeKind::Table, NodeKind::TableArray)
        );
    }

    #[test]
    fn test_intermediate_table_array_resolves_to_last_entry() {
        let mut root = init();
        saw_table_array(&mut root, "fruit").unwrap();
        saw_table_array(&mut root, "fruit").unwrap();
        saw_table(&mut root, "fruit.physical")
            .unwrap()
            .insert("color", Node::from("red"))
            .unwrap();

        let fruit = get(&root, "fruit").unwrap().as_array().unwrap();
        assert!(fruit[0].as_table().unwrap().is_empty());
        assert!(fruit[1].as_table().unwrap().contains_key("physical"));
    }

    #[test]
    fn test_nested_table_arrays() {
        let mut root = init();
        saw_table_array(&mut root, "fruit").unwrap();
        saw_table_array(&mut root, "fruit.variety").unwrap();
        saw_table_array(&mut root, "fruit.variety").unwrap();
        saw_table_array(&mut root, "fruit").unwrap();
        saw_table_array(&mut root, "fruit.variety").unwrap();

        let fruit = get(&root, "fruit").unwrap().as_array().unwrap();
        assert_eq!(fruit.len(), 2);
        let variety = |i: usize| fruit[i].as_table().unwrap().get("variety").unwrap();
        assert_eq!(variety(0).as_array().unwrap().len(), 2);
        assert_eq!(variety(1).as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_header_through_inline_table_is_a_conflict() {
        let mut root = init();
        root.insert("point", Node::inline_table()).unwrap();
        assert_eq!(
            saw_table(&mut root, "point.x").unwrap_err(),
            Error::type_conflict("point", NodeKind::Table, NodeKind::InlineTable)
        );
    }

    #[test]
    fn test_insert_requires_a_table() {
        let mut scalar = Node::from(1);
        assert!(matches!(
            scalar.insert("x", Node::from(2)),
            Err(Error::TypeConflict { .. })
        ));

        let mut root = init();
        assert!(matches!(
            root.insert("nested", Node::root()),
            Err(Error::TypeConflict { .. })
        ));
    }

    #[test]
    fn test_push_strips_names_and_checks_classes() {
        let mut list = Node::empty_list();
        let mut named = Node::from(1);
        named.name = Some("x".to_string());
        assert_eq!(list.push(named).unwrap().name(), None);

        assert_eq!(
            list.push(Node::from(1.5)).unwrap_err(),
            Error::HeterogeneousList {
                expected: NodeKind::Int,
                found: NodeKind::Float
            }
        );
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_nested_lists_of_any_content_share_a_class() {
        let ints = Node::list(vec![Node::from(1), Node::from(2)]).unwrap();
        let strings = Node::list(vec![Node::from("a")]).unwrap();
        assert!(Node::list(vec![ints, strings]).is_ok());
    }

    #[test]
    fn test_inline_and_standard_tables_mix_in_lists() {
        assert!(Node::list(vec![Node::inline_table(), Node::table()]).is_ok());
    }

    #[test]
    fn test_push_requires_a_list() {
        let mut table_array = Node::table_array();
        assert!(matches!(
            table_array.push(Node::table()),
            Err(Error::TypeConflict { .. })
        ));
    }

    #[test]
    fn test_header_extends_a_partly_declared_path() {
        let mut root = init();
        saw_table(&mut root, "a.b").unwrap();
        saw_table_array(&mut root, "a.b.c.list")
            .unwrap()
            .insert("n", Node::from(1))
            .unwrap();

        assert!(get(&root, "a.b.c").unwrap().is_table());
        assert_eq!(get(&root, "a.b.c.list").unwrap().as_array().unwrap().len(), 1);
        assert_eq!(get(&root, "a").unwrap().as_table().unwrap().len(), 1);
    }

    #[test]
    fn test_rejected_headers_leave_no_partial_tables() {
        let mut root = init();
        saw_table(&mut root, "a").unwrap().insert("k", Node::from(1)).unwrap();
        let before = root.clone();

        for path in ["a.k.x", "a.k.x.y", "b.c..d", "a.k"] {
            assert!(saw_table(&mut root, path).is_err(), "{} should fail", path);
            assert!(saw_table_array(&mut root, path).is_err(), "{} should fail", path);
        }
        assert_eq!(root, before);
    }

    #[test]
    fn test_survey_reports_the_missing_tail() {
        let mut root = init();
        saw_table(&mut root, "a.b").unwrap();
        assert_eq!(
            survey(&root, &["a", "b", "c", "d"]).unwrap(),
            Survey::Missing(2)
        );
        assert_eq!(
            survey(&root, &["a", "b"]).unwrap(),
            Survey::Complete(NodeKind::Table)
        );
        assert_eq!(survey(&root, &["z"]).unwrap(), Survey::Missing(0));
    }

    #[test]
    fn test_handles_grow_through_insert_and_push() {
        let mut root = init();
        let mut server = saw_table(&mut root, "server").unwrap();
        let mut ports = server.insert("ports", Node::empty_list()).unwrap();
        ports.push(Node::from(80)).unwrap();
        ports.push(Node::from(443)).unwrap();
        assert!(ports.push(Node::from("x")).is_err());

        let ports = get(&root, "server.ports").unwrap().as_array().unwrap();
        assert_eq!(ports.len(), 2);
    }
}
