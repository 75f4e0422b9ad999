//! The document node model.
//!
//! A document is a tree of [`Node`]s rooted at a single `Root`. Each node
//! pairs an optional name with a [`Value`], the tagged payload. Names exist
//! exactly for direct children of a table; list elements, table-array
//! entries and the root are anonymous.
//!
//! ## Core Types
//!
//! - [`Node`]: a named (or anonymous) position in the tree
//! - [`Value`]: the payload, one variant per TOML kind
//! - [`NodeKind`]: the payload-free tag, used for queries and errors
//! - [`Float`]: a float that remembers how many fractional digits it was written with
//!
//! Containers own their children outright; there are no parent links. The
//! only ways around the tree are [`get`](crate::get) and the walkers in
//! [`walk`](crate::walk).
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{init, Node, NodeKind};
//!
//! let mut root = init();
//! root.insert("title", Node::from("TOML Example")).unwrap();
//! root.insert("pi", Node::float(3.14159, 5)).unwrap();
//!
//! let pi = root.as_table().unwrap().get("pi").unwrap();
//! assert_eq!(pi.kind(), NodeKind::Float);
//! assert_eq!(pi.to_value_string().as_deref(), Some("3.14159"));
//! ```

use crate::{Datetime, Error, Result, TableMap};
use serde::{Serialize, Serializer};
use std::fmt;
use std::mem;
use std::ops::Deref;

/// The closed set of node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Table,
    List,
    Int,
    Float,
    String,
    Date,
    Boolean,
    TableArray,
    InlineTable,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Root => "root table",
            NodeKind::Table => "table",
            NodeKind::List => "array",
            NodeKind::Int => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Date => "datetime",
            NodeKind::Boolean => "boolean",
            NodeKind::TableArray => "table array",
            NodeKind::InlineTable => "inline table",
        };
        f.write_str(name)
    }
}

/// A float together with its written fractional-digit count.
///
/// A finite value with `precision == 0` (an exponent-form source such as
/// `1e10` records no fractional digits) is written in exponent form, so
/// it still reads back as a float rather than an integer.
///
/// # Examples
///
/// ```rust
/// use toml_tree::Float;
///
/// assert_eq!(Float::new(1.5, 3).to_string(), "1.500");
/// assert_eq!(Float::from(0.25).precision, 2);
/// assert_eq!(Float::new(f64::NEG_INFINITY, 1).to_string(), "-inf");
/// assert_eq!(Float::new(1e10, 0).to_string(), "1e10");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Float {
    pub value: f64,
    pub precision: usize,
}

impl Float {
    #[must_use]
    pub const fn new(value: f64, precision: usize) -> Self {
        Float { value, precision }
    }
}

impl From<f64> for Float {
    /// Infers the precision from the shortest representation that round-trips.
    fn from(value: f64) -> Self {
        let precision = if value.is_finite() {
            let text = value.to_string();
            text.find('.').map_or(0, |dot| text.len() - dot - 1).max(1)
        } else {
            1
        };
        Float { value, precision }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_nan() {
            f.write_str("nan")
        } else if self.value.is_infinite() {
            f.write_str(if self.value < 0.0 { "-inf" } else { "inf" })
        } else if self.precision == 0 {
            write!(f, "{:e}", self.value)
        } else {
            write!(f, "{:.*}", self.precision, self.value)
        }
    }
}

/// The payload of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Root(TableMap),
    Table(TableMap),
    List(Vec<Node>),
    Int(i64),
    Float(Float),
    String(String),
    Date(Datetime),
    Boolean(bool),
    TableArray(Vec<Node>),
    InlineTable(TableMap),
}

/// One position in a document tree.
///
/// Nodes are built anonymous; they receive a name when they are inserted
/// into a table and lose it when pushed into a list.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) value: Value,
}

impl Node {
    const fn anonymous(value: Value) -> Self {
        Node { name: None, value }
    }

    /// Creates an empty document root.
    #[must_use]
    pub fn root() -> Self {
        Node::anonymous(Value::Root(TableMap::new()))
    }

    /// Creates an empty table.
    #[must_use]
    pub fn table() -> Self {
        Node::anonymous(Value::Table(TableMap::new()))
    }

    /// Creates an empty inline table.
    #[must_use]
    pub fn inline_table() -> Self {
        Node::anonymous(Value::InlineTable(TableMap::new()))
    }

    /// Creates an empty table array.
    #[must_use]
    pub fn table_array() -> Self {
        Node::anonymous(Value::TableArray(Vec::new()))
    }

    /// Creates an empty list.
    #[must_use]
    pub fn empty_list() -> Self {
        Node::anonymous(Value::List(Vec::new()))
    }

    #[must_use]
    pub fn int(value: i64) -> Self {
        Node::anonymous(Value::Int(value))
    }

    /// Creates a float that renders with `precision` fractional digits.
    #[must_use]
    pub fn float(value: f64, precision: usize) -> Self {
        Node::anonymous(Value::Float(Float::new(value, precision)))
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Node::anonymous(Value::String(value.into()))
    }

    #[must_use]
    pub fn date(value: Datetime) -> Self {
        Node::anonymous(Value::Date(value))
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Node::anonymous(Value::Boolean(value))
    }

    /// The node's key in its parent table, if it has one.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the kind tag of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self.value {
            Value::Root(_) => NodeKind::Root,
            Value::Table(_) => NodeKind::Table,
            Value::List(_) => NodeKind::List,
            Value::Int(_) => NodeKind::Int,
            Value::Float(_) => NodeKind::Float,
            Value::String(_) => NodeKind::String,
            Value::Date(_) => NodeKind::Date,
            Value::Boolean(_) => NodeKind::Boolean,
            Value::TableArray(_) => NodeKind::TableArray,
            Value::InlineTable(_) => NodeKind::InlineTable,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self.value, Value::Root(_))
    }

    /// Returns `true` for a standard (header-declared or auto-created) table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self.value, Value::Table(_))
    }

    /// Returns `true` for any node with a key/value payload: root, table or inline table.
    #[inline]
    #[must_use]
    pub const fn is_table_like(&self) -> bool {
        matches!(
            self.value,
            Value::Root(_) | Value::Table(_) | Value::InlineTable(_)
        )
    }

    /// Returns `true` for leaf kinds (no children).
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self.value,
            Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Date(_) | Value::Boolean(_)
        )
    }

    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<Float> {
        match self.value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&Datetime> {
        match &self.value {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the key/value children of a root, table or inline table.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&TableMap> {
        match &self.value {
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut TableMap> {
        match &mut self.value {
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements of a list or table array.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        match &self.value {
            Value::List(items) | Value::TableArray(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.value {
            Value::List(items) | Value::TableArray(items) => Some(items),
            _ => None,
        }
    }

    /// Renders a scalar's value as text, using the native serializer's rules.
    ///
    /// Strings come back verbatim, without quotes. Containers return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Datetime, Node};
    ///
    /// assert_eq!(Node::from(-7).to_value_string().as_deref(), Some("-7"));
    /// assert_eq!(Node::float(2.0, 3).to_value_string().as_deref(), Some("2.000"));
    /// assert_eq!(Node::from("a \"b\"").to_value_string().as_deref(), Some("a \"b\""));
    /// assert_eq!(Node::table().to_value_string(), None);
    ///
    /// let dt = Datetime::parse_from_rfc3339("1979-05-27T07:32:00Z").unwrap();
    /// assert_eq!(Node::from(dt).to_value_string().as_deref(), Some("1979-05-27T07:32:00Z"));
    /// ```
    #[must_use]
    pub fn to_value_string(&self) -> Option<String> {
        match &self.value {
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Date(dt) => Some(dt.to_rfc3339()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Root(_)
            | Value::Table(_)
            | Value::List(_)
            | Value::TableArray(_)
            | Value::InlineTable(_) => None,
        }
    }
}

/// A mutable handle to a node that lives inside a document.
///
/// Every API that lets a caller change a placed node ([`saw_table`],
/// [`Node::insert`], [`get_mut`], the mutable walkers) hands out one of
/// these instead of `&mut Node`. Reads go through `Deref<Target = Node>`;
/// writes are limited to operations that keep the node's name and kind,
/// so a table key and its child's name can never drift apart.
///
/// [`saw_table`]: crate::saw_table
/// [`get_mut`]: crate::get_mut
///
/// ```compile_fail
/// use toml_tree::{get_mut, init, Node};
///
/// let mut root = init();
/// root.insert("a", Node::from(1)).unwrap();
/// *get_mut(&mut root, "a").unwrap() = Node::from(2);
/// ```
pub struct NodeMut<'a> {
    node: &'a mut Node,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(node: &'a mut Node) -> Self {
        NodeMut { node }
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node {
        self.node
    }

    /// Swaps in the payload of `node` and returns the previous payload as an
    /// anonymous node. The name stays where it is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConflict`] if `node` is of a different kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{get, get_mut, init, Node};
    ///
    /// let mut root = init();
    /// root.insert("port", Node::from(8080)).unwrap();
    ///
    /// let old = get_mut(&mut root, "port").unwrap().replace(Node::from(9090)).unwrap();
    /// assert_eq!(old.as_int(), Some(8080));
    /// assert_eq!(get(&root, "port").and_then(Node::name), Some("port"));
    /// assert!(get_mut(&mut root, "port").unwrap().replace(Node::from("x")).is_err());
    /// ```
    pub fn replace(&mut self, node: Node) -> Result<Node> {
        let (current, incoming) = (self.node.kind(), node.kind());
        if current != incoming {
            return Err(Error::type_conflict(
                self.node.name().unwrap_or_default(),
                incoming,
                current,
            ));
        }
        let previous = mem::replace(&mut self.node.value, node.value);
        Ok(Node::anonymous(previous))
    }

    /// Mutable access to the children of a root, table or inline table.
    pub fn as_table_mut(&mut self) -> Option<&mut TableMap> {
        self.node.as_table_mut()
    }
}

impl Deref for NodeMut<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeMut").field(&*self.node).finish()
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.value {
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::List(items) | Value::TableArray(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(f.value),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(dt) => dt.serialize(serializer),
            Value::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

// From implementations for creating scalar nodes from primitives
impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::boolean(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::int(i64::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::int(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::anonymous(Value::Float(Float::from(value)))
    }
}

impl From<Float> for Node {
    fn from(value: Float) -> Self {
        Node::anonymous(Value::Float(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::string(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::string(value)
    }
}

impl From<Datetime> for Node {
    fn from(value: Datetime) -> Self {
        Node::date(value)
    }
}
