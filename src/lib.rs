//! # toml_tree
//!
//! The document model and construction engine behind a TOML reader.
//!
//! A parser drives this crate: every time it recognizes a `[table]` or
//! `[[table.array]]` header it calls [`saw_table`] or [`saw_table_array`],
//! which resolve the dotted path against the tree built so far, create any
//! missing intermediate tables, and hand back the table that subsequent
//! `key = value` lines belong to. Values are attached with
//! [`Node::insert`] and list elements with [`Node::push`]. Once the
//! document is complete it can be searched with [`get`], traversed with
//! [`walk`]/[`dive`], rendered back to TOML with [`dump`] or to typed JSON
//! with [`to_json`], and finally torn down with [`free`].
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{get, init, saw_table, saw_table_array, to_string, Node};
//!
//! let mut root = init();
//! root.insert("title", Node::from("TOML Example")).unwrap();
//!
//! let mut owner = saw_table(&mut root, "owner").unwrap();
//! owner.insert("name", Node::from("Tom")).unwrap();
//!
//! for sku in [738594937, 284758393] {
//!     saw_table_array(&mut root, "products")
//!         .unwrap()
//!         .insert("sku", Node::from(sku))
//!         .unwrap();
//! }
//!
//! assert_eq!(get(&root, "owner.name").and_then(Node::as_str), Some("Tom"));
//! assert_eq!(
//!     to_string(&root).unwrap(),
//!     "title = \"TOML Example\"\n\
//!      [owner]\n\
//!      \tname = \"Tom\"\n\
//!      [[products]]\n\
//!      \tsku = 738594937\n\
//!      [[products]]\n\
//!      \tsku = 284758393\n"
//! );
//! ```
//!
//! ## Building Values with `toml_node!`
//!
//! ```rust
//! use toml_tree::{init, toml_node};
//!
//! let mut root = init();
//! root.insert("ports", toml_node!([8001, 8001, 8002])).unwrap();
//! root.insert("point", toml_node!({ "x": 1, "y": 2 })).unwrap();
//! ```
//!
//! ## Guarantees
//!
//! - Insertion order is preserved everywhere and drives every traversal
//! - A failed construction step leaves the tree unchanged
//! - Teardown and the owned post-order walk use an explicit stack
//! - No `unsafe` code

pub mod build;
pub mod datetime;
pub mod error;
pub mod json;
pub mod lookup;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;
pub mod walk;

pub use build::{saw_table, saw_table_array};
pub use datetime::{Datetime, Offset};
pub use error::{Error, Result};
pub use json::JsonSerializer;
pub use lookup::{get, get_mut};
pub use map::TableMap;
pub use options::DumpOptions;
pub use ser::Serializer;
pub use value::{Float, Node, NodeKind, NodeMut, Value};
pub use walk::{dive, dive_mut, dive_owned, free, walk, walk_mut, FreeStats, Order};

use std::io;

/// Creates an empty document: a root table with no entries.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{init, NodeKind};
///
/// let root = init();
/// assert_eq!(root.kind(), NodeKind::Root);
/// assert!(root.name().is_none());
/// assert!(root.as_table().unwrap().is_empty());
/// ```
#[must_use]
pub fn init() -> Node {
    Node::root()
}

/// Renders a document as TOML into `writer`, with default options.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{dump, init, Node};
///
/// let mut root = init();
/// root.insert("answer", Node::from(42)).unwrap();
///
/// let mut buffer = Vec::new();
/// dump(&root, &mut buffer).unwrap();
/// assert_eq!(buffer, b"answer = 42\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn dump<W>(root: &Node, writer: W) -> Result<()>
where
    W: io::Write,
{
    dump_with_options(root, writer, &DumpOptions::default())
}

/// Renders a document as TOML into `writer` with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn dump_with_options<W>(root: &Node, writer: W, options: &DumpOptions) -> Result<()>
where
    W: io::Write,
{
    let mut serializer = Serializer::new(writer, options);
    serializer.serialize_document(root)
}

/// Renders a document as a TOML string.
///
/// # Errors
///
/// Only fails if rendering itself fails, which a `Vec` sink never causes.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(root: &Node) -> Result<String> {
    to_string_with_options(root, &DumpOptions::default())
}

/// Renders a document as a TOML string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(root: &Node, options: &DumpOptions) -> Result<String> {
    let mut buffer = Vec::new();
    dump_with_options(root, &mut buffer, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

/// Renders `node` and everything below it as typed JSON into `writer`.
///
/// Any node can be rendered, not just the root.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{to_json, Node};
///
/// let mut buffer = Vec::new();
/// to_json(&Node::from(true), &mut buffer).unwrap();
/// assert_eq!(buffer, br#"{"type":"bool","value":"true"}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn to_json<W>(node: &Node, writer: W) -> Result<()>
where
    W: io::Write,
{
    to_json_with_options(node, writer, &DumpOptions::default())
}

/// Renders `node` as typed JSON into `writer` with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails.
pub fn to_json_with_options<W>(node: &Node, writer: W, options: &DumpOptions) -> Result<()>
where
    W: io::Write,
{
    let mut serializer = JsonSerializer::new(writer, options);
    serializer.serialize_node(node)
}

/// Renders `node` as a compact typed-JSON string.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_string(node: &Node) -> Result<String> {
    to_json_string_with_options(node, &DumpOptions::default())
}

/// Renders `node` as a typed-JSON string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_string_with_options(node: &Node, options: &DumpOptions) -> Result<String> {
    let mut buffer = Vec::new();
    to_json_with_options(node, &mut buffer, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}
