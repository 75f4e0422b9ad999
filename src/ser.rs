//! TOML rendering.
//!
//! This module provides the [`Serializer`] that writes a document tree back
//! out in TOML syntax.
//!
//! ## Layout
//!
//! - The root writes no header; its entries start at indent level 0
//! - A table writes `[dotted.path]` and then its entries one level deeper
//! - A table array writes `[[dotted.path]]` once per element, each followed
//!   by that element's entries
//! - Within a table, plain entries come first and sub-tables after, each
//!   group in insertion order, so a value can never end up under the wrong
//!   header
//! - Lists and inline tables are written on one line: `[ 1, 2 ]`,
//!   `{ x = 1, y = 2 }`
//!
//! Floats keep the number of fractional digits they were written with and
//! datetimes keep their written offset.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use toml_tree::{init, saw_table, to_string, Node};
//!
//! let mut root = init();
//! root.insert("title", Node::from("TOML Example")).unwrap();
//! let mut db = saw_table(&mut root, "database").unwrap();
//! db.insert("ports", Node::list(vec![Node::from(8001), Node::from(8002)]).unwrap())
//!     .unwrap();
//! db.insert("temp", Node::float(79.5, 1)).unwrap();
//!
//! assert_eq!(
//!     to_string(&root).unwrap(),
//!     "title = \"TOML Example\"\n[database]\n\tports = [ 8001, 8002 ]\n\ttemp = 79.5\n"
//! );
//! ```

use crate::{DumpOptions, Node, Result, TableMap, Value};
use std::io::Write;

/// Writes documents as TOML into any [`std::io::Write`] sink.
pub struct Serializer<'o, W> {
    writer: W,
    options: &'o DumpOptions,
}

impl<'o, W: Write> Serializer<'o, W> {
    pub fn new(writer: W, options: &'o DumpOptions) -> Self {
        Serializer { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the whole document below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink fails.
    pub fn serialize_document(&mut self, root: &Node) -> Result<()> {
        debug_assert!(root.is_root(), "dump on a {} node", root.kind());
        let mut path = Vec::new();
        match root.as_table() {
            Some(map) => self.write_body(map, &mut path, 0),
            None => Ok(()),
        }
    }

    fn write_indent(&mut self, level: usize) -> Result<()> {
        for _ in 0..level {
            self.writer.write_all(self.options.indent.as_bytes())?;
        }
        Ok(())
    }

    fn write_body(&mut self, map: &TableMap, path: &mut Vec<String>, level: usize) -> Result<()> {
        for (key, child) in map.iter().filter(|(_, child)| !is_section(child)) {
            self.write_indent(level)?;
            write_key(&mut self.writer, key)?;
            self.writer.write_all(b" = ")?;
            self.write_inline(child)?;
            self.writer.write_all(b"\n")?;
        }

        for (key, child) in map.iter().filter(|(_, child)| is_section(child)) {
            path.push(quote_key(key));
            match &child.value {
                Value::Table(sub) => {
                    self.write_header(level, "[", path, "]")?;
                    self.write_body(sub, path, level + 1)?;
                }
                Value::TableArray(tables) => {
                    for table in tables {
                        self.write_header(level, "[[", path, "]]")?;
                        if let Some(sub) = table.as_table() {
                            self.write_body(sub, path, level + 1)?;
                        }
                    }
                }
                Value::Root(_)
                | Value::List(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::String(_)
                | Value::Date(_)
                | Value::Boolean(_)
                | Value::InlineTable(_) => {}
            }
            path.pop();
        }
        Ok(())
    }

    fn write_header(&mut self, level: usize, open: &str, path: &[String], close: &str) -> Result<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{}{}{}", open, path.join("."), close)?;
        Ok(())
    }

    /// Writes a value in single-line form, as it appears after `key = ` or
    /// inside a list.
    fn write_inline(&mut self, node: &Node) -> Result<()> {
        match &node.value {
            Value::Int(i) => write!(self.writer, "{}", i)?,
            Value::Float(f) => write!(self.writer, "{}", f)?,
            Value::String(s) => {
                if self.options.escape_strings {
                    write_basic_string(&mut self.writer, s)?;
                } else {
                    write!(self.writer, "\"{}\"", s)?;
                }
            }
            Value::Date(dt) => self.writer.write_all(dt.to_rfc3339().as_bytes())?,
            Value::Boolean(b) => write!(self.writer, "{}", b)?,
            Value::List(items) | Value::TableArray(items) => {
                if items.is_empty() {
                    self.writer.write_all(b"[]")?;
                } else {
                    self.writer.write_all(b"[ ")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.writer.write_all(b", ")?;
                        }
                        self.write_inline(item)?;
                    }
                    self.writer.write_all(b" ]")?;
                }
            }
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
                if map.is_empty() {
                    self.writer.write_all(b"{}")?;
                } else {
                    self.writer.write_all(b"{ ")?;
                    for (i, (key, child)) in map.iter().enumerate() {
                        if i > 0 {
                            self.writer.write_all(b", ")?;
                        }
                        write_key(&mut self.writer, key)?;
                        self.writer.write_all(b" = ")?;
                        self.write_inline(child)?;
                    }
                    self.writer.write_all(b" }")?;
                }
            }
        }
        Ok(())
    }
}

/// Standard tables and table arrays get their own header lines.
fn is_section(node: &Node) -> bool {
    matches!(node.value, Value::Table(_) | Value::TableArray(_))
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn quote_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        basic_string(key)
    }
}

fn write_key<W: Write>(writer: &mut W, key: &str) -> Result<()> {
    writer.write_all(quote_key(key).as_bytes())?;
    Ok(())
}

fn write_basic_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    writer.write_all(basic_string(s).as_bytes())?;
    Ok(())
}

/// Quotes `s` as a TOML basic string.
fn basic_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_ascii_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
