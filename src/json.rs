//! JSON rendering in the typed-scalar layout used by TOML test suites.
//!
//! - Tables (the root included) become JSON objects keyed by child name
//! - Table arrays become JSON arrays of those objects
//! - Lists become `{"type": "array", "value": [...]}`
//! - Scalars become `{"type": <kind>, "value": "<text>"}`, where the value
//!   is always a JSON string holding the same text the TOML serializer
//!   would write (strings unquoted)
//!
//! Scalar kinds are `integer`, `float`, `string`, `datetime` and `bool`.
//!
//! ```rust
//! use toml_tree::{init, to_json_string, Node};
//!
//! let mut root = init();
//! root.insert("n", Node::from(1)).unwrap();
//! assert_eq!(
//!     to_json_string(&root).unwrap(),
//!     r#"{"n":{"type":"integer","value":"1"}}"#
//! );
//! ```

use crate::{DumpOptions, Node, Result, TableMap, Value};
use std::io::Write;

/// Writes documents as JSON into any [`std::io::Write`] sink.
pub struct JsonSerializer<'o, W> {
    writer: W,
    options: &'o DumpOptions,
}

impl<'o, W: Write> JsonSerializer<'o, W> {
    pub fn new(writer: W, options: &'o DumpOptions) -> Self {
        JsonSerializer { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes `node` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink fails.
    pub fn serialize_node(&mut self, node: &Node) -> Result<()> {
        self.write_node(node, 0)?;
        if self.options.pretty {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_node(&mut self, node: &Node, level: usize) -> Result<()> {
        match &node.value {
            Value::Root(map) | Value::Table(map) | Value::InlineTable(map) => {
                self.write_object(map, level)
            }
            Value::TableArray(items) => self.write_array(items, level),
            Value::List(items) => {
                self.writer.write_all(b"{")?;
                self.write_newline(level + 1)?;
                self.write_field("type", "array")?;
                self.writer.write_all(b",")?;
                self.write_newline(level + 1)?;
                self.write_key("value")?;
                self.write_array(items, level + 1)?;
                self.write_newline(level)?;
                self.writer.write_all(b"}")?;
                Ok(())
            }
            Value::Int(i) => self.write_scalar("integer", &i.to_string()),
            Value::Float(f) => self.write_scalar("float", &f.to_string()),
            Value::String(s) => self.write_scalar("string", s),
            Value::Date(dt) => self.write_scalar("datetime", &dt.to_rfc3339()),
            Value::Boolean(b) => self.write_scalar("bool", if *b { "true" } else { "false" }),
        }
    }

    fn write_object(&mut self, map: &TableMap, level: usize) -> Result<()> {
        if map.is_empty() {
            self.writer.write_all(b"{}")?;
            return Ok(());
        }
        self.writer.write_all(b"{")?;
        for (i, (name, child)) in map.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.write_newline(level + 1)?;
            self.write_key(name)?;
            self.write_node(child, level + 1)?;
        }
        self.write_newline(level)?;
        self.writer.write_all(b"}")?;
        Ok(())
    }

    fn write_array(&mut self, items: &[Node], level: usize) -> Result<()> {
        if items.is_empty() {
            self.writer.write_all(b"[]")?;
            return Ok(());
        }
        self.writer.write_all(b"[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.write_newline(level + 1)?;
            self.write_node(item, level + 1)?;
        }
        self.write_newline(level)?;
        self.writer.write_all(b"]")?;
        Ok(())
    }

    fn write_scalar(&mut self, kind: &str, text: &str) -> Result<()> {
        self.writer.write_all(b"{")?;
        self.write_field("type", kind)?;
        let separator: &[u8] = if self.options.pretty { b", " } else { b"," };
        self.writer.write_all(separator)?;
        self.write_field("value", text)?;
        self.writer.write_all(b"}")?;
        Ok(())
    }

    fn write_field(&mut self, key: &str, text: &str) -> Result<()> {
        self.write_key(key)?;
        self.writer.write_all(escape_json(text).as_bytes())?;
        Ok(())
    }

    fn write_key(&mut self, key: &str) -> Result<()> {
        self.writer.write_all(escape_json(key).as_bytes())?;
        let colon: &[u8] = if self.options.pretty { b": " } else { b":" };
        self.writer.write_all(colon)?;
        Ok(())
    }

    fn write_newline(&mut self, level: usize) -> Result<()> {
        if self.options.pretty {
            self.writer.write_all(b"\n")?;
            for _ in 0..level {
                self.writer.write_all(self.options.indent.as_bytes())?;
            }
        }
        Ok(())
    }
}

/// Quotes `s` as a JSON string, escaping `/` as well.
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
