//! Configuration options for rendering documents.
//!
//! [`DumpOptions`] is shared by the TOML and JSON serializers; each reads
//! the fields that apply to it.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{init, to_string_with_options, DumpOptions, Node};
//!
//! let mut root = init();
//! root.insert("quote", Node::from("say \"hi\"")).unwrap();
//!
//! // Default: strings are escaped so the output parses back
//! let toml = to_string_with_options(&root, &DumpOptions::new()).unwrap();
//! assert_eq!(toml, "quote = \"say \\\"hi\\\"\"\n");
//!
//! // Legacy behaviour: strings written exactly as stored
//! let raw = to_string_with_options(&root, &DumpOptions::new().with_verbatim_strings()).unwrap();
//! assert_eq!(raw, "quote = \"say \"hi\"\"\n");
//! ```

/// Rendering options.
///
/// # Examples
///
/// ```rust
/// use toml_tree::DumpOptions;
///
/// let options = DumpOptions::pretty().with_indent("  ");
/// assert!(options.pretty);
/// assert_eq!(options.indent, "  ");
/// assert!(options.escape_strings);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DumpOptions {
    /// Text written once per nesting level in front of TOML lines, and per
    /// level in pretty JSON.
    pub indent: String,
    /// Escape quotes, backslashes and control characters in TOML strings.
    pub escape_strings: bool,
    /// Spread JSON output over indented lines.
    pub pretty: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            indent: "\t".to_string(),
            escape_strings: true,
            pretty: false,
        }
    }
}

impl DumpOptions {
    /// Creates default options (tab indent, escaped strings, compact JSON).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for multi-line, indented JSON.
    #[must_use]
    pub fn pretty() -> Self {
        DumpOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the per-level indentation text.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Writes TOML string payloads exactly as stored, between plain quotes.
    ///
    /// A string holding `"` or `\` then produces output that does not parse
    /// back to the same value. Only useful to reproduce older output byte for byte.
    #[must_use]
    pub fn with_verbatim_strings(mut self) -> Self {
        self.escape_strings = false;
        self
    }
}
