//! Error types for document construction and rendering.
//!
//! Construction errors are returned to the caller (normally the parser
//! driving [`saw_table`](crate::saw_table) and friends), which decides
//! whether to abort. Lookups never fail: a miss is simply `None`.
//!
//! ## Error Categories
//!
//! - **Structural**: duplicate declarations, kind conflicts, empty key segments
//! - **Array policy**: mixing element kinds inside one list
//! - **Resources**: allocation failures while growing a container
//! - **I/O**: the output sink rejected a write
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{init, saw_table, Error};
//!
//! let mut root = init();
//! saw_table(&mut root, "server").unwrap();
//!
//! let err = saw_table(&mut root, "server").unwrap_err();
//! assert!(matches!(err, Error::DuplicateDeclaration { .. }));
//! assert!(err.to_string().contains("server"));
//! ```

use crate::NodeKind;
use std::fmt;
use thiserror::Error;

/// Represents every failure the document engine can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A container could not grow to hold a new entry.
    ///
    /// The document is left exactly as it was before the failed step.
    #[error("allocation failure while growing the document")]
    AllocationFailure,

    /// A dotted path or key contains a zero-length component.
    #[error("empty key segment in `{path}`")]
    EmptyKeySegment { path: String },

    /// A table header or key re-declares something that already exists.
    #[error("duplicate declaration of `{path}`")]
    DuplicateDeclaration { path: String },

    /// A path resolved to a node of an incompatible kind.
    #[error("`{path}` is already defined as {found}, cannot use it as {expected}")]
    TypeConflict {
        path: String,
        expected: NodeKind,
        found: NodeKind,
    },

    /// A list element does not share the kind of the elements before it.
    #[error("mixed list: expected {expected} element, found {found}")]
    HeterogeneousList { expected: NodeKind, found: NodeKind },

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an empty-segment error for `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::empty_key("a..b");
    /// assert!(err.to_string().contains("a..b"));
    /// ```
    pub fn empty_key(path: &str) -> Self {
        Error::EmptyKeySegment {
            path: path.to_string(),
        }
    }

    /// Creates a duplicate-declaration error for `path`.
    pub fn duplicate(path: &str) -> Self {
        Error::DuplicateDeclaration {
            path: path.to_string(),
        }
    }

    /// Creates a kind conflict: `path` holds a `found`, the caller needed an `expected`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Error, NodeKind};
    ///
    /// let err = Error::type_conflict("a", NodeKind::Table, NodeKind::Int);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "`a` is already defined as integer, cannot use it as table"
    /// );
    /// ```
    pub fn type_conflict(path: &str, expected: NodeKind, found: NodeKind) -> Self {
        Error::TypeConflict {
            path: path.to_string(),
            expected,
            found,
        }
    }

    /// Creates an I/O error from a failed write.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

impl From<indexmap::TryReserveError> for Error {
    fn from(_: indexmap::TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

pub type Result<T> = std::result::Result<T, Error>;
