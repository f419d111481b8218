//! Error types shared by the scanner, renderer and injector.

use std::path::PathBuf;

/// Failure to interpret a single tag or its declaration line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("missing value for +cty:{kind}:for")]
    MissingValue { kind: &'static str },

    #[error("invalid +cty:reason:for, expected <Resource>/<Condition>")]
    InvalidReasonTarget,

    #[error("could not find a declaration after the tag")]
    MissingDeclaration,

    #[error("could not parse const name from: {0:?}")]
    NoIdentifier(String),
}

/// All fatal errors of a documentation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed tag in a scanned source file.
    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: TagError,
    },

    /// The target document has no element matching the insertion selector.
    #[error("no element matching `{selector}` found in target document")]
    NotFound { selector: String },

    /// The last matching element is void or never closed, so nothing can be
    /// appended to it.
    #[error("last element matching `{selector}` has no end tag, cannot append to it")]
    Unclosed { selector: String },

    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid template {}: {message}", .path.display())]
    InvalidTemplate { path: PathBuf, message: String },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTML rewriter rejected the document.
    #[error("html rewrite failed: {0}")]
    Rewrite(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
