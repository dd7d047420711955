//! Error types with rich diagnostics using miette
//!
//! Model operations fail fast with typed errors; document loading degrades
//! to a best-effort partial parse and reports where it stopped instead of
//! raising.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Model Errors
// ============================================================================

/// Errors from live diagram mutations.
#[derive(Error, Diagnostic, Debug)]
pub enum ModelError {
    #[error("unknown connector kind: {kind}")]
    #[diagnostic(
        code(suml::model::invalid_kind),
        help(
            "valid kinds are Association, Dependency, Generalization, \
             Realization, Aggregation and Composition"
        )
    )]
    InvalidKind { kind: String },

    #[error("index {index} out of range for list of {len}")]
    #[diagnostic(code(suml::model::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },
}

// ============================================================================
// Document Errors
// ============================================================================

/// Errors that abort a load outright, leaving the diagram unchanged.
///
/// Everything past the canvas header is recovered leniently (see
/// [`Truncation`]); only a missing or malformed header is fatal.
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("document is empty")]
    #[diagnostic(
        code(suml::document::empty),
        help("a saved diagram always starts with a \"width height\" line")
    )]
    EmptySource,

    #[error("malformed canvas header")]
    #[diagnostic(code(suml::document::malformed_header))]
    MalformedHeader {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected two numbers: canvas width and height")]
        span: SourceSpan,
    },
}

// ============================================================================
// Truncation Reports
// ============================================================================

/// Report of a best-effort parse that stopped early.
///
/// Not an error: everything before the truncation point was loaded. The
/// caller decides whether to surface it to the user.
#[derive(Error, Diagnostic, Debug)]
#[error("document truncated at line {line}: {reason}")]
#[diagnostic(code(suml::document::truncated), severity(Warning))]
pub struct Truncation {
    /// 1-based line number of the first line that was not loaded.
    pub line: usize,
    pub reason: TruncationReason,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("parsing stopped here")]
    pub span: SourceSpan,
}

/// Why a parse stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationReason {
    /// A line classified as neither a connector record nor a box position.
    UnrecognizedLine,
    /// A connector record named a kind that does not exist.
    UnknownKind,
    /// A box record ended before its three bracketed sections were read.
    UnterminatedBox,
}

impl std::fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TruncationReason::UnrecognizedLine => {
                write!(f, "line is neither a connector record nor a box position")
            }
            TruncationReason::UnknownKind => write!(f, "unknown connector kind"),
            TruncationReason::UnterminatedBox => {
                write!(f, "box record is missing a bracketed section")
            }
        }
    }
}
