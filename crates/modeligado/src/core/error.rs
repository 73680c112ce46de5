//! Core error types for diagram processing
//!
//! Every parse failure is a [`ParseError`]: a 1-based line number plus a
//! [`ParseErrorKind`]. Callers match on the kind; there is no error hierarchy.
//! [`DiagramError`] wraps parse errors together with the I/O failures of the
//! export path.

use thiserror::Error;

/// What went wrong while parsing a class diagram
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A mutation was attempted while the state machine was in the wrong state
    #[error("cannot {operation} while in state '{state}'")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The properties or methods section was entered twice for one class
    #[error("the {section} section is already present for this class")]
    SectionAlreadyPresent { section: &'static str },

    #[error("unknown visibility: {symbol}")]
    UnknownVisibility { symbol: String },

    #[error("unknown relation: {keyword}")]
    UnknownRelationKeyword { keyword: String },

    #[error("unknown class qualifier: {qualifier}")]
    UnknownQualifier { qualifier: String },

    #[error("malformed class header: {text}")]
    MalformedClassHeader { text: String },

    #[error("malformed relation: {text}")]
    MalformedRelation { text: String },

    #[error("malformed attribute: {text}")]
    MalformedAttribute { text: String },

    #[error("malformed parameter list: {text}")]
    MalformedParameter { text: String },

    #[error("malformed method signature: {text}")]
    MalformedMethodSignature { text: String },

    /// A `<`/`>` scan found a closer without opener or an unterminated opener
    #[error("unbalanced generic brackets: {text}")]
    UnbalancedGenericBrackets { text: String },

    #[error("method '{method}' is missing a return type")]
    MissingReturnType { method: String },

    #[error("constructor '{constructor}' must not declare a return type")]
    UnexpectedReturnType { constructor: String },

    #[error("no text found")]
    EmptyInput,

    /// Input ended before the open class block was closed
    #[error("unexpected end of input while in state '{state}'")]
    UnexpectedEndOfInput { state: &'static str },
}

/// A parse failure located at a 1-based source line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error at the given line
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// Top-level error type covering parsing and source export
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new export error
    pub fn export_error(message: String) -> Self {
        Self::Export { message }
    }
}
