//! Core parser trait for diagram markup
//!
//! This trait defines the interface for parsing diagram markup
//! into structured data that can be stored in a database.

use super::{Database, ParseError};

/// Core trait for diagram parsers
///
/// A parser either consumes the whole input or fails with the first error;
/// on failure the database is left untouched.
///
/// # Example
/// ```
/// use modeligado::core::{Database, Parser};
/// use modeligado::plugins::class::{ClassDiagram, ClassDiagramParser};
///
/// let parser = ClassDiagramParser::new();
/// let mut db = ClassDiagram::new();
/// parser.parse("Pessoa\n---\n---\n---\n", &mut db).unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<(), ParseError>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}
