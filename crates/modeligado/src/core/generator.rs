//! Core generator trait for diagram output
//!
//! This trait defines the interface for turning parsed diagram data into
//! generated artifacts (for class diagrams: source files).

use super::Database;

/// Core trait for source generators
///
/// Generators only read completed diagram data and perform no validation of
/// their own; a successfully parsed database is a precondition.
///
/// # Example
/// ```
/// use modeligado::core::Generator;
/// use modeligado::plugins::class::ClassDiagram;
/// use modeligado::plugins::java::JavaGenerator;
///
/// let db = ClassDiagram::new();
/// let sources = JavaGenerator::new().generate(&db);
/// assert!(sources.is_empty());
/// ```
pub trait Generator<D: Database>: Send + Sync {
    /// The output type of this generator
    type Output;

    /// Generate output from the diagram database
    fn generate(&self, database: &D) -> Self::Output;

    /// Get the name of this generator
    fn name(&self) -> &'static str;

    /// Get the version of this generator
    fn version(&self) -> &'static str;

    /// File extension of the generated artifacts, without the dot
    fn file_extension(&self) -> &'static str;
}
