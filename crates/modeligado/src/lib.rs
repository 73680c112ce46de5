//! Modeligado - Generate Java sources from textual class diagrams
//!
//! A library for parsing a small line-oriented class diagram notation and
//! turning the parsed classes into Java source files.
//!
//! # Quick Start
//!
//! ```rust
//! use modeligado::convert;
//!
//! let input = "Pessoa\n---\n- cpf: str\n---\n---\n";
//! let sources = convert(input, None).unwrap();
//! assert_eq!(sources["Pessoa"], "public class Pessoa {\n\n    private String cpf;\n}");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use modeligado::prelude::*;
//!
//! let input = "Nomeavel <Interface>\n---\n---\n+ getNome(): str\n---\n";
//!
//! // Parse into a database
//! let parser = ClassDiagramParser::new();
//! let mut database = ClassDiagram::new();
//! parser.parse(input, &mut database).unwrap();
//!
//! // Access the parsed data
//! assert_eq!(database.node_count(), 1);
//! assert!(database.classes()[0].context.is_interface());
//!
//! // Generate sources
//! let generator = JavaGenerator::new().with_package("app");
//! let sources = generator.generate(&database);
//! assert!(sources["Nomeavel"].starts_with("package app;"));
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use std::collections::BTreeMap;

pub use crate::core::*;
pub use plugins::class::example_diagram;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, DiagramError, Generator, ParseError, ParseErrorKind, Parser, Qualifier,
        RelationKind, Visibility,
    };
    pub use crate::plugins::class::{ClassDiagram, ClassDiagramParser, ParsedClass};
    pub use crate::plugins::java::{write_sources, JavaGenerator};
}

/// Parse class diagram text into a database
///
/// Fails with the first error found, in line order; nothing is returned
/// for a partially valid input.
///
/// # Example
/// ```rust
/// use modeligado::parse;
/// use modeligado::prelude::Database;
///
/// let db = parse("Turma\naggregates Aluno\n---\n---\n---\n").unwrap();
/// assert_eq!(db.node_count(), 1);
/// assert_eq!(db.edge_count(), 1);
/// assert_eq!(db.missing_classes().len(), 1);
/// ```
pub fn parse(input: &str) -> Result<plugins::class::ClassDiagram, ParseError> {
    use crate::core::Parser as _;
    use crate::plugins::class::{ClassDiagram, ClassDiagramParser};

    let parser = ClassDiagramParser::new();
    let mut database = ClassDiagram::new();
    parser.parse(input, &mut database)?;
    Ok(database)
}

/// Generate Java sources for parsed classes
///
/// Keys are class names. `package`, when given, is emitted as a `package`
/// statement at the top of every file.
pub fn generate(
    classes: &[plugins::class::ParsedClass],
    package: Option<&str>,
) -> BTreeMap<String, String> {
    plugins::java::generate(classes, package)
}

/// Parse class diagram text and generate its Java sources
///
/// # Example
/// ```rust
/// use modeligado::convert;
///
/// let sources = convert("Universidade\n---\n---\n---\n", Some("app")).unwrap();
/// assert_eq!(sources["Universidade"], "package app;\n\npublic class Universidade {\n}");
/// ```
pub fn convert(input: &str, package: Option<&str>) -> Result<BTreeMap<String, String>, ParseError> {
    let database = parse(input)?;
    Ok(generate(database.classes(), package))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example() {
        let result = parse(example_diagram());
        assert!(result.is_ok(), "parse failed: {:?}", result.err());
        let db = result.unwrap();
        assert_eq!(db.node_count(), 7);
        assert!(db.missing_classes().is_empty());
    }

    #[test]
    fn test_parse_error_has_line() {
        let result = parse("Pessoa\n---\n+ getNome()\n---\n---\n");
        let err = result.unwrap_err();
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_convert_example() {
        let sources = convert(example_diagram(), None).unwrap();
        assert_eq!(sources.len(), 7);
        assert!(sources["Aluno"]
            .starts_with("public class Aluno extends Pessoa implements Nomeavel, Identificavel {"));
        assert!(sources["Identificavel"].starts_with("public interface Identificavel {"));
    }

    #[test]
    fn test_convert_with_package() {
        let sources = convert(example_diagram(), Some("app")).unwrap();
        assert!(sources.values().all(|s| s.starts_with("package app;\n\n")));
    }

    #[test]
    fn test_generate_matches_convert() {
        let db = parse(example_diagram()).unwrap();
        assert_eq!(
            generate(db.classes(), None),
            convert(example_diagram(), None).unwrap()
        );
    }

    #[test]
    fn test_convert_empty_input() {
        let err = convert("", None).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::EmptyInput);
    }
}
