//! Class diagram plugin
//!
//! Implements parsing of the line-oriented class diagram DSL into
//! [`ParsedClass`] blocks.

mod database;
mod example;
mod extractor;
mod parser;
mod state;

pub use database::{
    class_name, ClassContext, ClassDiagram, Method, Parameter, ParsedClass, Property, Relation,
};
pub use example::{example_diagram, EXAMPLE_DIAGRAM};
pub use extractor::{
    check_generic_balance, extract_attr, extract_method_or_constructor, extract_parameters,
    extract_relation, relation_keyword, split_top_level, strip_comment, RelationDeclaration,
    COMMENT_MARKER,
};
pub use parser::{ClassDiagramParser, SECTION_SEPARATOR};
pub use state::{transition, DiagramState, DiagramStateMachine, Event};
