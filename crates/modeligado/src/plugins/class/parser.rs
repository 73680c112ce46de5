//! Class diagram parser
//!
//! Walks the input line by line, strips comments, reacts to section
//! separators and routes every content line to the state machine through
//! the line extractor.

use tracing::{debug, info, span, trace, Level};

use super::database::{ClassDiagram, ParsedClass};
use super::extractor::{
    extract_attr, extract_method_or_constructor, extract_relation, strip_comment,
};
use super::state::{DiagramState, DiagramStateMachine};
use crate::core::{ParseError, ParseErrorKind, Parser, Qualifier};

/// Marker line separating the header, properties and methods of a class
pub const SECTION_SEPARATOR: &str = "---";

/// Class diagram parser
pub struct ClassDiagramParser;

impl ClassDiagramParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the whole input into the list of class blocks
    ///
    /// Fails with the first error encountered, in line order.
    pub fn parse_classes(&self, input: &str) -> Result<Vec<ParsedClass>, ParseError> {
        let parse_span = span!(Level::INFO, "parse_class_diagram", input_len = input.len());
        let _enter = parse_span.enter();

        let mut machine = DiagramStateMachine::new();
        let mut classes = Vec::new();
        let mut content_lines = 0usize;
        let mut last_line = 0usize;

        for (index, raw) in input.lines().enumerate() {
            let line_number = index + 1;
            last_line = line_number;
            machine.set_line(line_number);

            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }
            content_lines += 1;
            trace!(line = line_number, state = %machine.state(), text = line, "Parsing line");

            if line.starts_with(SECTION_SEPARATOR) {
                if let Some(class) = machine.advance()? {
                    debug!(
                        class = class.name(),
                        properties = class.context.properties.len(),
                        methods = class.context.methods.len(),
                        relations = class.relations.len(),
                        "Class completed"
                    );
                    classes.push(class);
                }
                continue;
            }

            self.parse_content_line(&mut machine, line, line_number)?;
        }

        if content_lines == 0 {
            return Err(ParseError::new(0, ParseErrorKind::EmptyInput));
        }

        machine.set_line(last_line);
        machine.finish()?;

        info!(class_count = classes.len(), "Parsing completed");
        Ok(classes)
    }

    /// Route one content line according to the current state
    fn parse_content_line(
        &self,
        machine: &mut DiagramStateMachine,
        line: &str,
        line_number: usize,
    ) -> Result<(), ParseError> {
        let at_line = |kind: ParseErrorKind| ParseError::new(line_number, kind);

        match machine.state() {
            DiagramState::Root => {
                let (name, qualifier) = parse_header(line).map_err(at_line)?;
                machine.start_class(name, qualifier)
            }
            DiagramState::Class => {
                let declaration = extract_relation(line).map_err(at_line)?;
                declaration.types.iter().try_for_each(|related| {
                    machine.add_relation(related, declaration.kind, declaration.direction)
                })
            }
            DiagramState::Attr => machine.add_property(extract_attr(line).map_err(at_line)?),
            DiagramState::Method => {
                let owner = machine.current_class().unwrap_or_default();
                let method = extract_method_or_constructor(owner, line).map_err(at_line)?;
                machine.add_method(method)
            }
        }
    }
}

/// Split a class header into its name and optional qualifier
fn parse_header(line: &str) -> Result<(&str, Option<Qualifier>), ParseErrorKind> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), None, None) => Ok((name, None)),
        (Some(name), Some(token), None) => Qualifier::from_token(token)
            .map(|qualifier| (name, Some(qualifier)))
            .ok_or_else(|| ParseErrorKind::UnknownQualifier {
                qualifier: token.to_string(),
            }),
        _ => Err(ParseErrorKind::MalformedClassHeader {
            text: line.to_string(),
        }),
    }
}

impl Default for ClassDiagramParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ClassDiagram> for ClassDiagramParser {
    fn parse(&self, input: &str, database: &mut ClassDiagram) -> Result<(), ParseError> {
        for class in self.parse_classes(input)? {
            database.add_class(class);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
