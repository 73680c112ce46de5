//! Diagram state machine
//!
//! Tracks where the parser is inside a class block and owns the class being
//! built. Every operation is an [`Event`]; [`transition`] is the single
//! table deciding which events are legal in which [`DiagramState`].

use std::collections::BTreeSet;
use std::fmt;

use super::database::{ClassContext, Method, ParsedClass, Property, Relation};
use crate::core::{Direction, ParseError, ParseErrorKind, Qualifier, RelationKind};

/// Position of the parser relative to class blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagramState {
    /// No open class
    #[default]
    Root,
    /// Header read; relation lines allowed, no section chosen yet
    Class,
    /// Inside the properties section
    Attr,
    /// Inside the methods section
    Method,
}

impl DiagramState {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagramState::Root => "ROOT",
            DiagramState::Class => "CLASS",
            DiagramState::Attr => "ATTR",
            DiagramState::Method => "METHOD",
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, DiagramState::Root)
    }
}

impl fmt::Display for DiagramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations that drive the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    StartClass,
    AddRelation,
    EnterProperties,
    AddProperty,
    LeaveProperties,
    EnterMethods,
    AddMethod,
    LeaveMethods,
    FinishClass,
}

impl Event {
    fn description(self) -> &'static str {
        match self {
            Event::StartClass => "start a class",
            Event::AddRelation => "add a relation",
            Event::EnterProperties => "enter the properties section",
            Event::AddProperty => "add a property",
            Event::LeaveProperties => "leave the properties section",
            Event::EnterMethods => "enter the methods section",
            Event::AddMethod => "add a method",
            Event::LeaveMethods => "leave the methods section",
            Event::FinishClass => "finish a class",
        }
    }
}

/// The state reached by applying `event` in `state`, or `None` if illegal
pub fn transition(state: DiagramState, event: Event) -> Option<DiagramState> {
    use DiagramState::*;

    match (state, event) {
        (Root, Event::StartClass) => Some(Class),
        (Class, Event::AddRelation) => Some(Class),
        (Class, Event::EnterProperties) => Some(Attr),
        (Attr, Event::AddProperty) => Some(Attr),
        (Attr, Event::LeaveProperties) => Some(Class),
        (Class, Event::EnterMethods) => Some(Method),
        (Method, Event::AddMethod) => Some(Method),
        (Method, Event::LeaveMethods) => Some(Class),
        (Class, Event::FinishClass) => Some(Root),
        _ => None,
    }
}

/// The class block under construction
#[derive(Debug, Clone)]
struct ClassBuilder {
    name: String,
    qualifier: Option<Qualifier>,
    relations: Vec<Relation>,
    relates: BTreeSet<String>,
    properties: Option<Vec<Property>>,
    methods: Option<Vec<Method>>,
}

impl ClassBuilder {
    fn build(self) -> ParsedClass {
        let mut context = ClassContext::new(self.name);
        context.qualifier = self.qualifier;
        context.properties = self.properties.unwrap_or_default();
        context.methods = self.methods.unwrap_or_default();
        ParsedClass {
            context,
            relations: self.relations,
            relates: self.relates,
        }
    }
}

/// State machine for one pass over a diagram
#[derive(Debug, Default)]
pub struct DiagramStateMachine {
    state: DiagramState,
    line: usize,
    current: Option<ClassBuilder>,
}

impl DiagramStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DiagramState {
        self.state
    }

    /// Set the 1-based line number reported by subsequent errors
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Name of the open class, if any
    pub fn current_class(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.name.as_str())
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, kind)
    }

    fn apply(&mut self, event: Event) -> Result<(), ParseError> {
        match transition(self.state, event) {
            Some(next) => {
                self.state = next;
                Ok(())
            }
            None => Err(self.error(ParseErrorKind::InvalidState {
                operation: event.description(),
                state: self.state.as_str(),
            })),
        }
    }

    fn builder(&mut self) -> Result<&mut ClassBuilder, ParseError> {
        let (line, state) = (self.line, self.state.as_str());
        self.current.as_mut().ok_or_else(|| {
            ParseError::new(
                line,
                ParseErrorKind::InvalidState {
                    operation: "modify a class without an open class",
                    state,
                },
            )
        })
    }

    pub fn start_class(
        &mut self,
        name: impl Into<String>,
        qualifier: Option<Qualifier>,
    ) -> Result<(), ParseError> {
        self.apply(Event::StartClass)?;
        self.current = Some(ClassBuilder {
            name: name.into(),
            qualifier,
            relations: Vec::new(),
            relates: BTreeSet::new(),
            properties: None,
            methods: None,
        });
        Ok(())
    }

    /// Register a relation declared by the open class
    ///
    /// `direction` says whether the open class is the relation's source
    /// ([`Direction::Forward`]) or its target ([`Direction::Inverse`]).
    pub fn add_relation(
        &mut self,
        related: &str,
        kind: RelationKind,
        direction: Direction,
    ) -> Result<(), ParseError> {
        self.apply(Event::AddRelation)?;
        let builder = self.builder()?;
        builder.relates.insert(related.to_string());
        let relation = match direction {
            Direction::Forward => Relation::new(builder.name.clone(), related, kind),
            Direction::Inverse => Relation::new(related, builder.name.clone(), kind),
        };
        builder.relations.push(relation);
        Ok(())
    }

    pub fn enter_properties(&mut self) -> Result<(), ParseError> {
        let already = self.current.as_ref().is_some_and(|c| c.properties.is_some());
        if already && self.state == DiagramState::Class {
            return Err(self.error(ParseErrorKind::SectionAlreadyPresent {
                section: "properties",
            }));
        }
        self.apply(Event::EnterProperties)?;
        self.builder()?.properties = Some(Vec::new());
        Ok(())
    }

    pub fn add_property(&mut self, property: Property) -> Result<(), ParseError> {
        self.apply(Event::AddProperty)?;
        self.builder()?
            .properties
            .get_or_insert_with(Vec::new)
            .push(property);
        Ok(())
    }

    pub fn leave_properties(&mut self) -> Result<(), ParseError> {
        self.apply(Event::LeaveProperties)
    }

    pub fn enter_methods(&mut self) -> Result<(), ParseError> {
        let already = self.current.as_ref().is_some_and(|c| c.methods.is_some());
        if already && self.state == DiagramState::Class {
            return Err(self.error(ParseErrorKind::SectionAlreadyPresent { section: "methods" }));
        }
        self.apply(Event::EnterMethods)?;
        self.builder()?.methods = Some(Vec::new());
        Ok(())
    }

    pub fn add_method(&mut self, method: Method) -> Result<(), ParseError> {
        self.apply(Event::AddMethod)?;
        self.builder()?
            .methods
            .get_or_insert_with(Vec::new)
            .push(method);
        Ok(())
    }

    pub fn leave_methods(&mut self) -> Result<(), ParseError> {
        self.apply(Event::LeaveMethods)
    }

    /// Close the open class and hand it over
    pub fn finish_class(&mut self) -> Result<ParsedClass, ParseError> {
        self.apply(Event::FinishClass)?;
        let builder = self.current.take().ok_or_else(|| {
            self.error(ParseErrorKind::InvalidState {
                operation: Event::FinishClass.description(),
                state: DiagramState::Root.as_str(),
            })
        })?;
        Ok(builder.build())
    }

    /// React to a section separator line
    ///
    /// `Class` enters the properties section, `Attr` moves on to the methods
    /// section and `Method` closes the block, returning the finished class.
    pub fn advance(&mut self) -> Result<Option<ParsedClass>, ParseError> {
        match self.state {
            DiagramState::Class => {
                self.enter_properties()?;
                Ok(None)
            }
            DiagramState::Attr => {
                self.leave_properties()?;
                self.enter_methods()?;
                Ok(None)
            }
            DiagramState::Method => {
                self.leave_methods()?;
                self.finish_class().map(Some)
            }
            DiagramState::Root => Err(self.error(ParseErrorKind::InvalidState {
                operation: "close a section without an open class",
                state: self.state.as_str(),
            })),
        }
    }

    /// Check that input ended outside of any class block
    pub fn finish(&self) -> Result<(), ParseError> {
        if self.state.is_root() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::UnexpectedEndOfInput {
                state: self.state.as_str(),
            }))
        }
    }
}
