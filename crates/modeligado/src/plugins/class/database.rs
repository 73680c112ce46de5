//! Class diagram database
//!
//! Stores the completed class blocks of a diagram, in declaration order.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::{Database, Qualifier, RelationKind, Scope, Visibility};

/// A property (attribute) of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn is_static(&self) -> bool {
        self.scope == Some(Scope::Class)
    }
}

/// A method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A method or a constructor
///
/// Methods always carry a return type (possibly `void`); constructors never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

impl Method {
    /// A method with a declared return type
    pub fn method(
        name: impl Into<String>,
        visibility: Visibility,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            visibility,
            scope: None,
            parameters: Vec::new(),
            return_type: Some(return_type.into()),
        }
    }

    pub fn constructor(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            scope: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn is_static(&self) -> bool {
        self.scope == Some(Scope::Class)
    }
}

/// Name, qualifier and members of one class block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassContext {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<Qualifier>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

impl ClassContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.qualifier == Some(Qualifier::Interface)
    }

    pub fn is_abstract(&self) -> bool {
        self.qualifier == Some(Qualifier::Abstract)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    /// Methods that are not constructors, in declaration order
    pub fn operations(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| !m.is_constructor())
    }
}

/// A directed relation between two classes
///
/// `from`/`to` always reflect the semantic direction, whichever class
/// declared the relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub relationship: RelationKind,
}

impl Relation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, relationship: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relationship,
        }
    }
}

/// One completed class block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedClass {
    pub context: ClassContext,
    pub relations: Vec<Relation>,
    /// Distinct class references named in the block's relation lines
    pub relates: BTreeSet<String>,
}

impl ParsedClass {
    pub fn new(context: ClassContext) -> Self {
        Self {
            context,
            relations: Vec::new(),
            relates: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.context.name
    }
}

/// The class name part of a class reference such as `Nomeavel <Interface>`
pub fn class_name(reference: &str) -> &str {
    reference.split_whitespace().next().unwrap_or(reference)
}

/// Class diagram database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassDiagram {
    classes: Vec<ParsedClass>,
}

impl ClassDiagram {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    pub fn from_classes(classes: Vec<ParsedClass>) -> Self {
        Self { classes }
    }

    pub fn add_class(&mut self, class: ParsedClass) {
        self.classes.push(class);
    }

    pub fn classes(&self) -> &[ParsedClass] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<ParsedClass> {
        self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&ParsedClass> {
        self.classes.iter().find(|c| c.context.name == name)
    }

    /// All relations of all classes, in declaration order
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.classes.iter().flat_map(|c| c.relations.iter())
    }

    /// Classes referenced by some relation but never defined by a class block
    pub fn missing_classes(&self) -> BTreeSet<String> {
        let defined: BTreeSet<&str> = self.classes.iter().map(|c| c.name()).collect();
        self.classes
            .iter()
            .flat_map(|c| c.relates.iter())
            .map(|reference| class_name(reference))
            .filter(|name| !defined.contains(name))
            .map(str::to_string)
            .collect()
    }
}

impl Database for ClassDiagram {
    type Node = ParsedClass;
    type Edge = Relation;

    fn add_node(&mut self, node: Self::Node) {
        self.add_class(node)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relations()
    }

    fn clear(&mut self) {
        self.classes.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.classes.iter().map(|c| c.relations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_with_relations(name: &str, targets: &[&str]) -> ParsedClass {
        let mut class = ParsedClass::new(ClassContext::new(name));
        for target in targets {
            class
                .relations
                .push(Relation::new(name, *target, RelationKind::Association));
            class.relates.insert(target.to_string());
        }
        class
    }

    #[test]
    fn test_create_empty_class() {
        let class = ParsedClass::new(ClassContext::new("Pessoa"));
        assert_eq!(class.name(), "Pessoa");
        assert!(class.context.properties.is_empty());
        assert!(class.context.methods.is_empty());
        assert!(class.context.qualifier.is_none());
        assert!(class.relations.is_empty());
    }

    #[test]
    fn test_constructors_and_operations_split() {
        let mut context = ClassContext::new("Aluno");
        context
            .methods
            .push(Method::constructor("Aluno", Visibility::Public));
        context
            .methods
            .push(Method::method("getId", Visibility::Public, "int"));
        context
            .methods
            .push(Method::constructor("Aluno", Visibility::Public).with_parameter(Parameter::new("nome", "str")));

        assert_eq!(context.constructors().count(), 2);
        let operations: Vec<_> = context.operations().map(|m| m.name.as_str()).collect();
        assert_eq!(operations, vec!["getId"]);
    }

    #[test]
    fn test_class_name_strips_qualifier() {
        assert_eq!(class_name("Nomeavel <Interface>"), "Nomeavel");
        assert_eq!(class_name("Pessoa"), "Pessoa");
    }

    #[test]
    fn test_database_counts() {
        let mut db = ClassDiagram::new();
        db.add_class(class_with_relations("Departamento", &["Turma"]));
        db.add_class(class_with_relations("Turma", &["Aluno", "Professor"]));

        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 3);
        assert!(db.get_node("Turma").is_some());
        assert!(db.get_node("Aluno").is_none());

        db.clear();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.edge_count(), 0);
    }

    #[test]
    fn test_missing_classes() {
        let mut db = ClassDiagram::new();
        db.add_class(class_with_relations("Aluno", &["Pessoa", "Nomeavel <Interface>"]));
        db.add_class(class_with_relations("Pessoa", &[]));

        let missing: Vec<_> = db.missing_classes().into_iter().collect();
        assert_eq!(missing, vec!["Nomeavel".to_string()]);
    }

    #[test]
    fn test_edges_follow_declaration_order() {
        let mut db = ClassDiagram::new();
        db.add_class(class_with_relations("A", &["B", "C"]));
        db.add_class(class_with_relations("B", &["C"]));

        let edges: Vec<_> = db.edges().map(|r| (r.from.as_str(), r.to.as_str())).collect();
        assert_eq!(edges, vec![("A", "B"), ("A", "C"), ("B", "C")]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut context = ClassContext::new("Nomeavel").with_qualifier(Qualifier::Interface);
        context
            .methods
            .push(Method::method("getNome", Visibility::Public, "str"));
        context
            .properties
            .push(Property::new("total", "int", Visibility::Private).with_scope(Scope::Class));
        let value = serde_json::to_value(ParsedClass::new(context)).unwrap();

        assert_eq!(value["context"]["qualifier"], "<Interface>");
        assert_eq!(value["context"]["methods"][0]["type"], "str");
        assert_eq!(value["context"]["properties"][0]["scope"], "class");
        assert_eq!(value["context"]["properties"][0]["visibility"], "private");
    }
}
