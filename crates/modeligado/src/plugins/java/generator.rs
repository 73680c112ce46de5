//! Java source generator
//!
//! Turns parsed class blocks into one Java compilation unit per class.

use std::collections::BTreeMap;

use tracing::{debug, info, span, Level};

use crate::core::{Generator, RelationKind};
use crate::plugins::class::{class_name, ClassDiagram, Method, Parameter, ParsedClass, Property};

/// Indentation of class members
const INDENT: &str = "    ";

/// Type aliases of the diagram language and their Java spelling
const TYPE_ALIASES: &[(&str, &str)] = &[("str", "String")];

/// Java source generator
#[derive(Debug, Clone, Default)]
pub struct JavaGenerator {
    package: Option<String>,
}

impl JavaGenerator {
    pub fn new() -> Self {
        Self { package: None }
    }

    /// Emit a `package` statement at the top of every file
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Generate one source text per class, keyed by class name
    ///
    /// A class name declared twice keeps the last declaration.
    pub fn generate_classes(&self, classes: &[ParsedClass]) -> BTreeMap<String, String> {
        let generate_span = span!(
            Level::INFO,
            "generate_sources",
            class_count = classes.len(),
            package = self.package.as_deref().unwrap_or("")
        );
        let _enter = generate_span.enter();

        let mut sources = BTreeMap::new();
        for class in classes {
            let source = self.generate_class(class);
            debug!(class = class.name(), bytes = source.len(), "Generated source");
            if sources.insert(class.name().to_string(), source).is_some() {
                debug!(class = class.name(), "Class declared twice, keeping the last block");
            }
        }

        info!(file_count = sources.len(), "Generation completed");
        sources
    }

    /// Generate the source text of a single class
    pub fn generate_class(&self, class: &ParsedClass) -> String {
        let context = &class.context;
        let is_interface = context.is_interface();

        let properties: Vec<String> = context.properties.iter().map(render_property).collect();
        let constructors: Vec<String> = context.constructors().map(render_constructor).collect();
        let methods: Vec<String> = context
            .operations()
            .map(|method| render_method(method, is_interface))
            .collect();

        let mut source = String::new();
        if let Some(package) = &self.package {
            source.push_str(&format!("package {};\n\n", package));
        }
        source.push_str(&render_signature(class));
        source.push_str(" {\n");

        let method_separator = if is_interface { "\n" } else { "\n\n" };
        for (members, separator) in [
            (&properties, "\n"),
            (&constructors, "\n\n"),
            (&methods, method_separator),
        ] {
            if members.is_empty() {
                continue;
            }
            source.push('\n');
            source.push_str(&members.join(separator));
            source.push('\n');
        }

        source.push('}');
        source
    }
}

impl Generator<ClassDiagram> for JavaGenerator {
    type Output = BTreeMap<String, String>;

    fn generate(&self, database: &ClassDiagram) -> Self::Output {
        self.generate_classes(database.classes())
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }
}

/// Generate Java sources for `classes`, optionally inside `package`
pub fn generate(classes: &[ParsedClass], package: Option<&str>) -> BTreeMap<String, String> {
    let generator = match package {
        Some(package) => JavaGenerator::new().with_package(package),
        None => JavaGenerator::new(),
    };
    generator.generate_classes(classes)
}

/// Rewrite diagram type aliases to their Java spelling
///
/// Applies to every identifier of the type text, so `Map<str, List<str>>`
/// becomes `Map<String, List<String>>`.
pub fn normalize_type(type_text: &str) -> String {
    let mut normalized = String::with_capacity(type_text.len());
    let mut identifier = String::new();

    for ch in type_text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            identifier.push(ch);
        } else {
            normalized.push_str(java_identifier(&identifier));
            identifier.clear();
            normalized.push(ch);
        }
    }
    normalized.push_str(java_identifier(&identifier));
    normalized
}

fn java_identifier(identifier: &str) -> &str {
    TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == identifier)
        .map(|&(_, java)| java)
        .unwrap_or(identifier)
}

fn render_signature(class: &ParsedClass) -> String {
    let context = &class.context;
    let kind = if context.is_interface() {
        "interface"
    } else if context.is_abstract() {
        "abstract class"
    } else {
        "class"
    };

    let mut signature = format!("public {} {}", kind, context.name);
    let mut implemented = Vec::new();
    for relation in &class.relations {
        match relation.relationship {
            RelationKind::Generalization => {
                signature.push_str(" extends ");
                signature.push_str(class_name(&relation.to));
            }
            RelationKind::GeneralizationInterface => implemented.push(class_name(&relation.to)),
            _ => {}
        }
    }
    if !implemented.is_empty() {
        signature.push_str(" implements ");
        signature.push_str(&implemented.join(", "));
    }
    signature
}

fn modifiers(visibility: &str, is_static: bool) -> String {
    if is_static {
        format!("{} static", visibility)
    } else {
        visibility.to_string()
    }
}

fn render_property(property: &Property) -> String {
    format!(
        "{}{} {} {};",
        INDENT,
        modifiers(property.visibility.keyword(), property.is_static()),
        normalize_type(&property.type_name),
        property.name
    )
}

fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", normalize_type(&p.type_name), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_method(method: &Method, is_interface: bool) -> String {
    let return_type = method.return_type.as_deref().unwrap_or("void");
    let head = format!(
        "{}{} {} {}({})",
        INDENT,
        modifiers(method.visibility.keyword(), method.is_static()),
        normalize_type(return_type),
        method.name,
        render_parameters(&method.parameters)
    );
    if is_interface {
        format!("{};", head)
    } else {
        format!("{} {{\n{}}}", head, INDENT)
    }
}

fn render_constructor(constructor: &Method) -> String {
    format!(
        "{}{} {}({}) {{\n{}}}",
        INDENT,
        constructor.visibility.keyword(),
        constructor.name,
        render_parameters(&constructor.parameters),
        INDENT
    )
}
