//! Core type definitions for class diagrams
//!
//! The small closed vocabularies of the notation: member visibility, member
//! scope, class qualifiers and relation kinds.

use serde::Serialize;
use std::fmt;

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
}

impl Visibility {
    /// Map a visibility symbol token (`+`, `-`, `#`) to its visibility
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Visibility::Public),
            "-" => Some(Visibility::Private),
            "#" => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    /// The keyword used in generated source
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Scope of a member; only class-level (`static`) members carry one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Class,
}

impl Scope {
    /// The modifier token that marks a class-level member
    pub const KEYWORD: &'static str = "static";
}

/// Optional class header suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Qualifier {
    #[serde(rename = "<Interface>")]
    Interface,
    #[serde(rename = "<Abstract>")]
    Abstract,
}

impl Qualifier {
    /// Parse the literal header token (`<Interface>` or `<Abstract>`)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<Interface>" => Some(Qualifier::Interface),
            "<Abstract>" => Some(Qualifier::Abstract),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Qualifier::Interface => "<Interface>",
            Qualifier::Abstract => "<Abstract>",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Relationship type between classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    Generalization,          // extends
    GeneralizationInterface, // implements
    Association,
    DirectionalAssociation,
    Composition, // composes
    Aggregation, // aggregates
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Generalization => write!(f, "generalization"),
            RelationKind::GeneralizationInterface => write!(f, "generalizationInterface"),
            RelationKind::Association => write!(f, "association"),
            RelationKind::DirectionalAssociation => write!(f, "directionalAssociation"),
            RelationKind::Composition => write!(f, "composition"),
            RelationKind::Aggregation => write!(f, "aggregation"),
        }
    }
}

/// Whether the class declaring a relation is its semantic source or target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The declaring class is `from`
    Forward,
    /// The declaring class is `to`
    Inverse,
}
