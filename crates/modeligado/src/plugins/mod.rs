//! Plugin implementations
//!
//! `class` parses the class diagram notation; `java` generates sources
//! from the parsed model.

pub mod class;
pub mod java;

pub use class::*;
pub use java::*;
