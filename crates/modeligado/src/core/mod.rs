//! Core abstractions for diagram processing
//!
//! This module defines the traits shared by every diagram plugin
//! (database, parser, generator), the error taxonomy and the logging setup.

mod database;
mod error;
mod generator;
pub mod logging;
mod parser;
mod types;

pub use database::*;
pub use error::*;
pub use generator::*;
pub use logging::*;
pub use parser::*;
pub use types::*;
