//! Java source plugin
//!
//! Generates Java compilation units from parsed class diagrams and writes
//! them to disk.

mod export;
mod generator;

pub use export::{package_dir, write_sources};
pub use generator::{generate, normalize_type, JavaGenerator};
