//! Writing generated sources to disk
//!
//! One `<Class>.java` file per generated class, placed under the directory
//! tree of its package (`com.example` -> `com/example/`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::DiagramError;

/// Directory of `package` below `out_dir`
pub fn package_dir(out_dir: &Path, package: Option<&str>) -> Result<PathBuf, DiagramError> {
    let mut dir = out_dir.to_path_buf();
    if let Some(package) = package {
        for segment in package.split('.') {
            if !is_path_safe(segment) {
                return Err(DiagramError::export_error(format!(
                    "invalid package name: {}",
                    package
                )));
            }
            dir.push(segment);
        }
    }
    Ok(dir)
}

fn is_path_safe(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace())
}

/// Write every source of `sources` as `<name>.java` and return the paths written
///
/// `package` only decides the directory; the package statement itself is
/// part of the generated text.
pub fn write_sources(
    out_dir: &Path,
    package: Option<&str>,
    sources: &BTreeMap<String, String>,
) -> Result<Vec<PathBuf>, DiagramError> {
    let dir = package_dir(out_dir, package)?;
    fs::create_dir_all(&dir)?;

    let mut written = Vec::with_capacity(sources.len());
    for (name, source) in sources {
        if !is_path_safe(name) {
            return Err(DiagramError::export_error(format!(
                "invalid class name for a file: {}",
                name
            )));
        }
        let path = dir.join(format!("{}.java", name));
        fs::write(&path, source)?;
        debug!(path = %path.display(), "Wrote source file");
        written.push(path);
    }

    info!(dir = %dir.display(), file_count = written.len(), "Export completed");
    Ok(written)
}
