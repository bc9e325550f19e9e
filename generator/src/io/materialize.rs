//! File materializer: replace a file and drop its sidecar metadata.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::types::GeneratedUnit;

/// Absolute path of a unit under `root`.
pub fn unit_path(root: &Path, unit: &GeneratedUnit) -> PathBuf {
    root.join(&unit.relative_path)
}

/// Sidecar path, e.g. `package.json.meta`.
pub fn sidecar_path(path: &Path, meta_suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(meta_suffix);
    PathBuf::from(raw)
}

/// Delete any existing file at `path` and its sidecar, then write `content`.
///
/// Missing files are not an error. The sidecar is never recreated.
pub fn materialize(path: &Path, content: &str, meta_suffix: &str) -> Result<()> {
    info!(path = %path.display(), "generating");
    remove_if_exists(path)?;
    let sidecar = sidecar_path(path, meta_suffix);
    if remove_if_exists(&sidecar)? {
        debug!(path = %sidecar.display(), "removed sidecar metadata");
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("write file {}", path.display()))
}

/// Materialize every unit in order, stopping at the first failure.
pub fn materialize_all(root: &Path, units: &[GeneratedUnit], meta_suffix: &str) -> Result<usize> {
    for unit in units {
        materialize(&unit_path(root, unit), &unit.content, meta_suffix)?;
    }
    Ok(units.len())
}

fn remove_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    Ok(true)
}
