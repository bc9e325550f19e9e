//! Static inputs (license, readme, third party notices) read from the output root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::StaticInputs;
use crate::io::config::FileNames;

/// Read the three static files from `root`. Any missing file aborts the run.
pub fn load_static_inputs(root: &Path, files: &FileNames) -> Result<StaticInputs> {
    Ok(StaticInputs {
        license: read_input(root, &files.license)?,
        readme: read_input(root, &files.readme)?,
        third_party: read_input(root, &files.third_party)?,
    })
}

fn read_input(root: &Path, name: &str) -> Result<String> {
    let path = root.join(name);
    fs::read_to_string(&path).with_context(|| format!("read input {}", path.display()))
}
