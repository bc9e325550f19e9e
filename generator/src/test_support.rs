//! Test-only helpers for building a scratch output root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::io::config::FileNames;

pub const LICENSE_TEXT: &str = "MIT License\n\nCopyright (c) Simply-Cods\n";
pub const README_TEXT: &str = "# OneOf Unity\n";
pub const THIRD_PARTY_TEXT: &str = "# Third Party Notices\n\nOneOf by Harry McIntyre (MIT)\n";

/// A temporary root seeded with the static input files under their default names.
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        seed_inputs(dir.path(), &FileNames::default())?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Write license, readme and third party notices into `root`.
pub fn seed_inputs(root: &Path, files: &FileNames) -> Result<()> {
    for (name, text) in [
        (&files.license, LICENSE_TEXT),
        (&files.readme, README_TEXT),
        (&files.third_party, THIRD_PARTY_TEXT),
    ] {
        let path = root.join(name);
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
