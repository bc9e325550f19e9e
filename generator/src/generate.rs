//! `generator generate` and `generator check`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::core::types::{GeneratedUnit, PackageTier, TierName};
use crate::io::config::{CONFIG_FILE_NAME, GeneratorConfig, load_config};
use crate::io::inputs::load_static_inputs;
use crate::io::materialize::{materialize_all, unit_path};
use crate::sweep::plan_sweep;

/// Canonical locations for one generator invocation.
#[derive(Debug, Clone)]
pub struct GeneratorPaths {
    /// Directory holding the static inputs and receiving the packages.
    pub root: PathBuf,
    pub config_path: PathBuf,
}

impl GeneratorPaths {
    pub fn new(root: impl Into<PathBuf>, config_path: Option<PathBuf>) -> Self {
        let root = root.into();
        let config_path = config_path.unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
        Self { root, config_path }
    }

    pub fn load_config(&self) -> Result<GeneratorConfig> {
        load_config(&self.config_path)
    }
}

/// Per-tier counts reported after a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSummary {
    pub name: TierName,
    pub arities: usize,
    pub type_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub tiers: Vec<TierSummary>,
    pub files_written: usize,
}

/// Render every unit, then write them all under `root`.
///
/// Rendering happens before the first write, so template or input failures
/// leave the tree untouched. A write failure aborts the sweep; files already
/// written stay written.
pub fn generate(root: &Path, cfg: &GeneratorConfig) -> Result<GenerationSummary> {
    info!(root = %root.display(), version = %cfg.version, "generator setup");
    let units = render_all(root, cfg)?;
    let files_written = materialize_all(root, &units, &cfg.meta_suffix)?;
    let tiers = cfg.tiers().iter().map(tier_summary).collect();
    info!(files_written, "generation complete");
    Ok(GenerationSummary {
        tiers,
        files_written,
    })
}

/// Why an on-disk file does not match the rendered unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    Missing,
    Differs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub relative_path: String,
    pub reason: StaleReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate { files: usize },
    Stale(Vec<StaleFile>),
}

/// Compare rendered output with the files on disk without writing anything.
pub fn check(root: &Path, cfg: &GeneratorConfig) -> Result<CheckOutcome> {
    let units = render_all(root, cfg)?;
    let mut stale = Vec::new();
    for unit in &units {
        if let Some(reason) = compare_unit(root, unit)? {
            warn!(path = %unit.relative_path, ?reason, "stale generated file");
            stale.push(StaleFile {
                relative_path: unit.relative_path.clone(),
                reason,
            });
        }
    }
    if stale.is_empty() {
        return Ok(CheckOutcome::UpToDate { files: units.len() });
    }
    Ok(CheckOutcome::Stale(stale))
}

fn render_all(root: &Path, cfg: &GeneratorConfig) -> Result<Vec<GeneratedUnit>> {
    let inputs = load_static_inputs(root, &cfg.files).context("load static inputs")?;
    plan_sweep(cfg, &inputs).context("render packages")
}

fn compare_unit(root: &Path, unit: &GeneratedUnit) -> Result<Option<StaleReason>> {
    let path = unit_path(root, unit);
    if !path.exists() {
        return Ok(Some(StaleReason::Missing));
    }
    let current = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    Ok((current != unit.content.as_bytes()).then_some(StaleReason::Differs))
}

fn tier_summary(tier: &PackageTier) -> TierSummary {
    let arities = tier.arities().count();
    TierSummary {
        name: tier.name,
        arities,
        type_files: arities * 2,
    }
}
