//! Generator configuration stored in `oneof-generator.toml` at the output root.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::types::{MAX_ARITY, PackageTier, TierName};

/// Default config file name, resolved against the output root.
pub const CONFIG_FILE_NAME: &str = "oneof-generator.toml";

/// Generator configuration (TOML).
///
/// Every field has a default, so a missing file or a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Version written into every package manifest.
    pub version: String,

    /// Base tier spans arities `1..=base_max_arity + 1`.
    pub base_max_arity: usize,

    /// Extended tier spans arities `base_max_arity + 2..=extended_max_arity + 1`.
    pub extended_max_arity: usize,

    /// Sidecar metadata suffix deleted alongside every regenerated file.
    pub meta_suffix: String,

    /// Directory inside each package that receives the generated types.
    pub runtime_dir: String,

    pub files: FileNames,
    pub package: PackageMetadata,
    pub base: TierConfig,
    pub extended: TierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileNames {
    pub license: String,
    pub readme: String,
    pub third_party: String,
    pub manifest: String,
}

/// Manifest fields shared by every tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackageMetadata {
    /// Identifier of the base package; tiers append their suffix.
    pub id: String,
    pub author: String,
    pub display_name: String,
    pub license: String,
    pub licenses_url: String,
    pub documentation_url: String,
    pub keywords: Vec<String>,
}

/// Per-tier settings. A `[base]` or `[extended]` table, when present, must be complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierConfig {
    /// Package directory relative to the output root.
    pub package_dir: String,
    pub description: String,
    pub display_suffix: String,
    pub name_suffix: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            license: "LICENSE.md".to_string(),
            readme: "README.md".to_string(),
            third_party: "Third Party Notices.md".to_string(),
            manifest: "package.json".to_string(),
        }
    }
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            id: "com.simplycods.oneofunity".to_string(),
            author: "Simply-Cods".to_string(),
            display_name: "OneOf Unity".to_string(),
            license: "MIT".to_string(),
            licenses_url: "https://github.com/Simply-Cods/OneOfUnity/blob/main/LICENSE.md"
                .to_string(),
            documentation_url: "https://github.com/Simply-Cods/OneOfUnity/blob/main/".to_string(),
            keywords: vec!["discriminated-unions".to_string()],
        }
    }
}

const BASE_DESCRIPTION: &str = "Easy to use F#-like discriminated unions for C# with exhaustive compile time matching.";

impl TierConfig {
    fn base_default() -> Self {
        Self {
            package_dir: "OneOfUnity".to_string(),
            description: BASE_DESCRIPTION.to_string(),
            display_suffix: String::new(),
            name_suffix: String::new(),
        }
    }

    fn extended_default() -> Self {
        Self {
            package_dir: "OneOfUnity.Extended".to_string(),
            description: format!(
                "{BASE_DESCRIPTION} Now extended to support a ridiculous amount of generic arguments."
            ),
            display_suffix: " Extended".to_string(),
            name_suffix: ".extended".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            base_max_arity: 8,
            extended_max_arity: 31,
            meta_suffix: ".meta".to_string(),
            runtime_dir: "Runtime".to_string(),
            files: FileNames::default(),
            package: PackageMetadata::default(),
            base: TierConfig::base_default(),
            extended: TierConfig::extended_default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(anyhow!("version must be non-empty"));
        }
        if self.base_max_arity == 0 {
            return Err(anyhow!("base_max_arity must be > 0"));
        }
        if self.extended_max_arity <= self.base_max_arity {
            return Err(anyhow!(
                "extended_max_arity ({}) must be > base_max_arity ({})",
                self.extended_max_arity,
                self.base_max_arity
            ));
        }
        if self.extended_max_arity + 1 > MAX_ARITY {
            return Err(anyhow!(
                "extended_max_arity ({}) spans past the supported arity {}",
                self.extended_max_arity,
                MAX_ARITY
            ));
        }
        if self.meta_suffix.is_empty() {
            return Err(anyhow!("meta_suffix must be non-empty"));
        }
        for (field, value) in [
            ("runtime_dir", &self.runtime_dir),
            ("files.license", &self.files.license),
            ("files.readme", &self.files.readme),
            ("files.third_party", &self.files.third_party),
            ("files.manifest", &self.files.manifest),
            ("package.id", &self.package.id),
            ("base.package_dir", &self.base.package_dir),
            ("extended.package_dir", &self.extended.package_dir),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{field} must be non-empty"));
            }
        }
        if self.base.package_dir == self.extended.package_dir {
            return Err(anyhow!("base and extended tiers must use distinct package_dir"));
        }
        Ok(())
    }

    /// The two distribution tiers, base first.
    pub fn tiers(&self) -> [PackageTier; 2] {
        [
            PackageTier {
                name: TierName::Base,
                arity_span: (1, self.base_max_arity + 1),
                depends_on_base_tier: false,
                description: self.base.description.clone(),
                extra_display_suffix: self.base.display_suffix.clone(),
                manifest_name_suffix: self.base.name_suffix.clone(),
                package_dir: self.base.package_dir.clone(),
                copies_readme: true,
            },
            // the extended package ships its own readme
            PackageTier {
                name: TierName::Extended,
                arity_span: (self.base_max_arity + 2, self.extended_max_arity + 1),
                depends_on_base_tier: true,
                description: self.extended.description.clone(),
                extra_display_suffix: self.extended.display_suffix.clone(),
                manifest_name_suffix: self.extended.name_suffix.clone(),
                package_dir: self.extended.package_dir.clone(),
                copies_readme: false,
            },
        ]
    }

    pub fn tier(&self, name: TierName) -> PackageTier {
        let [base, extended] = self.tiers();
        match name {
            TierName::Base => base,
            TierName::Extended => extended,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GeneratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => {
            info!(path = %path.display(), "loading generator config");
            toml::from_str::<GeneratorConfig>(&contents)
                .with_context(|| format!("parse generator config {}", path.display()))?
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no generator config, using built-in tiers");
            GeneratorConfig::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read generator config {}", path.display()));
        }
    };
    cfg.validate()
        .with_context(|| format!("validate generator config {}", path.display()))?;
    Ok(cfg)
}

/// Write `cfg` as TOML, replacing `path` only once the whole file is on disk.
///
/// Invalid configs are rejected before anything is written.
pub fn write_config(path: &Path, cfg: &GeneratorConfig) -> Result<()> {
    cfg.validate().context("refusing to write invalid generator config")?;
    let mut toml = toml::to_string_pretty(cfg).context("serialize generator config")?;
    toml.push('\n');

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let staged = staging_path(path);
    fs::write(&staged, toml).with_context(|| format!("write {}", staged.display()))?;
    if let Err(err) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        return Err(err).with_context(|| format!("replace {}", path.display()));
    }
    info!(path = %path.display(), version = %cfg.version, "wrote generator config");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
