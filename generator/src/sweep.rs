//! Sweep driver: every tier, every arity, both variant kinds, plus package files.
//!
//! Produces the full list of units in memory; writing them is left to
//! [`crate::io::materialize`].

use std::collections::HashSet;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::core::types::{ArityConfig, GeneratedUnit, PackageTier, StaticInputs, VariantKind};
use crate::io::config::GeneratorConfig;
use crate::render::arity::TypeRenderer;
use crate::render::manifest::render_manifest;

/// Relative path of a file directly inside a package directory.
pub fn package_file_path(tier: &PackageTier, file_name: &str) -> String {
    format!("{}/{}", tier.package_dir, file_name)
}

/// Relative path of a generated type inside a package's runtime directory.
pub fn type_file_path(cfg: &GeneratorConfig, tier: &PackageTier, config: ArityConfig) -> String {
    format!(
        "{}/{}/{}",
        tier.package_dir,
        cfg.runtime_dir,
        config.file_name()
    )
}

/// Plan one tier: copied static files, the manifest, then both variants per arity.
pub fn plan_tier(
    cfg: &GeneratorConfig,
    tier: &PackageTier,
    inputs: &StaticInputs,
    renderer: &TypeRenderer,
) -> Result<Vec<GeneratedUnit>> {
    info!(
        tier = %tier.name,
        package = %tier.package_dir,
        first = tier.arity_span.0,
        last = tier.arity_span.1,
        "generating tier"
    );
    let mut units = Vec::new();

    units.push(GeneratedUnit::new(
        package_file_path(tier, &cfg.files.license),
        inputs.license.as_str(),
    ));
    if tier.copies_readme {
        units.push(GeneratedUnit::new(
            package_file_path(tier, &cfg.files.readme),
            inputs.readme.as_str(),
        ));
    }
    units.push(GeneratedUnit::new(
        package_file_path(tier, &cfg.files.third_party),
        inputs.third_party.as_str(),
    ));
    units.push(GeneratedUnit::new(
        package_file_path(tier, &cfg.files.manifest),
        render_manifest(
            &cfg.package,
            tier,
            &cfg.version,
            Some(tier.description.as_str()),
        )?,
    ));

    for arity in tier.arities() {
        for kind in VariantKind::ALL {
            let config = ArityConfig::new(arity, kind)?;
            units.push(GeneratedUnit::new(
                type_file_path(cfg, tier, config),
                renderer.render(config)?,
            ));
        }
    }

    debug!(tier = %tier.name, units = units.len(), "planned tier");
    Ok(units)
}

/// Plan the whole sweep across all tiers.
///
/// Fails if two units would target the same path.
pub fn plan_sweep(cfg: &GeneratorConfig, inputs: &StaticInputs) -> Result<Vec<GeneratedUnit>> {
    cfg.validate()?;
    let renderer = TypeRenderer::new()?;
    let mut units = Vec::new();
    for tier in cfg.tiers() {
        units.extend(plan_tier(cfg, &tier, inputs, &renderer)?);
    }

    let mut seen = HashSet::new();
    for unit in &units {
        if !seen.insert(unit.relative_path.as_str()) {
            bail!("two generated units target {}", unit.relative_path);
        }
    }
    Ok(units)
}
