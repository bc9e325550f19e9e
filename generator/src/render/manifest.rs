//! Package manifest (`package.json`) renderer.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::types::PackageTier;
use crate::io::config::PackageMetadata;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    name: String,
    version: &'a str,
    author: Author<'a>,
    display_name: String,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dependencies: Option<BTreeMap<&'a str, &'a str>>,
    license: &'a str,
    licenses_url: &'a str,
    documentation_url: &'a str,
    keywords: &'a [String],
}

#[derive(Debug, Serialize)]
struct Author<'a> {
    name: &'a str,
}

/// Render the manifest of one tier.
///
/// A missing description is written as an empty string. Dependent tiers declare
/// the base package at the same version.
pub fn render_manifest(
    package: &PackageMetadata,
    tier: &PackageTier,
    version: &str,
    description: Option<&str>,
) -> Result<String> {
    let manifest = Manifest {
        name: format!("{}{}", package.id, tier.manifest_name_suffix),
        version,
        author: Author {
            name: &package.author,
        },
        display_name: format!("{}{}", package.display_name, tier.extra_display_suffix),
        description: description.unwrap_or_default(),
        dependencies: tier
            .depends_on_base_tier
            .then(|| BTreeMap::from([(package.id.as_str(), version)])),
        license: &package.license,
        licenses_url: &package.licenses_url,
        documentation_url: &package.documentation_url,
        keywords: &package.keywords,
    };

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    manifest
        .serialize(&mut serializer)
        .with_context(|| format!("serialize {} manifest", tier.name))?;
    let mut rendered = String::from_utf8(buf).context("manifest is not utf-8")?;
    rendered.push('\n');
    Ok(rendered)
}
