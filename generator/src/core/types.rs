//! Shared deterministic types for the generator core.
//!
//! These types define the contracts between the sweep driver, the renderers and
//! the materializer. They carry no I/O and are rebuilt from scratch on every run.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Largest arity any tier may span.
pub const MAX_ARITY: usize = 32;

/// Which of the two generated representations of a union is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// `readonly struct OneOf<..>`: directly constructible, implicit conversions.
    Value,
    /// `class OneOfBase<..>`: built only by copying a value variant.
    Base,
}

impl VariantKind {
    pub const ALL: [VariantKind; 2] = [VariantKind::Value, VariantKind::Base];

    pub fn is_value(self) -> bool {
        matches!(self, VariantKind::Value)
    }

    /// Generated type name (without generic arguments).
    pub fn type_name(self) -> &'static str {
        match self {
            VariantKind::Value => "OneOf",
            VariantKind::Base => "OneOfBase",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariantKind::Value => "value",
            VariantKind::Base => "base",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "value" => Ok(VariantKind::Value),
            "base" => Ok(VariantKind::Base),
            other => Err(anyhow!("unknown variant kind {other:?} (expected value|base)")),
        }
    }
}

/// One renderer invocation: an arity plus the representation to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArityConfig {
    arity: usize,
    kind: VariantKind,
}

impl ArityConfig {
    /// Build a config, rejecting arities outside `1..=MAX_ARITY`.
    pub fn new(arity: usize, kind: VariantKind) -> Result<Self> {
        if !(1..=MAX_ARITY).contains(&arity) {
            bail!("arity {arity} outside supported range 1..={MAX_ARITY}");
        }
        Ok(Self { arity, kind })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    /// Relative file name of the generated type, e.g. `OneOfBaseT2.generated.cs` for arity 3.
    pub fn file_name(&self) -> String {
        format!("{}T{}.generated.cs", self.kind.type_name(), self.arity - 1)
    }
}

/// A rendered file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub relative_path: String,
    pub content: String,
}

impl GeneratedUnit {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Static text files copied verbatim into each package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticInputs {
    pub license: String,
    pub readme: String,
    pub third_party: String,
}

/// Distribution tier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Base,
    Extended,
}

impl TierName {
    pub fn as_str(self) -> &'static str {
        match self {
            TierName::Base => "base",
            TierName::Extended => "extended",
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "base" => Ok(TierName::Base),
            "extended" => Ok(TierName::Extended),
            other => Err(anyhow!("unknown tier {other:?} (expected base|extended)")),
        }
    }
}

/// A package grouping: which arities it ships and how its manifest reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTier {
    pub name: TierName,
    /// Inclusive arity span.
    pub arity_span: (usize, usize),
    /// Whether the manifest declares a dependency on the base tier package.
    pub depends_on_base_tier: bool,
    pub description: String,
    /// Appended to the manifest display name (e.g. `" Extended"`).
    pub extra_display_suffix: String,
    /// Appended to the manifest package identifier (e.g. `".extended"`).
    pub manifest_name_suffix: String,
    /// Directory of the package, relative to the output root.
    pub package_dir: String,
    /// Whether the shared readme is copied into the package.
    pub copies_readme: bool,
}

impl PackageTier {
    pub fn arities(&self) -> RangeInclusive<usize> {
        self.arity_span.0..=self.arity_span.1
    }
}

/// Ordered symbolic type parameters of one arity: `T0, T1, .. T{N-1}`.
///
/// A slot's position is the union discriminant it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDescriptor {
    names: Vec<String>,
}

impl SlotDescriptor {
    pub fn for_arity(arity: usize) -> Self {
        Self {
            names: (0..arity).map(|i| format!("T{i}")).collect(),
        }
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Comma separated generic argument list, e.g. `T0, T1, T2`.
    pub fn joined(&self) -> String {
        self.names.join(", ")
    }
}
