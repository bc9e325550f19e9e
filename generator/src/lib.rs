//! Generator for the OneOf Unity discriminated-union packages.
//!
//! For every arity in a tier's span the generator renders two C# types, a
//! value-semantics `OneOf<..>` struct and a reference-semantics `OneOfBase<..>`
//! class, plus a `package.json` manifest and copies of the shared static files.
//!
//! - **[`core`]**: Pure, deterministic logic (slot narrowing, union shapes, types).
//! - **[`render`]**: Pure text renderers for union types and manifests.
//! - **[`sweep`]**: Enumerates tiers and arities into a flat list of units.
//! - **[`io`]**: Side-effecting operations (config, static inputs, file writes).
//!
//! [`generate`] coordinates the sweep with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
pub mod render;
pub mod sweep;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
