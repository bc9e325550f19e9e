//! Text renderers. Both are pure: identical inputs yield byte-identical output.

pub mod arity;
pub mod manifest;
