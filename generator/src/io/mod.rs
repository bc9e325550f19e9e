//! I/O helpers for generator commands.

pub mod config;
pub mod inputs;
pub mod materialize;
