//! Deterministic, pure logic shared by the generator.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod shape;
pub mod slots;
pub mod types;
