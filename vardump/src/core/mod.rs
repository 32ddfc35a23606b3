//! Deterministic, pure logic behind every dump.
//!
//! Core modules are free of I/O side effects. They walk in-memory values and
//! append text to caller-provided buffers, so identical inputs always produce
//! identical output.

pub mod classify;
pub mod documents;
pub mod impls;
pub mod render;
pub mod types;
