//! Stable exit codes for the vardump CLI and the exit hook.

/// Dump completed.
pub const OK: i32 = 0;
/// Input could not be read, parsed or configured, or the sink failed.
pub const INVALID: i32 = 1;
