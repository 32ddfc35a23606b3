//! Process termination as an injectable collaborator.
//!
//! [`Dumper::dump_and_exit`](crate::Dumper::dump_and_exit) ends the process
//! through a [`Terminate`] implementation instead of calling
//! `std::process::exit` directly, so tests can record the request.

/// Terminate the host process with an exit code.
pub trait Terminate: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Ends the process via `std::process::exit`.
pub struct ProcessExit;

impl Terminate for ProcessExit {
    fn terminate(&self, code: i32) {
        tracing::debug!(code, "terminating process after dump");
        std::process::exit(code);
    }
}
