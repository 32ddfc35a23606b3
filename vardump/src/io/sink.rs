//! Output sinks receiving rendered dumps.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Any writable byte stream.
pub type Sink = Box<dyn Write + Send>;

/// The process's standard output.
pub fn stdout() -> Sink {
    Box::new(io::stdout())
}

/// Holder for the configured sink; each dump lands in a single locked write.
pub struct SinkSlot {
    inner: Mutex<Sink>,
}

impl SinkSlot {
    pub fn new(sink: Sink) -> Self {
        Self {
            inner: Mutex::new(sink),
        }
    }

    /// Write all of `bytes`, then flush.
    pub fn write_once(&self, bytes: &[u8]) -> io::Result<()> {
        let mut sink = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(bytes)?;
        sink.flush()
    }
}
