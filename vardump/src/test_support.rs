//! Test-only sinks, exit hooks and sample structs.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::io::terminate::Terminate;

/// Cloneable in-memory sink; every clone appends to the same buffer.
#[derive(Clone, Default)]
pub struct SharedSink {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedSink {
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink whose every write fails.
pub struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Exit hook that records requested codes instead of exiting.
#[derive(Clone, Default)]
pub struct RecordingExit {
    codes: Arc<Mutex<Vec<i32>>>,
    watched: Option<SharedSink>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl RecordingExit {
    /// Also snapshot `sink` at each termination request.
    pub fn watching(sink: SharedSink) -> Self {
        Self {
            watched: Some(sink),
            ..Self::default()
        }
    }

    pub fn codes(&self) -> Vec<i32> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn output_at_exit(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Terminate for RecordingExit {
    fn terminate(&self, code: i32) {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(code);
        if let Some(sink) = &self.watched {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(sink.contents());
        }
    }
}

/// One public and one private field.
pub struct Account {
    pub owner: String,
    secret: String,
}

impl Account {
    pub fn new(owner: &str, secret: &str) -> Self {
        Self {
            owner: owner.to_string(),
            secret: secret.to_string(),
        }
    }
}

crate::dump_struct!(Account { owner, secret });

pub struct Wrapper {
    pub label: &'static str,
    pub inner: Account,
}

crate::dump_struct!(Wrapper { label, inner });

/// Generic over its field type.
pub struct Pair<T> {
    pub left: T,
    pub right: T,
}

crate::dump_struct!(Pair<T> { left, right });

pub struct Empty;

crate::dump_struct!(Empty {});
