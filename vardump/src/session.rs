//! Dump façade: numbering, rendering and a single flush per call.
//!
//! A [`Dumper`] owns its configuration, output sink and termination hook. The
//! free functions [`dump`] and [`dump_and_exit`] (and the `dump!`/`dd!`
//! macros) go through a process-wide instance writing to stdout, which
//! [`configure`] and [`reset`] can swap out, mainly for tests.
//!
//! The free functions hold the process-wide lock only long enough to take a
//! snapshot; rendering, the sink write and the termination hook all run
//! unlocked, so a hook or a `shape` impl may reconfigure or dump again.

use std::fmt::Write;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::{debug, instrument, warn};

use crate::core::render::Renderer;
use crate::core::types::Dump;
use crate::error::DumpError;
use crate::io::config::DumpConfig;
use crate::io::pool::BufferPool;
use crate::io::sink::{self, Sink, SinkSlot};
use crate::io::terminate::{ProcessExit, Terminate};

static BUFFERS: BufferPool = BufferPool::new();

static DEFAULT: LazyLock<RwLock<Dumper>> = LazyLock::new(|| RwLock::new(Dumper::new()));

/// Clones share the sink and termination hook of the original.
#[derive(Clone)]
pub struct Dumper {
    config: DumpConfig,
    sink: Arc<SinkSlot>,
    terminator: Arc<dyn Terminate>,
}

impl Dumper {
    /// Default config, stdout sink, real process exit.
    pub fn new() -> Self {
        Self {
            config: DumpConfig::default(),
            sink: Arc::new(SinkSlot::new(sink::stdout())),
            terminator: Arc::new(ProcessExit),
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: DumpConfig) -> Result<Self, DumpError> {
        self.set_config(config)?;
        Ok(self)
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn with_terminator(mut self, terminator: impl Terminate + 'static) -> Self {
        self.set_terminator(terminator);
        self
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DumpConfig) -> Result<(), DumpError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Point this dumper at a new sink; clones made earlier keep the old one.
    pub fn set_sink(&mut self, sink: Sink) {
        self.sink = Arc::new(SinkSlot::new(sink));
    }

    pub fn set_terminator(&mut self, terminator: impl Terminate + 'static) {
        self.terminator = Arc::new(terminator);
    }

    /// Render `values` exactly as [`Dumper::try_dump`] would write them.
    pub fn render_to_string(&self, values: &[&dyn Dump]) -> String {
        let mut buf = BUFFERS.acquire();
        self.render_into(&mut buf, values);
        buf.clone()
    }

    /// Render every value, numbered from 1, and write them to the sink at once.
    #[instrument(skip_all, fields(values = values.len()))]
    pub fn try_dump(&self, values: &[&dyn Dump]) -> Result<(), DumpError> {
        let mut buf = BUFFERS.acquire();
        self.render_into(&mut buf, values);
        if let Err(err) = self.sink.write_once(buf.as_bytes()) {
            warn!(err = %err, "dump sink write failed");
            return Err(DumpError::Sink(err));
        }
        debug!(bytes = buf.len(), "dump flushed");
        Ok(())
    }

    /// Like [`Dumper::try_dump`], but a sink failure panics.
    ///
    /// Debug output that silently vanishes is worse than a loud failure, the
    /// same contract `println!` has.
    pub fn dump(&self, values: &[&dyn Dump]) {
        if let Err(err) = self.try_dump(values) {
            panic!("{err}");
        }
    }

    /// Dump, then ask the termination hook to exit with status 0.
    ///
    /// Returns only if the hook itself returns.
    pub fn dump_and_exit(&self, values: &[&dyn Dump]) {
        self.dump(values);
        self.terminator.terminate(crate::exit_codes::OK);
    }

    fn render_into(&self, buf: &mut String, values: &[&dyn Dump]) {
        for (i, value) in values.iter().enumerate() {
            // Writing into a String cannot fail.
            let _ = write!(buf, "{} ", i + 1);
            Renderer::new(buf, &self.config).render(*value, 1);
            buf.push('\n');
        }
    }
}

impl Default for Dumper {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot() -> Dumper {
    DEFAULT.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Dump through the process-wide [`Dumper`]; panics if the sink fails.
pub fn dump(values: &[&dyn Dump]) {
    snapshot().dump(values);
}

/// Dump through the process-wide [`Dumper`], then invoke its termination hook.
pub fn dump_and_exit(values: &[&dyn Dump]) {
    snapshot().dump_and_exit(values);
}

/// Reconfigure the process-wide [`Dumper`].
///
/// ```
/// vardump::configure(|dumper| {
///     dumper.set_sink(Box::new(std::io::sink()));
/// });
/// vardump::dump!(1);
/// vardump::reset();
/// ```
pub fn configure<F: FnOnce(&mut Dumper)>(f: F) {
    let mut dumper = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut dumper);
}

/// Restore the process-wide [`Dumper`] to stdout, defaults and real exit.
pub fn reset() {
    configure(|dumper| *dumper = Dumper::new());
}
