//! Library error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    /// The output sink refused the rendered buffer.
    #[error("write dump output: {0}")]
    Sink(#[from] std::io::Error),

    #[error("invalid dump config: {0}")]
    InvalidConfig(String),
}
