//! Side-effecting collaborators of the dump façade.

pub mod config;
pub mod pool;
pub mod sink;
pub mod terminate;
