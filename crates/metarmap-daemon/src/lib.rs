//! Library surface shared by the daemon binary and its tests.

pub mod config;
pub mod driver;
pub mod overlay;
pub mod scheduler;
