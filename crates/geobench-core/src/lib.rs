//! geobench core - Benchmark protocol, domain models and configuration
//!
//! This crate owns everything that does not depend on a particular database:
//! point generation, the `GeoBackend` port, the warmup/timed/reduce runner
//! and the sequential suite that ties them together.

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod ports;
pub mod runner;
pub mod stats;
pub mod suite;

pub use error::{GeobenchError, Result};
