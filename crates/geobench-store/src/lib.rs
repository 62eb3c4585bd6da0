//! geobench store - Backend adapters
//!
//! Implements the `GeoBackend` port for PostGIS and MongoDB, plus an
//! in-memory reference backend.

pub mod memory;
pub mod mongo;
pub mod postgres;

pub use memory::MemoryBackend;
pub use mongo::{MongoBackend, MongoConfig};
pub use postgres::{PostgisBackend, PostgresConfig};
