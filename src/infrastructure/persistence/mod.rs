//! Store implementations.
//!
//! - [`PgStore`] - PostgreSQL via SQLx, schema in `migrations/`
//! - [`InMemoryStore`] - process-local, same guarantees, no durability

pub mod memory_store;
pub mod pg_store;

pub use memory_store::InMemoryStore;
pub use pg_store::PgStore;
