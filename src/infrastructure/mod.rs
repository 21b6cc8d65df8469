//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::store::Store`] contract defined by the
//! domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory stores

pub mod persistence;
