//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation where the domain does not validate itself.

pub mod health;
pub mod link;
pub mod shorten;
pub mod user;
