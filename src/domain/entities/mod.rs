//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - An owner of short links, identified by a unique email
//! - [`Link`] - A short code mapped to an original URL, with a click counter
//!
//! Creation inputs are separate structs (`NewUser`, `NewLink`) so that
//! store-assigned fields (ids, timestamps, counters) never come from callers.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};
