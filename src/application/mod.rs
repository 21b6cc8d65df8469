//! Application layer services implementing business logic.
//!
//! Services orchestrate validation and store calls and return the closed
//! [`crate::domain::errors::ShortenError`] taxonomy to their callers. They hold
//! no shared in-memory state across requests.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Short code allocation
//! - [`services::resolution_service::ResolutionService`] - Resolution and click dispatch
//! - [`services::user_service::UserService`] - User registration and link listing

pub mod services;
