//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`errors`] - Closed error taxonomy shared by services and stores
//! - [`store`] - Storage contract implemented by the infrastructure layer
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::ResolutionService`] resolves a code
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] applies the atomic increment with retry
//! 4. Failures are logged by the worker and never reach the resolving caller

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod errors;
pub mod store;
