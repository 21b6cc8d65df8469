//! Utility functions for short code handling and input checks.
//!
//! - [`code_generator`] - Random short code generation
//! - [`code_validator`] - Rules for caller-supplied codes
//! - [`url_validator`] - Syntax check for original URLs

pub mod code_generator;
pub mod code_validator;
pub mod url_validator;
