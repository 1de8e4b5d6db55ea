//! Shared domain types for the FarmIQ agricultural advisory service
//!
//! This crate holds everything that does not need I/O: request queries,
//! the closed disease label set, the nutrient reference table, the
//! deficiency selection rule, advisory texts and form validation.

pub mod advisory;
pub mod models;
pub mod validation;

pub use advisory::*;
pub use models::*;
pub use validation::*;
