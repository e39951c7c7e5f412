//! Domain layer for the patient commons service.
//!
//! This crate contains:
//! - Patient metadata request models
//! - The clinical vocabulary behind allowed-values checks
//! - Non-null merge support for optional-field records
//! - The SMS sender abstraction

pub mod merge;
pub mod models;
pub mod services;
pub mod vocabulary;

#[doc(hidden)]
pub use tracing as __tracing;
