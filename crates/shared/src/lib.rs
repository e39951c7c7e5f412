//! Shared utilities for the patient commons service.
//!
//! Currently holds the allowed-values validation rule and its registry, used
//! by the domain crate to bind clinical vocabularies to request fields.

pub mod allowed_values;
