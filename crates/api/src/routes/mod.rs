//! HTTP route handlers.

pub mod documents;
pub mod notifications;
pub mod patient_meta;
pub mod status;
