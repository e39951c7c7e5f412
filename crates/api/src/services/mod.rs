//! External service integrations.

pub mod pdf;
pub mod sms;

pub use pdf::{PdfError, PdfGenerator};
pub use sms::TwilioSmsService;
