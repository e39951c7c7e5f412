//! HTTP middleware components.

pub mod logging;
pub mod request_logging;

pub use logging::init_logging;
pub use request_logging::{request_logging, RequestId, REQUEST_ID_HEADER};
