//! Domain services for patient commons.

pub mod notification;

pub use notification::{MockSmsSender, SentSms, SmsDelivery, SmsError, SmsSender};
