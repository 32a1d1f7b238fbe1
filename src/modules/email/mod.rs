pub mod manager;
mod smtp;
mod templates;

pub use manager::{Notifier, SmtpNotifier};
pub use smtp::{EmailError, SmtpCredentials};
pub use templates::{build_message, send_email};
