use std::path::{Path, PathBuf};

use log::debug;

use super::smtp::{EmailError, SmtpCredentials};
use super::templates::send_email;

/// Delivery channel for notifications
pub trait Notifier {
    fn notify(&self, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// Sends notifications by email using credentials read from disk on every call
pub struct SmtpNotifier {
    credentials_path: PathBuf,
    recipients: Vec<String>,
}

impl SmtpNotifier {
    pub fn new<P: AsRef<Path>>(credentials_path: P, recipients: Vec<String>) -> Self {
        Self {
            credentials_path: credentials_path.as_ref().to_path_buf(),
            recipients,
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<(), EmailError> {
        debug!(
            "Loading SMTP credentials from {}",
            self.credentials_path.display()
        );
        let creds = SmtpCredentials::load(&self.credentials_path)?;
        send_email(&creds, &self.recipients, subject, body)
    }
}
