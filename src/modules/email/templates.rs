use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

use super::smtp::{EmailError, SmtpCredentials};
use crate::utils::logging::format_sensitive;
use crate::SMTP_TIMEOUT;

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .trim()
        .parse()
        .map_err(|e| EmailError::Address(format!("{}: {}", address, e)))
}

/// Build a plain-text notification from `sender` to every recipient
pub fn build_message(
    sender: &str,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> Result<Message, EmailError> {
    if recipients.is_empty() {
        return Err(EmailError::Address("no recipients given".to_string()));
    }

    let mut builder = Message::builder().from(parse_mailbox(sender)?);
    for recipient in recipients {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    builder
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| EmailError::Message(e.to_string()))
}

/// Send one notification over SMTP wrapped in TLS
pub fn send_email(
    creds: &SmtpCredentials,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> Result<(), EmailError> {
    let email = build_message(&creds.username, recipients, subject, body)?;

    let tls_parameters = TlsParameters::builder(creds.host.clone())
        .build()
        .map_err(|e| EmailError::Transport(format!("Failed to build TLS parameters: {}", e)))?;

    let mailer = SmtpTransport::relay(&creds.host)
        .map_err(|e| EmailError::Transport(e.to_string()))?
        .credentials(Credentials::new(
            creds.username.clone(),
            creds.password.clone(),
        ))
        .port(creds.port)
        .tls(Tls::Wrapper(tls_parameters))
        .pool_config(PoolConfig::new().max_size(1))
        .timeout(Some(Duration::from_secs(SMTP_TIMEOUT)))
        .build();

    mailer
        .send(&email)
        .map_err(|e| EmailError::Transport(e.to_string()))?;

    info!(
        "Notification sent via {}:{} as {} to {} recipient(s)",
        creds.host,
        creds.port,
        format_sensitive(&creds.username),
        recipients.len()
    );
    Ok(())
}
