use std::fs;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Errors raised while loading credentials or sending a notification
#[derive(Debug)]
pub enum EmailError {
    CredentialsFile(io::Error),
    InvalidCredentials(String),
    Address(String),
    Message(String),
    Transport(String),
}

impl From<io::Error> for EmailError {
    fn from(error: io::Error) -> Self {
        EmailError::CredentialsFile(error)
    }
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::CredentialsFile(e) => write!(f, "Cannot read SMTP credentials: {}", e),
            EmailError::InvalidCredentials(msg) => write!(f, "Invalid SMTP credentials: {}", msg),
            EmailError::Address(msg) => write!(f, "Invalid address: {}", msg),
            EmailError::Message(msg) => write!(f, "Failed to create email: {}", msg),
            EmailError::Transport(msg) => write!(f, "Failed to send email: {}", msg),
        }
    }
}

impl std::error::Error for EmailError {}

/// SMTP account used to send notifications
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    // SMTP server hostname
    pub host: String,
    // SMTP port, implicit TLS (typically 465)
    pub port: u16,
    // Sender address, also the login name
    #[serde(alias = "sender")]
    pub username: String,
    pub password: String,
}

// Keep the password out of debug output
impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl SmtpCredentials {
    /// Load and decode a base64 credentials file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EmailError> {
        let encoded = fs::read_to_string(path)?;
        Self::decode(&encoded)
    }

    /// Decode base64 text holding either a JSON record or the legacy
    /// `host:port:sender:password` form.
    pub fn decode(encoded: &str) -> Result<Self, EmailError> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|e| EmailError::InvalidCredentials(format!("not base64: {}", e)))?;
        let text = String::from_utf8(raw)
            .map_err(|_| EmailError::InvalidCredentials("not valid UTF-8".to_string()))?;
        let text = text.trim();

        let creds = if text.starts_with('{') {
            serde_json::from_str::<SmtpCredentials>(text)
                .map_err(|e| EmailError::InvalidCredentials(e.to_string()))?
        } else {
            Self::parse_legacy(text)?
        };

        if creds.host.is_empty() || creds.username.is_empty() {
            return Err(EmailError::InvalidCredentials(
                "host and sender must not be empty".to_string(),
            ));
        }
        Ok(creds)
    }

    /// Encode as base64 JSON, the form `decode` reads without delimiter ambiguity
    pub fn encode(&self) -> Result<String, EmailError> {
        let json = serde_json::to_string(self)
            .map_err(|e| EmailError::InvalidCredentials(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }

    // The password is everything after the third colon so it may contain colons itself
    fn parse_legacy(text: &str) -> Result<Self, EmailError> {
        let mut fields = text.splitn(4, ':');
        let (host, port, sender, password) =
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(h), Some(p), Some(s), Some(pw)) => (h, p, s, pw),
                _ => {
                    return Err(EmailError::InvalidCredentials(
                        "expected host:port:sender:password".to_string(),
                    ))
                }
            };

        let port = port
            .parse::<u16>()
            .map_err(|_| EmailError::InvalidCredentials(format!("invalid port: {}", port)))?;

        Ok(Self {
            host: host.to_string(),
            port,
            username: sender.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn legacy(text: &str) -> String {
        STANDARD.encode(text)
    }

    #[test]
    fn test_decode_legacy_record() {
        let creds = SmtpCredentials::decode(&legacy("smtp.example.com:465:bot@example.com:secret"))
            .unwrap();
        assert_eq!(creds.host, "smtp.example.com");
        assert_eq!(creds.port, 465);
        assert_eq!(creds.username, "bot@example.com");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_password_with_colons_survives() {
        let creds =
            SmtpCredentials::decode(&legacy("smtp.example.com:465:bot@example.com:a:b:c")).unwrap();
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn test_decode_json_record() {
        let json = r#"{"host":"smtp.example.com","port":465,"sender":"bot@example.com","password":"p:w"}"#;
        let creds = SmtpCredentials::decode(&STANDARD.encode(json)).unwrap();
        assert_eq!(creds.username, "bot@example.com");
        assert_eq!(creds.password, "p:w");
    }

    #[test]
    fn test_encode_is_readable_by_decode() {
        let creds = SmtpCredentials {
            host: "mail.example.org".to_string(),
            port: 465,
            username: "overmind@example.org".to_string(),
            password: "pa:ss\"word".to_string(),
        };
        let decoded = SmtpCredentials::decode(&creds.encode().unwrap()).unwrap();
        assert_eq!(decoded, creds);
    }

    #[test]
    fn test_rejects_malformed_records() {
        assert!(matches!(
            SmtpCredentials::decode("%%%not base64%%%"),
            Err(EmailError::InvalidCredentials(_))
        ));
        assert!(matches!(
            SmtpCredentials::decode(&legacy("smtp.example.com:465:bot@example.com")),
            Err(EmailError::InvalidCredentials(_))
        ));
        assert!(matches!(
            SmtpCredentials::decode(&legacy("smtp.example.com:smtps:bot@example.com:pw")),
            Err(EmailError::InvalidCredentials(_))
        ));
        assert!(matches!(
            SmtpCredentials::decode(&legacy(":465:bot@example.com:pw")),
            Err(EmailError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_load_from_file_with_trailing_newline() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", legacy("smtp.example.com:465:bot@example.com:secret")).unwrap();

        let creds = SmtpCredentials::load(file.path()).unwrap();
        assert_eq!(creds.host, "smtp.example.com");
    }

    #[test]
    fn test_missing_file() {
        let err = SmtpCredentials::load("/nonexistent/.notification").unwrap_err();
        assert!(matches!(err, EmailError::CredentialsFile(_)));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = SmtpCredentials::decode(&legacy("h:465:s@example.com:topsecret")).unwrap();
        assert!(!format!("{:?}", creds).contains("topsecret"));
    }
}
