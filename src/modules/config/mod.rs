use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::monitor::NotificationSettings;
use crate::{
    DEFAULT_HIGH_RATE_LABEL, DEFAULT_HTTP_TIMEOUT, DEFAULT_LOW_RATE_LABEL, DEFAULT_RATE_ELEMENT,
    DEFAULT_ROOT_ELEMENT, DEFAULT_SMTP_CREDENTIALS, DEFAULT_SUBJECT, DEFAULT_TEMPLATE,
    DEFAULT_WATTROUTER, STATUS_CACHE,
};

/// Settings for one run, taken from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub wattrouter: String,
    pub root_element: String,
    pub rate_element: String,
    pub smtp_credentials: PathBuf,
    pub recipients: Vec<String>,
    pub notification: NotificationSettings,
    pub cache: PathBuf,
    pub timeout: Duration,
    pub log_level: Option<String>,
}

pub fn build_cli() -> Command {
    Command::new("notify-high-rate")
        .about("Reports change of rate level")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("wattrouter")
                .short('w')
                .long("wattrouter")
                .help("Wattrouter address")
                .default_value(DEFAULT_WATTROUTER),
        )
        .arg(
            Arg::new("smtp")
                .short('s')
                .long("smtp")
                .help("Path to the base64 encoded SMTP credentials")
                .default_value(DEFAULT_SMTP_CREDENTIALS),
        )
        .arg(
            Arg::new("recipient")
                .short('r')
                .long("recipient")
                .help("Notification recipient(s)")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("subject")
                .short('u')
                .long("subject")
                .help("Notification subject")
                .default_value(DEFAULT_SUBJECT),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Notification body, {} is replaced by the rate label")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(
            Arg::new("hr")
                .long("hr")
                .help("Label of the high rate")
                .default_value(DEFAULT_HIGH_RATE_LABEL),
        )
        .arg(
            Arg::new("lr")
                .long("lr")
                .help("Label of the low rate")
                .default_value(DEFAULT_LOW_RATE_LABEL),
        )
        .arg(
            Arg::new("root-element")
                .long("root-element")
                .help("Container element of the status document")
                .default_value(DEFAULT_ROOT_ELEMENT),
        )
        .arg(
            Arg::new("rate-element")
                .long("rate-element")
                .help("Element holding the rate code")
                .default_value(DEFAULT_RATE_ELEMENT),
        )
        .arg(
            Arg::new("cache")
                .short('c')
                .long("cache")
                .help("File keeping the last observed rate")
                .default_value(STATUS_CACHE),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("HTTP timeout in seconds (default: 30)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
}

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

impl Config {
    /// Parse the process arguments, exiting with usage on error
    pub fn from_env() -> Self {
        Self::from_matches(&build_cli().get_matches())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = build_cli().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let recipients = matches
            .get_many::<String>("recipient")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let timeout = matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(DEFAULT_HTTP_TIMEOUT);

        Self {
            wattrouter: string(matches, "wattrouter"),
            root_element: string(matches, "root-element"),
            rate_element: string(matches, "rate-element"),
            smtp_credentials: PathBuf::from(string(matches, "smtp")),
            recipients,
            notification: NotificationSettings {
                subject: string(matches, "subject"),
                template: string(matches, "template"),
                high_label: string(matches, "hr"),
                low_label: string(matches, "lr"),
            },
            cache: PathBuf::from(string(matches, "cache")),
            timeout: Duration::from_secs(timeout),
            log_level: matches.get_one::<String>("log-level").cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_from_args(["notify-high-rate", "-r", "a@example.com"]).unwrap();

        assert_eq!(config.wattrouter, "192.168.0.10");
        assert_eq!(
            config.smtp_credentials,
            PathBuf::from("/opt/etc/overmind/.notification")
        );
        assert_eq!(config.cache, PathBuf::from("/opt/var/lib/overmind/.ratechage"));
        assert_eq!(config.root_element, "meas");
        assert_eq!(config.rate_element, "ILT");
        assert_eq!(config.notification, NotificationSettings::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_recipients_extend() {
        let config = Config::try_from_args([
            "notify-high-rate",
            "-r",
            "a@example.com",
            "b@example.com",
            "--recipient",
            "c@example.com",
        ])
        .unwrap();

        assert_eq!(
            config.recipients,
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
    }

    #[test]
    fn test_recipient_is_required() {
        assert!(Config::try_from_args(["notify-high-rate"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_from_args([
            "notify-high-rate",
            "-w",
            "10.0.0.5",
            "-s",
            "/tmp/creds",
            "-r",
            "a@example.com",
            "-u",
            "Tariff",
            "-t",
            "Now: {}",
            "--hr",
            "high",
            "--lr",
            "low",
            "-c",
            "/tmp/rate",
            "--timeout",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.wattrouter, "10.0.0.5");
        assert_eq!(config.smtp_credentials, PathBuf::from("/tmp/creds"));
        assert_eq!(config.notification.subject, "Tariff");
        assert_eq!(config.notification.render(&config.notification.high_label), "Now: high");
        assert_eq!(config.notification.low_label, "low");
        assert_eq!(config.cache, PathBuf::from("/tmp/rate"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = Config::try_from_args([
            "notify-high-rate",
            "-r",
            "a@example.com",
            "--timeout",
            "soon",
        ]);
        assert!(result.is_err());
    }
}
