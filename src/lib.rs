// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{cache, config, email, monitor, utils, wattrouter};

// Re-export commonly used types
pub use modules::cache::RateCache;
pub use modules::config::Config;
pub use modules::email::{EmailError, Notifier, SmtpNotifier};
pub use modules::monitor::{run, NotificationSettings, RunOutcome, Transition};
pub use modules::wattrouter::{FetchError, RateSource, Wattrouter};

/// Rate tier code reported by the Wattrouter (0 = low tariff, non-zero = high tariff)
pub type RateCode = u32;

// Constants
pub const STATUS_PATH: &str = "/meas.xml";
pub const STATUS_CACHE: &str = "/opt/var/lib/overmind/.ratechage";
pub const DEFAULT_WATTROUTER: &str = "192.168.0.10";
pub const DEFAULT_SMTP_CREDENTIALS: &str = "/opt/etc/overmind/.notification";
pub const DEFAULT_ROOT_ELEMENT: &str = "meas";
pub const DEFAULT_RATE_ELEMENT: &str = "ILT";
pub const DEFAULT_SUBJECT: &str = "[overmind] Změna tarifu";
pub const DEFAULT_TEMPLATE: &str = "Byla zaznamenána změna tarifu ceny elektrické energie na: {}";
pub const DEFAULT_HIGH_RATE_LABEL: &str = "VT";
pub const DEFAULT_LOW_RATE_LABEL: &str = "NT";
pub const DEFAULT_HTTP_TIMEOUT: u64 = 30;
pub const SMTP_TIMEOUT: u64 = 10;
