use env_logger::{Builder, Env, WriteStyle};
use log::{info, warn};

/// Initialize logging on stderr.
/// An explicit level wins over `RUST_LOG`, which wins over the `info` default.
pub fn initialize_logging(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }

    builder
        // Enable timestamps
        .format_timestamp_secs()
        .write_style(WriteStyle::Auto)
        .target(env_logger::Target::Stderr)
        .try_init()?;

    Ok(())
}

/// Helper function to format sensitive data for logging
pub fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Log one step of a run together with the local time it happened
pub fn log_rate_event(event_type: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Rate event: type={}, success=true, timestamp={}, details={:?}",
            event_type, timestamp, details
        );
    } else {
        warn!(
            "Rate event: type={}, success=false, timestamp={}, details={:?}",
            event_type, timestamp, details
        );
    }
}
