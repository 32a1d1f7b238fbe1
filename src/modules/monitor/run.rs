use log::{info, warn};

use super::transition::{NotificationSettings, Transition};
use crate::cache::RateCache;
use crate::email::{EmailError, Notifier};
use crate::utils::logging::log_rate_event;
use crate::wattrouter::RateSource;
use crate::RateCode;

/// What a single run observed and reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Rate matches the cached value; nothing was sent
    Unchanged(RateCode),
    Changed(Transition),
    /// Device could not be queried; failure was reported, cache untouched
    FetchFailed,
    /// Previous rate could not be read; failure was reported, nothing compared
    CacheFailed,
}

/// Fetch the current rate, compare it with the cached one and notify on change.
///
/// Fetch and cache failures are reported through `notifier` and end the run
/// early. Only a failure of the notifier itself is returned as an error.
pub fn run<S, N>(
    source: &S,
    cache: &RateCache,
    notifier: &N,
    settings: &NotificationSettings,
) -> Result<RunOutcome, EmailError>
where
    S: RateSource + ?Sized,
    N: Notifier + ?Sized,
{
    let current = match source.rate_state() {
        Ok(rate) => rate,
        Err(e) => {
            warn!("Fetching rate failed: {}", e);
            log_rate_event("fetch", false, Some(&e.to_string()));
            notifier.notify(&settings.subject, &settings.fetch_failure(&e))?;
            return Ok(RunOutcome::FetchFailed);
        }
    };

    // Read before write so the comparison sees the previous value
    let last = cache.read();

    if let Err(e) = cache.write(current) {
        warn!("Writing {} failed: {}", cache.path().display(), e);
        log_rate_event("cache-write", false, Some(&e.to_string()));
        notifier.notify(&settings.subject, &settings.cache_failure(&e))?;
    }

    let last = match last {
        Ok(rate) => rate,
        Err(e) => {
            warn!("Reading {} failed: {}", cache.path().display(), e);
            log_rate_event("cache-read", false, Some(&e.to_string()));
            notifier.notify(&settings.subject, &settings.cache_failure(&e))?;
            return Ok(RunOutcome::CacheFailed);
        }
    };

    match Transition::between(last, current) {
        None => {
            info!("Rate unchanged ({})", current);
            Ok(RunOutcome::Unchanged(current))
        }
        Some(transition) => {
            let body = settings.change_message(transition);
            info!("Rate changed from {} to {}", last, current);
            log_rate_event("change", true, Some(settings.label_for(transition)));
            notifier.notify(&settings.subject, &body)?;
            Ok(RunOutcome::Changed(transition))
        }
    }
}
