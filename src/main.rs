use std::process;

use log::{error, info};

use rate_notify::utils::logging::initialize_logging;
use rate_notify::{run, Config, Notifier, RateCache, RunOutcome, SmtpNotifier, Wattrouter};

fn main() {
    let config = Config::from_env();

    if let Err(e) = initialize_logging(config.log_level.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let notifier = SmtpNotifier::new(&config.smtp_credentials, config.recipients.clone());
    let cache = RateCache::new(&config.cache);

    // Building the HTTP client only fails on a broken TLS setup; report it like a fetch error
    let outcome = match Wattrouter::new(&config.wattrouter, config.timeout) {
        Ok(router) => {
            let router = router.with_elements(&config.root_element, &config.rate_element);
            run(&router, &cache, &notifier, &config.notification)
        }
        Err(e) => {
            let body = config.notification.fetch_failure(&e);
            notifier
                .notify(&config.notification.subject, &body)
                .map(|_| RunOutcome::FetchFailed)
        }
    };

    match outcome {
        Ok(outcome) => info!("Run finished: {:?}", outcome),
        Err(e) => {
            error!("Notification failed: {}", e);
            process::exit(1);
        }
    }
}
