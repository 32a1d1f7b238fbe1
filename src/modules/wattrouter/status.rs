use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;

use crate::{RateCode, DEFAULT_RATE_ELEMENT, DEFAULT_ROOT_ELEMENT, STATUS_PATH};

/// Errors fetching the Wattrouter status
#[derive(Debug)]
pub enum FetchError {
    Client(String),
    Unreachable { address: String, reason: String },
    Status { address: String, status: u16 },
    Body { address: String, reason: String },
    InvalidDocument(String),
    MissingContainer(String),
    MissingRate(String),
    InvalidRate(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Client(msg) => write!(f, "Failed to create HTTP client: {}", msg),
            FetchError::Unreachable { address, reason } => {
                write!(f, "Wattrouter not reachable on {} ({})", address, reason)
            }
            FetchError::Status { address, status } => {
                write!(f, "Wattrouter on {} responded with status {}", address, status)
            }
            FetchError::Body { address, reason } => {
                write!(f, "Failed to read status from {}: {}", address, reason)
            }
            FetchError::InvalidDocument(msg) => write!(f, "Malformed status document: {}", msg),
            FetchError::MissingContainer(name) => {
                write!(f, "Did not find root element ({}) in response", name)
            }
            FetchError::MissingRate(name) => {
                write!(f, "Did not find rate element ({}) in response", name)
            }
            FetchError::InvalidRate(text) => write!(f, "Unexpected value of rate: {}", text),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything able to report the current rate tier
pub trait RateSource {
    fn rate_state(&self) -> Result<RateCode, FetchError>;
}

/// HTTP client for a single Wattrouter device
pub struct Wattrouter {
    address: String,
    root_element: String,
    rate_element: String,
    client: Client,
}

impl Wattrouter {
    pub fn new(address: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            address: address.to_string(),
            root_element: DEFAULT_ROOT_ELEMENT.to_string(),
            rate_element: DEFAULT_RATE_ELEMENT.to_string(),
            client,
        })
    }

    /// Override the container and rate element names looked up in the status document
    pub fn with_elements(mut self, root_element: &str, rate_element: &str) -> Self {
        self.root_element = root_element.to_string();
        self.rate_element = rate_element.to_string();
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn status_url(&self) -> String {
        format!("http://{}{}", self.address, STATUS_PATH)
    }

    /// Download the raw status document
    pub fn fetch_status(&self) -> Result<String, FetchError> {
        let url = self.status_url();
        debug!("Fetching Wattrouter status from {}", url);

        let not_reachable = |e: reqwest::Error| FetchError::Unreachable {
            address: self.address.clone(),
            reason: e.to_string(),
        };

        let response = self.client.get(&url).send().map_err(not_reachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                address: self.address.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Body {
            address: self.address.clone(),
            reason: e.to_string(),
        })
    }
}

impl RateSource for Wattrouter {
    fn rate_state(&self) -> Result<RateCode, FetchError> {
        let body = self.fetch_status()?;
        let rate = parse_rate(&body, &self.root_element, &self.rate_element)?;
        info!("Wattrouter {} reports rate {}", self.address, rate);
        Ok(rate)
    }
}

/// Extract the rate code from a status document.
///
/// The container is the document root when its tag matches, otherwise the first
/// descendant carrying that tag. The rate element is searched below the container.
pub fn parse_rate(
    document: &str,
    root_element: &str,
    rate_element: &str,
) -> Result<RateCode, FetchError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(document, options)
        .map_err(|e| FetchError::InvalidDocument(e.to_string()))?;

    let container = doc
        .root_element()
        .descendants()
        .find(|n| n.is_element() && n.has_tag_name(root_element))
        .ok_or_else(|| FetchError::MissingContainer(root_element.to_string()))?;

    let rate = container
        .descendants()
        .skip(1)
        .find(|n| n.is_element() && n.has_tag_name(rate_element))
        .ok_or_else(|| FetchError::MissingRate(rate_element.to_string()))?;

    // Present but empty is a bad value, not a missing element
    let text = rate.text().unwrap_or("").trim();
    text.parse::<RateCode>()
        .map_err(|_| FetchError::InvalidRate(text.to_string()))
}
