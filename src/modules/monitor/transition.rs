use std::cmp::Ordering;

use crate::{
    RateCode, DEFAULT_HIGH_RATE_LABEL, DEFAULT_LOW_RATE_LABEL, DEFAULT_SUBJECT, DEFAULT_TEMPLATE,
};

/// Direction of a rate tier change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Raised { from: RateCode, to: RateCode },
    Lowered { from: RateCode, to: RateCode },
}

impl Transition {
    /// Compare the cached rate with the current one, `None` when unchanged
    pub fn between(last: RateCode, current: RateCode) -> Option<Self> {
        match current.cmp(&last) {
            Ordering::Equal => None,
            Ordering::Greater => Some(Transition::Raised {
                from: last,
                to: current,
            }),
            Ordering::Less => Some(Transition::Lowered {
                from: last,
                to: current,
            }),
        }
    }
}

/// Subject, body template and rate labels used for outgoing notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub subject: String,
    pub template: String,
    pub high_label: String,
    pub low_label: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            high_label: DEFAULT_HIGH_RATE_LABEL.to_string(),
            low_label: DEFAULT_LOW_RATE_LABEL.to_string(),
        }
    }
}

impl NotificationSettings {
    /// Substitute `label` for the first `{}` in the template
    pub fn render(&self, label: &str) -> String {
        self.template.replacen("{}", label, 1)
    }

    pub fn label_for(&self, transition: Transition) -> &str {
        match transition {
            Transition::Raised { .. } => &self.high_label,
            Transition::Lowered { .. } => &self.low_label,
        }
    }

    /// Body announcing the given transition
    pub fn change_message(&self, transition: Transition) -> String {
        self.render(self.label_for(transition))
    }

    pub fn fetch_failure(&self, reason: &dyn std::fmt::Display) -> String {
        format!("Failed to fetch state: {}", reason)
    }

    pub fn cache_failure(&self, reason: &dyn std::fmt::Display) -> String {
        format!("Failed to cache state: {}", reason)
    }
}
