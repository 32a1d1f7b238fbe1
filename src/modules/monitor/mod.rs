pub mod run;
pub mod transition;

pub use run::{run, RunOutcome};
pub use transition::{NotificationSettings, Transition};
