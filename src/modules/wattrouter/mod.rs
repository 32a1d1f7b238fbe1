pub mod status;

pub use status::{parse_rate, FetchError, RateSource, Wattrouter};
