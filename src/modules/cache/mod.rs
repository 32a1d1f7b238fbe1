pub mod storage;

pub use storage::RateCache;
