// Declare all modules
pub mod cache;
pub mod config;
pub mod email;
pub mod monitor;
pub mod utils;
pub mod wattrouter;

// No re-exports here as they're handled in lib.rs
