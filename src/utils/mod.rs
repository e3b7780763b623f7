pub mod config;
pub mod presenter;
pub mod projection;
pub mod race_utils;
pub mod rate_limiter;
pub mod selector;
pub mod state;
