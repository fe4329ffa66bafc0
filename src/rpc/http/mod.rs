//! Reqwest-based implementation of the scoring backend seam.

mod client;
mod config;
mod error;
mod models;

pub use client::HttpScoringBackend;
pub use config::HttpConfig;
pub use error::{HttpBackendError, HttpResult};
