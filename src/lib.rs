//! Live fight scoring coordinator for the Cageside app.
//!
//! Tracks a bout's round-by-round phase, decides how aggressively to poll for
//! updates, submits the caller's round scores with an idempotency guarantee,
//! and reconciles optimistic local state with server truth. The scoring
//! backend itself is external, reached only through [`rpc::ScoringBackend`].

pub mod cadence;
mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod merge;
pub mod rpc;
pub mod services;
pub mod state;
