/// Operator-side round transitions, aggregate repair, and the live roster.
pub mod admin_service;
/// Timer-driven per-bout polling supervisor.
pub mod poller;
/// Cache-backed scorecard readers.
pub mod scorecard_service;
/// Round-score submission with idempotent retries.
pub mod submission_service;
