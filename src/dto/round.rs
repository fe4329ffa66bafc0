use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::dto::phase::{RoundPhase, RoundStateSource};

/// Authoritative, server-owned description of where a bout stands in its
/// round lifecycle.
///
/// Everything here is backend output. In particular `is_scoring_open` is
/// computed server-side; the client displays it as-is and never re-derives it
/// from `phase` and the round timestamps, so client and server can never
/// disagree about the scoring window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Round currently live or most recently finished, starting at 1.
    pub current_round: u32,
    /// Lifecycle phase of the bout.
    pub phase: RoundPhase,
    /// Number of rounds the bout is scheduled for.
    pub scheduled_rounds: u32,
    /// When the current round started, if one has.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub round_started_at: Option<OffsetDateTime>,
    /// When the current round is due to end, if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub round_ends_at: Option<OffsetDateTime>,
    /// Seconds after a round ends during which submissions are still taken.
    pub scoring_grace_seconds: u32,
    /// Who or what is driving this state.
    pub source: RoundStateSource,
    /// Last time the backend touched this state.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Server-computed scoring-window flag. Authoritative.
    pub is_scoring_open: bool,
}
