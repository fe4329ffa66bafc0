use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::dto::{BoutId, round::RoundState};

/// Identity and display data for a single scheduled contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bout {
    /// Backend identifier for the bout.
    pub id: BoutId,
    /// Display name of the red-corner competitor.
    pub red_corner: String,
    /// Display name of the blue-corner competitor.
    pub blue_corner: String,
    /// Weight class the bout is contested at.
    pub weight_class: String,
    /// Scheduling status as reported by the backend.
    pub status: String,
}

/// Backend-computed community summary for one round.
///
/// The coordinator passes the summary body through untouched; its shape is
/// owned by the aggregation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundAggregate {
    /// Round the summary covers.
    pub round_number: u32,
    /// Opaque summary payload (consensus score, vote counts, ...).
    #[serde(flatten)]
    pub summary: Value,
}

/// One round scored by the calling user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoundScore {
    /// Round the score applies to, starting at 1.
    pub round_number: u32,
    /// Points awarded to the red corner.
    pub score_red: u8,
    /// Points awarded to the blue corner.
    pub score_blue: u8,
    /// When the score was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// Consolidated snapshot of one bout: round state, community aggregates, and
/// the calling user's own round scores.
///
/// `user_scores` holds at most one entry per round and is kept sorted
/// ascending by round number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightScorecard {
    /// The bout this card describes.
    pub bout: Bout,
    /// Where the bout stands in its round lifecycle.
    pub round_state: RoundState,
    /// Per-round community summaries, opaque to the coordinator.
    pub aggregates: Vec<RoundAggregate>,
    /// The caller's own submitted scores, sorted ascending by round.
    pub user_scores: Vec<UserRoundScore>,
}

impl FightScorecard {
    /// The caller's score for `round_number`, if one was submitted.
    pub fn score_for_round(&self, round_number: u32) -> Option<&UserRoundScore> {
        self.user_scores
            .iter()
            .find(|score| score.round_number == round_number)
    }
}
