//! DTOs for operator-only procedures: round transitions, aggregate repair,
//! and the live fight roster.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dto::{BoutId, phase::RoundPhase};

/// One entry in the operator dashboard's roster of bouts currently in an
/// active scoring phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveFightSummary {
    /// Bout this entry describes.
    pub bout_id: BoutId,
    /// Event the bout belongs to, for display.
    pub event_name: String,
    /// Red-corner competitor name.
    pub red_corner: String,
    /// Blue-corner competitor name.
    pub blue_corner: String,
    /// Current lifecycle phase.
    pub phase: RoundPhase,
    /// Round currently live or most recently finished.
    pub current_round: u32,
}

/// Operator command driving a bout's round lifecycle.
///
/// The backend owns the full action vocabulary and validates every command;
/// [`TransitionAction::Other`] forwards verbs this client does not name, so a
/// backend addition needs no client release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransitionAction {
    /// Start the next scheduled round.
    StartRound,
    /// Close the round in progress and open its scoring window.
    CloseRound,
    /// End the bout; the card becomes immutable.
    EndFight,
    /// Any action verb this client does not name, passed through raw.
    Other(String),
}

impl TransitionAction {
    /// Wire representation of the action verb.
    pub fn as_wire(&self) -> &str {
        match self {
            TransitionAction::StartRound => "start_round",
            TransitionAction::CloseRound => "close_round",
            TransitionAction::EndFight => "end_fight",
            TransitionAction::Other(raw) => raw,
        }
    }
}

impl From<String> for TransitionAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start_round" => TransitionAction::StartRound,
            "close_round" => TransitionAction::CloseRound,
            "end_fight" => TransitionAction::EndFight,
            _ => TransitionAction::Other(value),
        }
    }
}

impl From<TransitionAction> for String {
    fn from(value: TransitionAction) -> Self {
        value.as_wire().to_owned()
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Result of forcing the backend to rebuild a bout's per-round aggregates
/// from raw scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeOutcome {
    /// Number of rounds whose aggregates were rebuilt.
    pub rounds_rebuilt: u32,
}
