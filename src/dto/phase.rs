use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a bout's round-by-round scoring state.
///
/// Phases travel over the wire as snake_case strings and only change through
/// operator actions against the backend; the client never self-transitions.
/// A string this client does not know lands in [`RoundPhase::Unrecognized`]
/// so a newer backend vocabulary degrades instead of crashing the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoundPhase {
    /// Bout is scheduled; no round has started yet.
    PreFight,
    /// A round is underway. Aggregates keep moving but scoring is not open.
    RoundLive,
    /// Between rounds; the scoring window for the finished round is open.
    RoundBreak,
    /// Scoring for the current round has closed.
    RoundClosed,
    /// Bout is over; the card is immutable from here on.
    FightEnded,
    /// Phase string reported by the backend that this client cannot name.
    Unrecognized(String),
}

impl RoundPhase {
    /// Wire representation of the phase.
    pub fn as_wire(&self) -> &str {
        match self {
            RoundPhase::PreFight => "pre_fight",
            RoundPhase::RoundLive => "round_live",
            RoundPhase::RoundBreak => "round_break",
            RoundPhase::RoundClosed => "round_closed",
            RoundPhase::FightEnded => "fight_ended",
            RoundPhase::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for RoundPhase {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pre_fight" => RoundPhase::PreFight,
            "round_live" => RoundPhase::RoundLive,
            "round_break" => RoundPhase::RoundBreak,
            "round_closed" => RoundPhase::RoundClosed,
            "fight_ended" => RoundPhase::FightEnded,
            _ => RoundPhase::Unrecognized(value),
        }
    }
}

impl From<RoundPhase> for String {
    fn from(value: RoundPhase) -> Self {
        value.as_wire().to_owned()
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Origin of a bout's round state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoundStateSource {
    /// A human operator drives the round clock.
    Manual,
    /// Round state mirrors an automated timing feed.
    AutomatedFeed,
    /// Source string this client cannot name.
    Unrecognized(String),
}

impl From<String> for RoundStateSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => RoundStateSource::Manual,
            "automated_feed" => RoundStateSource::AutomatedFeed,
            _ => RoundStateSource::Unrecognized(value),
        }
    }
}

impl From<RoundStateSource> for String {
    fn from(value: RoundStateSource) -> Self {
        match value {
            RoundStateSource::Manual => "manual".to_owned(),
            RoundStateSource::AutomatedFeed => "automated_feed".to_owned(),
            RoundStateSource::Unrecognized(raw) => raw,
        }
    }
}
