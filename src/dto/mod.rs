//! Data model shared between the coordinator services and the backend seam.

pub mod admin;
pub mod phase;
pub mod round;
pub mod scorecard;
pub mod submission;

use uuid::Uuid;

pub use self::admin::{LiveFightSummary, RecomputeOutcome, TransitionAction};
pub use self::phase::{RoundPhase, RoundStateSource};
pub use self::round::RoundState;
pub use self::scorecard::{Bout, FightScorecard, RoundAggregate, UserRoundScore};
pub use self::submission::SubmissionRequest;

/// Backend identifier of a bout.
pub type BoutId = Uuid;
/// Backend identifier of an event.
pub type EventId = Uuid;
