//! Maps a bout's phase to a scorecard refresh interval.

use std::time::Duration;

use crate::{config::CadenceTable, dto::RoundPhase};

/// Choose how often the scorecard for a bout in `phase` should be re-fetched.
///
/// Returns `None` when polling should stop: no phase is known yet, or the
/// card is immutable (`RoundClosed`, `FightEnded`). Every other phase maps to
/// a positive interval from `table` — including phases this client cannot
/// name, which poll at the fallback interval until the bout resynchronizes
/// onto a recognized state.
pub fn polling_interval(table: &CadenceTable, phase: Option<&RoundPhase>) -> Option<Duration> {
    match phase? {
        RoundPhase::RoundClosed | RoundPhase::FightEnded => None,
        RoundPhase::RoundBreak => Some(table.round_break),
        RoundPhase::RoundLive => Some(table.round_live),
        RoundPhase::PreFight => Some(table.pre_fight),
        RoundPhase::Unrecognized(_) => Some(table.fallback),
    }
}
