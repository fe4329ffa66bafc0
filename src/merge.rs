//! Projects a pending score submission onto the last known scorecard so the
//! UI updates before the backend confirms.

use time::OffsetDateTime;

use crate::dto::{FightScorecard, SubmissionRequest, UserRoundScore};

/// Merge a pending submission into `current`, returning the projected card.
///
/// With no snapshot to project onto the result is `None`. Otherwise the
/// round's entry is replaced in place when one exists, or a new entry stamped
/// with `submitted_at` is appended; either way the score list comes back
/// sorted ascending by round. The input is never mutated, so the caller can
/// keep it around to undo the projection when the real call fails.
pub fn merge_optimistic_score(
    current: Option<&FightScorecard>,
    request: &SubmissionRequest,
    submitted_at: OffsetDateTime,
) -> Option<FightScorecard> {
    let card = current?;

    let projected = UserRoundScore {
        round_number: request.round_number,
        score_red: request.score_red,
        score_blue: request.score_blue,
        submitted_at,
    };

    let mut user_scores = card.user_scores.clone();
    match user_scores
        .iter_mut()
        .find(|score| score.round_number == request.round_number)
    {
        Some(existing) => *existing = projected,
        None => user_scores.push(projected),
    }
    user_scores.sort_by_key(|score| score.round_number);

    Some(FightScorecard {
        user_scores,
        ..card.clone()
    })
}
