//! Round-score submission: optimistic projection, idempotent retries, and
//! cache reconciliation.

use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::{debug, warn};
use validator::Validate;

use crate::{
    dto::{BoutId, SubmissionRequest, UserRoundScore},
    error::{ServiceError, ServiceResult},
    merge::merge_optimistic_score,
    state::SharedState,
};

/// Submit the caller's score for one round of one bout.
///
/// This is one logical user action: the idempotency token is minted here,
/// once, and travels unchanged through every retry. Calling this function
/// again is a new action with a new token.
pub async fn submit_round_score(
    state: &SharedState,
    bout_id: BoutId,
    round_number: u32,
    score_red: u8,
    score_blue: u8,
) -> ServiceResult<UserRoundScore> {
    let request = SubmissionRequest::new(bout_id, round_number, score_red, score_blue);
    submit(state, request).await
}

/// Submit a prepared request.
///
/// The cached scorecard is projected forward immediately so the UI reflects
/// the score before the backend confirms. On success the cache entry is
/// dropped — the next read reconciles with server truth, moved aggregates
/// included. On terminal failure the projection is undone and the error
/// surfaced, domain message verbatim.
pub async fn submit(
    state: &SharedState,
    request: SubmissionRequest,
) -> ServiceResult<UserRoundScore> {
    request.validate()?;

    let submitted_at = OffsetDateTime::now_utc();
    let memento = state
        .scorecards()
        .project(request.bout_id, |current| {
            merge_optimistic_score(current, &request, submitted_at)
        })
        .await;

    match deliver(state, &request).await {
        Ok(score) => {
            state.scorecards().invalidate(request.bout_id).await;
            debug!(
                bout_id = %request.bout_id,
                round = request.round_number,
                "round score stored"
            );
            Ok(score)
        }
        Err(err) => {
            state.scorecards().restore(request.bout_id, memento).await;
            Err(err)
        }
    }
}

/// Call the backend, retrying transport failures with the same request — the
/// same `submission_id` — so the backend can collapse duplicate deliveries.
async fn deliver(
    state: &SharedState,
    request: &SubmissionRequest,
) -> ServiceResult<UserRoundScore> {
    let policy = state.config().submit_retry;
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        match state.backend().submit_round_score(request.clone()).await {
            Ok(score) => return Ok(score),
            Err(err) => {
                let err = ServiceError::from(err);
                if !err.is_retryable() || attempt >= policy.max_attempts {
                    return Err(err);
                }
                warn!(
                    bout_id = %request.bout_id,
                    round = request.round_number,
                    attempt,
                    error = %err,
                    "score submission failed; retrying with the same token"
                );
                sleep(delay).await;
                delay = (delay * 2).min(policy.max_delay);
                attempt += 1;
            }
        }
    }
}
