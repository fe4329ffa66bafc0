//! Operator-side round transitions, aggregate repair, and the live fight
//! roster. Every operation here is authorization-gated and fails fast for
//! non-operators; the backend enforces the same rule server-side.

use tokio::{task::JoinHandle, time::sleep};
use tracing::{info, warn};

use crate::{
    dto::{BoutId, LiveFightSummary, RecomputeOutcome, RoundState, TransitionAction},
    error::{ServiceError, ServiceResult},
    state::SharedState,
};

/// Issue a round-lifecycle command against a bout and return the resulting
/// state.
///
/// On success both the bout's cached scorecard and the live roster are
/// dropped, so every reader observes the transition on its next poll.
pub async fn update_round_state(
    state: &SharedState,
    bout_id: BoutId,
    action: TransitionAction,
    round_number: Option<u32>,
) -> ServiceResult<RoundState> {
    state.require_operator()?;

    let round_state = state
        .backend()
        .admin_update_round_state(bout_id, action.clone(), round_number)
        .await?;

    state.scorecards().invalidate(bout_id).await;
    state.live_roster().invalidate(()).await;
    info!(
        %bout_id,
        %action,
        phase = %round_state.phase,
        "round state updated"
    );
    Ok(round_state)
}

/// Force the backend to rebuild a bout's per-round aggregates from raw
/// scores — a reconciliation tool for data-integrity repair.
pub async fn recompute_aggregates(
    state: &SharedState,
    bout_id: BoutId,
) -> ServiceResult<RecomputeOutcome> {
    state.require_operator()?;

    let outcome = state.backend().admin_recompute_aggregates(bout_id).await?;
    state.scorecards().invalidate(bout_id).await;
    info!(%bout_id, rounds = outcome.rounds_rebuilt, "aggregates recomputed");
    Ok(outcome)
}

/// Roster of bouts currently in an active scoring phase, cached at the
/// configured roster refresh interval.
pub async fn live_fights(state: &SharedState) -> ServiceResult<Vec<LiveFightSummary>> {
    state.require_operator()?;

    let backend = state.backend();
    state
        .live_roster()
        .read_through((), state.config().roster_refresh, || async move {
            backend
                .admin_get_live_fights()
                .await
                .map_err(ServiceError::from)
        })
        .await
}

/// Continuously refresh the roster for the operator dashboard.
///
/// Runs until the returned task is aborted. An authorization failure ends
/// the loop instead of being retried.
pub fn spawn_roster_poll(state: &SharedState) -> JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move {
        loop {
            state.live_roster().invalidate(()).await;
            match live_fights(&state).await {
                Ok(_) => {}
                Err(err @ ServiceError::Unauthorized(_)) => {
                    warn!(error = %err, "roster poll is not authorized; stopping");
                    break;
                }
                Err(err) => warn!(error = %err, "live roster refresh failed"),
            }
            sleep(state.config().roster_refresh).await;
        }
    })
}
