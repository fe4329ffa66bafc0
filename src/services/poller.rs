//! Timer-driven scorecard polling: one cancellable watcher task per bout.
//!
//! Each fresh round state recomputes the interval from the cadence table, so
//! a watcher speeds up as a bout enters its scoring window and stops on its
//! own once the card is immutable. Watchers are torn down when the bout
//! leaves the screen; nothing polls in the background after that.

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    cadence::polling_interval,
    dto::BoutId,
    services::scorecard_service,
    state::{SharedState, WatcherEntry},
};

/// Start polling `bout_id`, replacing any watcher already registered for it.
pub fn watch_bout(state: &SharedState, bout_id: BoutId) {
    let generation = state.next_watcher_generation();
    let handle = tokio::spawn(run_watcher(state.clone(), bout_id, generation));
    if let Some(previous) = state
        .watchers()
        .insert(bout_id, WatcherEntry { generation, handle })
    {
        previous.handle.abort();
    }
}

/// Stop polling `bout_id`. No-op when it is not being watched.
pub fn unwatch_bout(state: &SharedState, bout_id: BoutId) {
    if let Some((_, entry)) = state.watchers().remove(&bout_id) {
        entry.handle.abort();
    }
}

/// Whether a watcher is currently registered for `bout_id`.
pub fn is_watching(state: &SharedState, bout_id: BoutId) -> bool {
    state.watchers().contains_key(&bout_id)
}

async fn run_watcher(state: SharedState, bout_id: BoutId, generation: u64) {
    loop {
        let card = match scorecard_service::refresh_fight_scorecard(&state, bout_id).await {
            Ok(card) => card,
            Err(err) => {
                // Stop refreshing; the UI offers a retry that re-watches.
                warn!(%bout_id, error = %err, "scorecard poll failed; watcher halted");
                break;
            }
        };

        let phase = card.round_state.phase;
        let Some(delay) = polling_interval(&state.config().cadence, Some(&phase)) else {
            debug!(%bout_id, %phase, "bout is immutable; watcher done");
            break;
        };
        sleep(delay).await;
    }

    // Deregister only while this task is still the active watcher.
    state
        .watchers()
        .remove_if(&bout_id, |_, entry| entry.generation == generation);
}
