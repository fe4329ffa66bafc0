//! Shared runtime state threaded through every coordinator service.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use indexmap::IndexMap;
use tokio::task::JoinHandle;

use crate::{
    cache::SnapshotCache,
    config::LiveConfig,
    dto::{BoutId, EventId, FightScorecard, LiveFightSummary},
    error::ServiceError,
    rpc::ScoringBackend,
};

/// Cheaply cloneable handle to the coordinator state.
pub type SharedState = Arc<CoordinatorState>;

/// Who the embedding app is acting as when it calls into the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerRole {
    /// Regular user: reads scorecards and submits their own round scores.
    Fan,
    /// Event operator: additionally drives round transitions and repairs.
    Operator,
}

/// A spawned polling task registered for one bout.
///
/// The generation tag lets a replaced watcher recognise that it is no longer
/// the active one and leave its successor's registry entry alone.
pub(crate) struct WatcherEntry {
    pub generation: u64,
    pub handle: JoinHandle<()>,
}

/// Central coordinator state: the backend handle, the caches, and the
/// registry of per-bout polling tasks.
pub struct CoordinatorState {
    backend: Arc<dyn ScoringBackend>,
    config: LiveConfig,
    caller_role: CallerRole,
    scorecards: SnapshotCache<BoutId, FightScorecard>,
    event_cards: SnapshotCache<EventId, IndexMap<BoutId, FightScorecard>>,
    live_roster: SnapshotCache<(), Vec<LiveFightSummary>>,
    watchers: DashMap<BoutId, WatcherEntry>,
    watcher_seq: AtomicU64,
}

impl CoordinatorState {
    /// Construct the state wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        backend: Arc<dyn ScoringBackend>,
        config: LiveConfig,
        caller_role: CallerRole,
    ) -> SharedState {
        Arc::new(Self {
            backend,
            config,
            caller_role,
            scorecards: SnapshotCache::new(),
            event_cards: SnapshotCache::new(),
            live_roster: SnapshotCache::new(),
            watchers: DashMap::new(),
            watcher_seq: AtomicU64::new(0),
        })
    }

    /// Handle to the scoring backend.
    pub fn backend(&self) -> Arc<dyn ScoringBackend> {
        self.backend.clone()
    }

    /// The coordinator configuration.
    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    /// Role the embedding app authenticated as.
    pub fn caller_role(&self) -> CallerRole {
        self.caller_role
    }

    /// Guard for operator-only operations. Fails fast; the backend enforces
    /// the same rule server-side.
    pub fn require_operator(&self) -> Result<(), ServiceError> {
        match self.caller_role {
            CallerRole::Operator => Ok(()),
            CallerRole::Fan => Err(ServiceError::Unauthorized(
                "operator access required".into(),
            )),
        }
    }

    pub(crate) fn scorecards(&self) -> &SnapshotCache<BoutId, FightScorecard> {
        &self.scorecards
    }

    pub(crate) fn event_cards(
        &self,
    ) -> &SnapshotCache<EventId, IndexMap<BoutId, FightScorecard>> {
        &self.event_cards
    }

    pub(crate) fn live_roster(&self) -> &SnapshotCache<(), Vec<LiveFightSummary>> {
        &self.live_roster
    }

    pub(crate) fn watchers(&self) -> &DashMap<BoutId, WatcherEntry> {
        &self.watchers
    }

    pub(crate) fn next_watcher_generation(&self) -> u64 {
        self.watcher_seq.fetch_add(1, Ordering::Relaxed)
    }
}
