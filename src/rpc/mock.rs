//! Scripted in-memory backend used by the service tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, Ordering},
};
use std::{collections::VecDeque, io};

use futures::future::BoxFuture;
use indexmap::IndexMap;
use time::OffsetDateTime;

use super::{RpcError, RpcResult, ScoringBackend};
use crate::dto::{
    BoutId, EventId, FightScorecard, LiveFightSummary, RecomputeOutcome, RoundPhase, RoundState,
    SubmissionRequest, TransitionAction, UserRoundScore,
};

/// In-memory [`ScoringBackend`] that records calls and can be scripted to
/// fail. It applies submissions to its stored scorecards the way the real
/// backend does, so tests can observe reconciliation through a re-read.
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    scorecards: Mutex<IndexMap<BoutId, FightScorecard>>,
    roster: Mutex<Vec<LiveFightSummary>>,
    phase_script: Mutex<VecDeque<RoundPhase>>,
    next_round_state: Mutex<Option<RoundState>>,
    reject_submissions: Mutex<Option<String>>,
    transport_failures: AtomicU32,
    fetch_calls: AtomicU32,
    roster_calls: AtomicU32,
    admin_calls: AtomicU32,
    submissions: Mutex<Vec<SubmissionRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scorecard(&self, card: FightScorecard) {
        self.inner
            .scorecards
            .lock()
            .unwrap()
            .insert(card.bout.id, card);
    }

    /// Phases returned by successive scorecard fetches, overriding whatever
    /// phase the stored card carries.
    pub fn script_phases(&self, phases: impl IntoIterator<Item = RoundPhase>) {
        self.inner
            .phase_script
            .lock()
            .unwrap()
            .extend(phases);
    }

    /// Make the next `n` submissions fail at the transport level.
    pub fn fail_transport_times(&self, n: u32) {
        self.inner.transport_failures.store(n, Ordering::SeqCst);
    }

    /// Make every submission come back refused with `message`.
    pub fn reject_submissions(&self, message: impl Into<String>) {
        *self.inner.reject_submissions.lock().unwrap() = Some(message.into());
    }

    pub fn set_roster(&self, roster: Vec<LiveFightSummary>) {
        *self.inner.roster.lock().unwrap() = roster;
    }

    pub fn set_next_round_state(&self, state: RoundState) {
        *self.inner.next_round_state.lock().unwrap() = Some(state);
    }

    pub fn fetch_count(&self) -> u32 {
        self.inner.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn roster_call_count(&self) -> u32 {
        self.inner.roster_calls.load(Ordering::SeqCst)
    }

    pub fn admin_call_count(&self) -> u32 {
        self.inner.admin_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_submissions(&self) -> Vec<SubmissionRequest> {
        self.inner.submissions.lock().unwrap().clone()
    }
}

impl ScoringBackend for MockBackend {
    fn get_fight_scorecard(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<FightScorecard>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let scripted = mock.inner.phase_script.lock().unwrap().pop_front();
            let mut cards = mock.inner.scorecards.lock().unwrap();
            let card = cards
                .get_mut(&bout_id)
                .ok_or_else(|| RpcError::rejected(format!("bout {bout_id} not found")))?;
            if let Some(phase) = scripted {
                card.round_state.phase = phase;
            }
            Ok(card.clone())
        })
    }

    fn get_event_scorecards(
        &self,
        _event_id: EventId,
    ) -> BoxFuture<'static, RpcResult<Vec<FightScorecard>>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let cards = mock.inner.scorecards.lock().unwrap();
            Ok(cards.values().cloned().collect())
        })
    }

    fn submit_round_score(
        &self,
        request: SubmissionRequest,
    ) -> BoxFuture<'static, RpcResult<UserRoundScore>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.submissions.lock().unwrap().push(request.clone());

            let failures = &mock.inner.transport_failures;
            if failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(RpcError::transport(
                    "submit_round_score",
                    io::Error::new(io::ErrorKind::TimedOut, "simulated timeout"),
                ));
            }

            if let Some(message) = mock.inner.reject_submissions.lock().unwrap().clone() {
                return Err(RpcError::rejected(message));
            }

            let stored = UserRoundScore {
                round_number: request.round_number,
                score_red: request.score_red,
                score_blue: request.score_blue,
                submitted_at: OffsetDateTime::now_utc(),
            };

            let mut cards = mock.inner.scorecards.lock().unwrap();
            let card = cards
                .get_mut(&request.bout_id)
                .ok_or_else(|| RpcError::rejected(format!("bout {} not found", request.bout_id)))?;
            match card
                .user_scores
                .iter_mut()
                .find(|score| score.round_number == request.round_number)
            {
                Some(existing) => *existing = stored.clone(),
                None => card.user_scores.push(stored.clone()),
            }
            card.user_scores.sort_by_key(|score| score.round_number);

            Ok(stored)
        })
    }

    fn admin_update_round_state(
        &self,
        bout_id: BoutId,
        _action: TransitionAction,
        _round_number: Option<u32>,
    ) -> BoxFuture<'static, RpcResult<RoundState>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.admin_calls.fetch_add(1, Ordering::SeqCst);
            let next = mock
                .inner
                .next_round_state
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| RpcError::rejected("no transition scripted"))?;
            if let Some(card) = mock.inner.scorecards.lock().unwrap().get_mut(&bout_id) {
                card.round_state = next.clone();
            }
            Ok(next)
        })
    }

    fn admin_get_live_fights(&self) -> BoxFuture<'static, RpcResult<Vec<LiveFightSummary>>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.roster_calls.fetch_add(1, Ordering::SeqCst);
            Ok(mock.inner.roster.lock().unwrap().clone())
        })
    }

    fn admin_recompute_aggregates(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<RecomputeOutcome>> {
        let mock = self.clone();
        Box::pin(async move {
            mock.inner.admin_calls.fetch_add(1, Ordering::SeqCst);
            let cards = mock.inner.scorecards.lock().unwrap();
            let rounds_rebuilt = cards
                .get(&bout_id)
                .map(|card| card.user_scores.len() as u32)
                .unwrap_or(0);
            Ok(RecomputeOutcome { rounds_rebuilt })
        })
    }
}

/// Builders for the domain values the tests pass around.
pub(crate) mod fixtures {
    use std::sync::Arc;

    use time::OffsetDateTime;

    use super::MockBackend;
    use crate::{
        config::LiveConfig,
        dto::{
            Bout, BoutId, FightScorecard, LiveFightSummary, RoundPhase, RoundState,
            RoundStateSource, UserRoundScore,
        },
        state::{CallerRole, CoordinatorState, SharedState},
    };

    pub fn round_state(phase: RoundPhase) -> RoundState {
        RoundState {
            current_round: 1,
            phase,
            scheduled_rounds: 3,
            round_started_at: None,
            round_ends_at: None,
            scoring_grace_seconds: 20,
            source: RoundStateSource::Manual,
            updated_at: OffsetDateTime::now_utc(),
            is_scoring_open: false,
        }
    }

    pub fn scorecard(bout_id: BoutId, phase: RoundPhase) -> FightScorecard {
        FightScorecard {
            bout: Bout {
                id: bout_id,
                red_corner: "Ramos".into(),
                blue_corner: "Kovac".into(),
                weight_class: "lightweight".into(),
                status: "scheduled".into(),
            },
            round_state: round_state(phase),
            aggregates: Vec::new(),
            user_scores: Vec::new(),
        }
    }

    pub fn scorecard_with_scored_rounds(bout_id: BoutId, rounds: &[u32]) -> FightScorecard {
        let mut card = scorecard(bout_id, RoundPhase::RoundBreak);
        card.user_scores = rounds
            .iter()
            .map(|&round_number| UserRoundScore {
                round_number,
                score_red: 10,
                score_blue: 9,
                submitted_at: OffsetDateTime::now_utc(),
            })
            .collect();
        card.user_scores.sort_by_key(|score| score.round_number);
        card
    }

    pub fn live_summary(bout_id: BoutId) -> LiveFightSummary {
        LiveFightSummary {
            bout_id,
            event_name: "CFC 12".into(),
            red_corner: "Ramos".into(),
            blue_corner: "Kovac".into(),
            phase: RoundPhase::RoundBreak,
            current_round: 1,
        }
    }

    pub fn state(backend: &MockBackend, role: CallerRole) -> SharedState {
        CoordinatorState::new(Arc::new(backend.clone()), LiveConfig::default(), role)
    }
}
