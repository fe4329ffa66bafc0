//! Cache-backed readers for consolidated bout scorecards.

use indexmap::IndexMap;

use crate::{
    dto::{BoutId, EventId, FightScorecard},
    error::{ServiceError, ServiceResult},
    state::SharedState,
};

/// Current snapshot for one bout.
///
/// With no bout selected the fetch is skipped entirely and `Ok(None)` comes
/// back. A backend refusal (unknown bout, etc.) surfaces as an error, never
/// as an empty snapshot.
pub async fn fight_scorecard(
    state: &SharedState,
    bout_id: Option<BoutId>,
) -> ServiceResult<Option<FightScorecard>> {
    let Some(bout_id) = bout_id else {
        return Ok(None);
    };

    let backend = state.backend();
    let card = state
        .scorecards()
        .read_through(bout_id, state.config().scorecard_ttl, || async move {
            backend
                .get_fight_scorecard(bout_id)
                .await
                .map_err(ServiceError::from)
        })
        .await?;
    Ok(Some(card))
}

/// Snapshots for every bout on an event's card, keyed by bout in card order.
///
/// Skipped entirely when no event is selected.
pub async fn event_scorecards(
    state: &SharedState,
    event_id: Option<EventId>,
) -> ServiceResult<Option<IndexMap<BoutId, FightScorecard>>> {
    let Some(event_id) = event_id else {
        return Ok(None);
    };

    let backend = state.backend();
    let cards = state
        .event_cards()
        .read_through(event_id, state.config().scorecard_ttl, || async move {
            let cards = backend
                .get_event_scorecards(event_id)
                .await
                .map_err(ServiceError::from)?;
            Ok::<_, ServiceError>(cards
                .into_iter()
                .map(|card| (card.bout.id, card))
                .collect())
        })
        .await?;
    Ok(Some(cards))
}

/// Fetch a bout's snapshot from the backend regardless of cache freshness.
///
/// Used by the poller and after mutations, when the cached copy is known to
/// be behind server truth.
pub async fn refresh_fight_scorecard(
    state: &SharedState,
    bout_id: BoutId,
) -> ServiceResult<FightScorecard> {
    state.scorecards().invalidate(bout_id).await;
    let backend = state.backend();
    state
        .scorecards()
        .read_through(bout_id, state.config().scorecard_ttl, || async move {
            backend
                .get_fight_scorecard(bout_id)
                .await
                .map_err(ServiceError::from)
        })
        .await
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{
        dto::RoundPhase,
        rpc::mock::{MockBackend, fixtures},
        state::CallerRole,
    };

    #[tokio::test]
    async fn absent_bout_id_skips_the_fetch() {
        let mock = MockBackend::new();
        let state = fixtures::state(&mock, CallerRole::Fan);

        let card = fight_scorecard(&state, None).await.unwrap();

        assert!(card.is_none());
        assert_eq!(mock.fetch_count(), 0);
    }

    #[tokio::test]
    async fn unknown_bout_surfaces_the_backend_message() {
        let mock = MockBackend::new();
        let state = fixtures::state(&mock, CallerRole::Fan);
        let bout_id = Uuid::new_v4();

        let err = fight_scorecard(&state, Some(bout_id)).await.unwrap_err();

        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[tokio::test]
    async fn reads_within_the_ttl_hit_the_cache() {
        let mock = MockBackend::new();
        let bout_id = Uuid::new_v4();
        mock.insert_scorecard(fixtures::scorecard(bout_id, RoundPhase::PreFight));
        let state = fixtures::state(&mock, CallerRole::Fan);

        fight_scorecard(&state, Some(bout_id)).await.unwrap();
        fight_scorecard(&state, Some(bout_id)).await.unwrap();

        assert_eq!(mock.fetch_count(), 1);
    }

    #[tokio::test]
    async fn event_scorecards_keep_card_order() {
        let mock = MockBackend::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        mock.insert_scorecard(fixtures::scorecard(first, RoundPhase::PreFight));
        mock.insert_scorecard(fixtures::scorecard(second, RoundPhase::PreFight));
        let state = fixtures::state(&mock, CallerRole::Fan);

        let cards = event_scorecards(&state, Some(Uuid::new_v4()))
            .await
            .unwrap()
            .unwrap();

        let order: Vec<_> = cards.keys().copied().collect();
        assert_eq!(order, vec![first, second]);
    }

    #[tokio::test]
    async fn refresh_bypasses_a_fresh_cache() {
        let mock = MockBackend::new();
        let bout_id = Uuid::new_v4();
        mock.insert_scorecard(fixtures::scorecard(bout_id, RoundPhase::PreFight));
        let state = fixtures::state(&mock, CallerRole::Fan);

        fight_scorecard(&state, Some(bout_id)).await.unwrap();
        refresh_fight_scorecard(&state, bout_id).await.unwrap();

        assert_eq!(mock.fetch_count(), 2);
    }
}
