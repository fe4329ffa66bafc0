use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    dto::{
        BoutId, EventId, FightScorecard, LiveFightSummary, RecomputeOutcome, RoundState,
        SubmissionRequest, TransitionAction, UserRoundScore,
    },
    rpc::{RpcError, RpcResult, ScoringBackend},
};

use super::{
    config::HttpConfig,
    error::{HttpBackendError, HttpResult},
    models::{
        ErrorBody, EventScorecardsArgs, RecomputeAck, RecomputeArgs, ScorecardArgs,
        SubmitScoreAck, UpdateRoundStateAck, UpdateRoundStateArgs,
    },
};

/// Scoring backend reached over HTTP, one POST per procedure.
#[derive(Clone)]
pub struct HttpScoringBackend {
    client: Client,
    base_url: Arc<str>,
    auth_token: Option<Arc<str>>,
}

impl HttpScoringBackend {
    /// Build a backend handle from the given configuration.
    pub fn new(config: HttpConfig) -> HttpResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| HttpBackendError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.base_url.trim_end_matches('/')),
            auth_token: config.auth_token.map(Arc::<str>::from),
        })
    }

    fn procedure(&self, name: &'static str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, name);
        let builder = self.client.post(url);
        if let Some(ref token) = self.auth_token {
            builder.bearer_auth(token.as_ref())
        } else {
            builder
        }
    }

    async fn call<A, T>(&self, name: &'static str, args: &A) -> RpcResult<T>
    where
        A: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .procedure(name)
            .json(args)
            .send()
            .await
            .map_err(|source| RpcError::transport(name, source))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = decoded_message(response)
                .await
                .unwrap_or_else(|| "operator access required".into());
            return Err(RpcError::unauthorized(message));
        }
        if !status.is_success() {
            let message = decoded_message(response)
                .await
                .unwrap_or_else(|| format!("`{name}` failed with status {status}"));
            return Err(RpcError::rejected(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| RpcError::decode(name, source))
    }
}

/// Best-effort extraction of the server's error body.
async fn decoded_message(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.message)
}

impl ScoringBackend for HttpScoringBackend {
    fn get_fight_scorecard(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<FightScorecard>> {
        let backend = self.clone();
        Box::pin(async move {
            backend
                .call("get_fight_scorecard", &ScorecardArgs { bout_id })
                .await
        })
    }

    fn get_event_scorecards(
        &self,
        event_id: EventId,
    ) -> BoxFuture<'static, RpcResult<Vec<FightScorecard>>> {
        let backend = self.clone();
        Box::pin(async move {
            backend
                .call("get_event_scorecards", &EventScorecardsArgs { event_id })
                .await
        })
    }

    fn submit_round_score(
        &self,
        request: SubmissionRequest,
    ) -> BoxFuture<'static, RpcResult<UserRoundScore>> {
        let backend = self.clone();
        Box::pin(async move {
            let ack: SubmitScoreAck = backend.call("submit_round_score", &request).await?;
            ack.into_result("submit_round_score")
        })
    }

    fn admin_update_round_state(
        &self,
        bout_id: BoutId,
        action: TransitionAction,
        round_number: Option<u32>,
    ) -> BoxFuture<'static, RpcResult<RoundState>> {
        let backend = self.clone();
        Box::pin(async move {
            let args = UpdateRoundStateArgs {
                bout_id,
                action,
                round_number,
            };
            let ack: UpdateRoundStateAck =
                backend.call("admin_update_round_state", &args).await?;
            ack.into_result("admin_update_round_state")
        })
    }

    fn admin_get_live_fights(&self) -> BoxFuture<'static, RpcResult<Vec<LiveFightSummary>>> {
        let backend = self.clone();
        Box::pin(async move { backend.call("admin_get_live_fights", &()).await })
    }

    fn admin_recompute_aggregates(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<RecomputeOutcome>> {
        let backend = self.clone();
        Box::pin(async move {
            let ack: RecomputeAck = backend
                .call("admin_recompute_aggregates", &RecomputeArgs { bout_id })
                .await?;
            ack.into_result("admin_recompute_aggregates")
        })
    }
}
