//! Seam between the coordinator and the remote scoring backend.
//!
//! The backend is treated as an opaque set of procedures; everything the
//! coordinator knows about the wire lives behind [`ScoringBackend`].

#[cfg(feature = "http-backend")]
pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dto::{
    BoutId, EventId, FightScorecard, LiveFightSummary, RecomputeOutcome, RoundState,
    SubmissionRequest, TransitionAction, UserRoundScore,
};

/// Result alias for backend procedure calls.
pub type RpcResult<T> = Result<T, RpcError>;

/// Failures crossing the backend seam.
///
/// The variants match how callers must react: `Transport` and `Decode` are
/// transient and retryable with the same idempotency token, `Rejected`
/// carries a domain refusal to show verbatim, and `Unauthorized` is fatal to
/// the action.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The procedure call never completed (connect failure, timeout).
    #[error("transport failure calling `{procedure}`")]
    Transport {
        /// Procedure that was being called.
        procedure: &'static str,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend answered and refused the operation.
    #[error("{message}")]
    Rejected {
        /// Server-provided human-readable refusal.
        message: String,
    },
    /// The caller is not allowed to invoke this procedure.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Server-provided reason.
        message: String,
    },
    /// A response arrived but could not be decoded.
    #[error("malformed response from `{procedure}`")]
    Decode {
        /// Procedure whose response failed to decode.
        procedure: &'static str,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl RpcError {
    /// Construct a transport failure from any underlying error.
    pub fn transport(
        procedure: &'static str,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Transport {
            procedure,
            source: Box::new(source),
        }
    }

    /// Construct a domain refusal carrying the server's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        RpcError::Rejected {
            message: message.into(),
        }
    }

    /// Construct an authorization failure.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        RpcError::Unauthorized {
            message: message.into(),
        }
    }

    /// Construct a decode failure from any underlying error.
    pub fn decode(procedure: &'static str, source: impl Error + Send + Sync + 'static) -> Self {
        RpcError::Decode {
            procedure,
            source: Box::new(source),
        }
    }
}

/// Remote procedures exposed by the scoring backend.
///
/// Implementations must inspect the response body for embedded refusals: an
/// envelope whose success flag is off is a [`RpcError::Rejected`], even when
/// the call itself came back clean.
pub trait ScoringBackend: Send + Sync {
    /// Consolidated snapshot for one bout.
    fn get_fight_scorecard(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<FightScorecard>>;

    /// Snapshots for every bout on an event's card, in card order.
    fn get_event_scorecards(
        &self,
        event_id: EventId,
    ) -> BoxFuture<'static, RpcResult<Vec<FightScorecard>>>;

    /// Record one round's score. Deliveries sharing a `submission_id`
    /// collapse into a single effect server-side.
    fn submit_round_score(
        &self,
        request: SubmissionRequest,
    ) -> BoxFuture<'static, RpcResult<UserRoundScore>>;

    /// Operator-only: drive the bout's round lifecycle.
    fn admin_update_round_state(
        &self,
        bout_id: BoutId,
        action: TransitionAction,
        round_number: Option<u32>,
    ) -> BoxFuture<'static, RpcResult<RoundState>>;

    /// Operator-only: bouts currently in an active scoring phase.
    fn admin_get_live_fights(&self) -> BoxFuture<'static, RpcResult<Vec<LiveFightSummary>>>;

    /// Operator-only: rebuild a bout's per-round aggregates from raw scores.
    fn admin_recompute_aggregates(
        &self,
        bout_id: BoutId,
    ) -> BoxFuture<'static, RpcResult<RecomputeOutcome>>;
}
