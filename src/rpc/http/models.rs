//! Wire payloads for the procedure endpoint, separate from the domain DTOs.

use serde::{Deserialize, Serialize};

use crate::{
    dto::{
        BoutId, EventId, RecomputeOutcome, RoundState, TransitionAction, UserRoundScore,
    },
    rpc::{RpcError, RpcResult},
};

#[derive(Serialize)]
pub(super) struct ScorecardArgs {
    pub bout_id: BoutId,
}

#[derive(Serialize)]
pub(super) struct EventScorecardsArgs {
    pub event_id: EventId,
}

#[derive(Serialize)]
pub(super) struct UpdateRoundStateArgs {
    pub bout_id: BoutId,
    pub action: TransitionAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u32>,
}

#[derive(Serialize)]
pub(super) struct RecomputeArgs {
    pub bout_id: BoutId,
}

/// Error body the backend attaches to non-success statuses.
#[derive(Deserialize)]
pub(super) struct ErrorBody {
    pub message: String,
}

/// Mutation acknowledgement for a score submission. The success flag must be
/// inspected even on a clean response: a refusal travels inside it.
#[derive(Deserialize)]
pub(super) struct SubmitScoreAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub score: Option<UserRoundScore>,
}

impl SubmitScoreAck {
    pub fn into_result(self, procedure: &'static str) -> RpcResult<UserRoundScore> {
        ack_payload(self.success, self.message, self.score, procedure)
    }
}

/// Mutation acknowledgement for a round-state transition.
#[derive(Deserialize)]
pub(super) struct UpdateRoundStateAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub round_state: Option<RoundState>,
}

impl UpdateRoundStateAck {
    pub fn into_result(self, procedure: &'static str) -> RpcResult<RoundState> {
        ack_payload(self.success, self.message, self.round_state, procedure)
    }
}

/// Mutation acknowledgement for an aggregate recomputation.
#[derive(Deserialize)]
pub(super) struct RecomputeAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rounds_rebuilt: Option<u32>,
}

impl RecomputeAck {
    pub fn into_result(self, procedure: &'static str) -> RpcResult<RecomputeOutcome> {
        ack_payload(self.success, self.message, self.rounds_rebuilt, procedure)
            .map(|rounds_rebuilt| RecomputeOutcome { rounds_rebuilt })
    }
}

/// Convert an acknowledgement into its payload, surfacing an embedded refusal
/// as [`RpcError::Rejected`] and a success without payload as a decode error.
fn ack_payload<T>(
    success: bool,
    message: Option<String>,
    payload: Option<T>,
    procedure: &'static str,
) -> RpcResult<T> {
    if !success {
        let message =
            message.unwrap_or_else(|| format!("`{procedure}` was refused by the backend"));
        return Err(RpcError::rejected(message));
    }

    payload.ok_or_else(|| {
        RpcError::decode(
            procedure,
            MissingAckPayload,
        )
    })
}

/// Successful acknowledgement arrived without its payload field.
#[derive(Debug, thiserror::Error)]
#[error("acknowledgement is missing its payload")]
struct MissingAckPayload;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_ack_surfaces_the_server_message() {
        let ack = SubmitScoreAck {
            success: false,
            message: Some("scoring window closed".into()),
            score: None,
        };
        let err = ack.into_result("submit_round_score").unwrap_err();
        assert!(matches!(
            err,
            RpcError::Rejected { message } if message == "scoring window closed"
        ));
    }

    #[test]
    fn successful_ack_without_payload_is_a_decode_failure() {
        let ack = SubmitScoreAck {
            success: true,
            message: None,
            score: None,
        };
        let err = ack.into_result("submit_round_score").unwrap_err();
        assert!(matches!(err, RpcError::Decode { .. }));
    }
}
