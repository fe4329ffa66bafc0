use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::BoutId;

/// A user's score for one round of one bout, plus the idempotency token the
/// backend uses to collapse duplicate deliveries of the same logical action.
///
/// The token is minted exactly once, in [`SubmissionRequest::new`]. Every
/// retry of the same logical submission must reuse the same request value;
/// only a genuinely new attempt initiated by the user builds a new request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubmissionRequest {
    /// Caller-generated idempotency token for this logical submission.
    pub submission_id: Uuid,
    /// Bout the score belongs to.
    pub bout_id: BoutId,
    /// Round being scored, starting at 1.
    #[validate(range(min = 1))]
    pub round_number: u32,
    /// Points for the red corner. Acceptable range is a backend invariant;
    /// the client does not enforce one.
    pub score_red: u8,
    /// Points for the blue corner.
    pub score_blue: u8,
}

impl SubmissionRequest {
    /// Build the request for a new logical submission attempt, minting its
    /// idempotency token.
    pub fn new(bout_id: BoutId, round_number: u32, score_red: u8, score_blue: u8) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            bout_id,
            round_number,
            score_red,
            score_blue,
        }
    }
}
