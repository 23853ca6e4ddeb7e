use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to build a mentor shortlist
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchMentorsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<usize>,
}
