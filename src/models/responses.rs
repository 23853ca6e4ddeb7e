use crate::models::domain::RankedMentor;
use serde::{Deserialize, Serialize};

/// Response for the match endpoint
///
/// `message` is only present when the shortlist is empty and explains why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMentorsResponse {
    pub matches: Vec<RankedMentor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "oracleConfigured")]
    pub oracle_configured: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
