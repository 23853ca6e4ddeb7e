use crate::core::scoring::extract_ai_score;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Errors from the language-model oracle
///
/// `ApiError` and `RequestError` mean the oracle could not be reached or
/// refused the call; `Malformed` means it answered but the reply carried
/// nothing usable. Callers treat every variant as "no opinion"; the
/// pipeline never fails because an oracle did.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("oracle returned error status: {0}")]
    ApiError(reqwest::StatusCode),

    #[error("oracle reply carried no usable payload")]
    Malformed,
}

/// Client for the generative-language oracle
///
/// Wraps a Gemini-style `generateContent` endpoint. Every call is a single
/// attempt with a short timeout; there is no retry policy anywhere in the
/// matching pipeline.
pub struct OracleClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OracleClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    /// One best-effort generation call
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(OracleError::ApiError(response.status()));
        }

        let json: Value = response.json().await?;

        json.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(OracleError::Malformed)
    }

    /// Ask the oracle to turn a mentee summary into structured preferences
    ///
    /// Returns the raw reply text; the caller isolates and validates the
    /// JSON payload, falling back to defaults field by field.
    pub async fn derive_preferences(&self, mentee_summary: &str) -> Result<String, OracleError> {
        let prompt = format!(
            "You help a career mentorship platform understand what a mentee needs.\n\n\
             Mentee profile:\n{mentee_summary}\n\n\
             Reply with a single JSON object and nothing else, using exactly these keys:\n\
             {{\"requiredSkills\": [\"skill\"], \"preferSameCollege\": true, \"preferSameDistrict\": true, \"minExperienceYears\": 1}}\n\n\
             requiredSkills: up to five skills a good mentor for this mentee should have.\n\
             preferSameCollege / preferSameDistrict: whether sharing the mentee's college or district matters.\n\
             minExperienceYears: minimum mentor experience in years, an integer of at least 1."
        );

        self.generate(&prompt).await
    }

    /// Ask the oracle for a 0-100 suitability score for one candidate
    pub async fn score_candidate(
        &self,
        mentee_summary: &str,
        candidate_summary: &str,
    ) -> Result<String, OracleError> {
        let prompt = format!(
            "Rate how suitable this mentor is for this mentee on a scale of 0 to 100.\n\n\
             Mentee: {mentee_summary}\n\
             Mentor: {candidate_summary}\n\n\
             Reply with a single integer between 0 and 100 and nothing else."
        );

        self.generate(&prompt).await
    }
}

/// Score a whole candidate pool with a bounded number of in-flight calls
///
/// Results come back indexed, so retrieval order is preserved regardless of
/// completion order. A failed call leaves `None` at its slot and never
/// aborts the rest of the pool.
pub async fn score_pool(
    oracle: Arc<OracleClient>,
    mentee_summary: String,
    candidate_summaries: Vec<String>,
    max_in_flight: usize,
) -> Vec<Option<u8>> {
    let total = candidate_summaries.len();
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut join_set = JoinSet::new();

    for (index, candidate_summary) in candidate_summaries.into_iter().enumerate() {
        let oracle = Arc::clone(&oracle);
        let semaphore = Arc::clone(&semaphore);
        let mentee_summary = mentee_summary.clone();

        join_set.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (index, None),
            };

            let score = match oracle
                .score_candidate(&mentee_summary, &candidate_summary)
                .await
            {
                Ok(raw) => extract_ai_score(&raw),
                Err(e) => {
                    tracing::warn!("Scoring oracle failed for candidate {}: {}", index, e);
                    None
                }
            };

            (index, score)
        });
    }

    let mut scores = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        if let Ok((index, score)) = joined {
            scores[index] = score;
        }
    }

    scores
}
