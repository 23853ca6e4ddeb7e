use crate::core::DerivedPreferences;
use crate::models::{MenteeProfile, MentorProfile, MentorshipRequest};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the Appwrite backend including:
/// - Fetching mentee profiles
/// - Querying the mentor candidate pool under the mandatory filters
/// - Listing existing mentorship requests for exclusion
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
    pub mentorship_requests: String,
}

/// Store-level filters for the mentor pool query
///
/// These are the mandatory constraints: never self, exact state match,
/// enough experience, and opted in to mentoring. The skills filter is an
/// optional narrowing and only applied when the derived preferences name
/// any focus skills.
fn mentor_pool_queries(mentee_id: &str, state: &str, prefs: &DerivedPreferences) -> Vec<String> {
    let mut queries = vec![
        format!("equal(\"availableToMentor\", true)"),
        format!("equal(\"state\", \"{}\")", state),
        format!(
            "greaterThan(\"totalExperienceYears\", {})",
            i64::from(prefs.min_experience_years) - 1
        ),
        format!("notEqual(\"userId\", \"{}\")", mentee_id),
    ];

    if !prefs.required_skills.is_empty() {
        let skills_filter = prefs
            .required_skills
            .iter()
            .map(|s| format!("\"{}\"", s.trim()))
            .collect::<Vec<_>>()
            .join(",");
        queries.push(format!("contains(\"skills\", [{}])", skills_filter));
    }

    queries
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    /// List documents from a collection under a set of Appwrite queries
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, AppwriteError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode query: {}", e)))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection_id,
            encoded_queries
        );

        tracing::debug!("Listing documents from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to list documents in {}: {}",
                collection_id,
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        Ok(documents.to_vec())
    }

    /// Fetch a mentee profile by user ID
    pub async fn get_mentee(&self, user_id: &str) -> Result<MenteeProfile, AppwriteError> {
        let queries = vec![format!("equal(\"userId\", \"{}\")", user_id)];

        let documents = self
            .list_documents(&self.collections.user_profiles, &queries)
            .await?;

        let doc = documents.first().ok_or_else(|| {
            AppwriteError::NotFound(format!("Profile not found for user {}", user_id))
        })?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Query the mentor candidate pool
    ///
    /// Applies the mandatory store-level filters; documents that fail to
    /// parse are skipped rather than failing the whole query.
    pub async fn query_mentors(
        &self,
        mentee_id: &str,
        state: &str,
        prefs: &DerivedPreferences,
    ) -> Result<Vec<MentorProfile>, AppwriteError> {
        let queries = mentor_pool_queries(mentee_id, state, prefs);

        let documents = self
            .list_documents(&self.collections.user_profiles, &queries)
            .await?;

        let mentors: Vec<MentorProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .filter(|m: &MentorProfile| m.user_id != mentee_id && m.available_to_mentor)
            .collect();

        tracing::debug!(
            "Queried {} mentor candidates in state {}",
            mentors.len(),
            state
        );

        Ok(mentors)
    }

    /// List the mentee's mentorship requests that are still pending or accepted
    pub async fn list_active_requests(
        &self,
        mentee_id: &str,
    ) -> Result<Vec<MentorshipRequest>, AppwriteError> {
        let queries = vec![
            format!("equal(\"menteeId\", \"{}\")", mentee_id),
            format!("in(\"status\", [\"pending\",\"accepted\"])"),
        ];

        let documents = self
            .list_documents(&self.collections.mentorship_requests, &queries)
            .await?;

        let requests: Vec<MentorshipRequest> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!(
            "Mentee {} has {} active mentorship requests",
            mentee_id,
            requests.len()
        );

        Ok(requests)
    }
}
