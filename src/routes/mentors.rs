use crate::core::{mentee_skill_summary, mentee_summary, merge_oracle_reply, DerivedPreferences, Matcher};
use crate::models::{ErrorResponse, HealthResponse, MatchMentorsRequest, MatchMentorsResponse, MentorProfile};
use crate::services::{score_pool, AppwriteClient, AppwriteError, OracleClient};
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

const MISSING_STATE_MESSAGE: &str =
    "Add your state to your profile so we can find mentors near you.";
const EMPTY_POOL_MESSAGE: &str = "No mentors found in your state yet. Check back soon.";
const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while finding mentors. Please try again.";

/// Upper bound on the AI scoring stage as a whole; individual calls have
/// their own shorter timeout
const SCORING_STAGE_TIMEOUT_SECS: u64 = 10;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub oracle: Option<Arc<OracleClient>>,
    pub matcher: Matcher,
    pub limits: MatchLimits,
}

/// Per-request limits derived from configuration
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub shortlist_size: usize,
    pub max_limit: usize,
    pub oracle_concurrency: usize,
}

/// Configure all mentor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/mentors/match", web::post().to(match_mentors));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        oracle_configured: state.oracle.is_some(),
    })
}

/// Mentor matching endpoint
///
/// POST /api/v1/mentors/match
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 10
/// }
/// ```
///
/// Runs the full pipeline: preference derivation (best-effort), candidate
/// retrieval under the mandatory filters, prior-relationship exclusion,
/// per-candidate scoring with optional AI refinement, and strict-tier
/// ranking.
async fn match_mentors(
    state: web::Data<AppState>,
    req: web::Json<MatchMentorsRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_mentors request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let limit = req
        .limit
        .unwrap_or(state.limits.shortlist_size)
        .min(state.limits.max_limit);

    tracing::info!("Matching mentors for user: {}, limit: {}", user_id, limit);

    // Fetch the mentee profile
    let mentee = match state.appwrite.get_mentee(user_id).await {
        Ok(profile) => profile,
        Err(AppwriteError::NotFound(_)) => {
            tracing::info!("No profile on file for {}", user_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "profile_not_found".to_string(),
                message: "No profile found for this user.".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_error".to_string(),
                message: GENERIC_ERROR_MESSAGE.to_string(),
                status_code: 500,
            });
        }
    };

    // Precondition: a state on file, checked before the candidate query
    let Some(mentee_state) = mentee.state().map(str::to_owned) else {
        tracing::info!("Mentee {} has no state on file, rejecting", user_id);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "incomplete_profile".to_string(),
            message: MISSING_STATE_MESSAGE.to_string(),
            status_code: 400,
        });
    };

    // Derive matching preferences: defaults, refined by the oracle when one
    // is configured. Oracle failure is absorbed here.
    let mut prefs = DerivedPreferences::default();
    if let Some(oracle) = &state.oracle {
        match oracle.derive_preferences(&mentee_summary(&mentee)).await {
            Ok(raw) => merge_oracle_reply(&mut prefs, &raw),
            Err(e) => {
                tracing::warn!(
                    "Preference oracle unavailable for {}, using defaults: {}",
                    user_id,
                    e
                );
            }
        }
    }

    tracing::debug!("Derived preferences for {}: {:?}", user_id, prefs);

    // Query the candidate pool under the mandatory filters
    let mentors = match state
        .appwrite
        .query_mentors(user_id, &mentee_state, &prefs)
        .await
    {
        Ok(mentors) => mentors,
        Err(e) => {
            tracing::error!("Failed to query mentors for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_error".to_string(),
                message: GENERIC_ERROR_MESSAGE.to_string(),
                status_code: 500,
            });
        }
    };

    // Exclude mentors already linked to this mentee
    let excluded: HashSet<String> = match state.appwrite.list_active_requests(user_id).await {
        Ok(requests) => requests
            .into_iter()
            .filter(|r| r.status.blocks_rematch())
            .map(|r| r.mentor_id)
            .collect(),
        Err(e) => {
            tracing::error!("Failed to fetch mentorship requests for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_error".to_string(),
                message: GENERIC_ERROR_MESSAGE.to_string(),
                status_code: 500,
            });
        }
    };

    let mentors: Vec<MentorProfile> = mentors
        .into_iter()
        .filter(|m| !excluded.contains(&m.user_id))
        .collect();

    tracing::debug!(
        "Candidate pool for {}: {} mentors after exclusion",
        user_id,
        mentors.len()
    );

    if mentors.is_empty() {
        return HttpResponse::Ok().json(MatchMentorsResponse {
            matches: vec![],
            message: Some(EMPTY_POOL_MESSAGE.to_string()),
            total_candidates: 0,
        });
    }

    // Per-candidate evaluation: tier, overlap, baseline score
    let mut candidates: Vec<_> = mentors
        .into_iter()
        .map(|mentor| state.matcher.evaluate(&mentee, mentor))
        .collect();

    // Optional AI refinement, one best-effort call per candidate
    if let Some(oracle) = &state.oracle {
        let mentee_skills = mentee_skill_summary(&mentee, &prefs);
        let summaries: Vec<String> = candidates
            .iter()
            .map(|c| candidate_skill_summary(&c.profile))
            .collect();

        let pool = score_pool(
            Arc::clone(oracle),
            mentee_skills,
            summaries,
            state.limits.oracle_concurrency,
        );

        let scores = match tokio::time::timeout(
            Duration::from_secs(SCORING_STAGE_TIMEOUT_SECS),
            pool,
        )
        .await
        {
            Ok(scores) => scores,
            Err(_) => {
                tracing::warn!(
                    "Scoring stage timed out for {}, continuing without AI scores",
                    user_id
                );
                vec![None; candidates.len()]
            }
        };

        for (candidate, score) in candidates.iter_mut().zip(scores) {
            candidate.ai_score = score;
        }
    }

    // Rank and truncate to the best tier present
    let result = state.matcher.rank(&prefs, candidates, limit);

    tracing::info!(
        "Returning {} mentors for user {} (best tier: {:?}, from {} candidates)",
        result.mentors.len(),
        user_id,
        result.best_tier,
        result.total_candidates
    );

    HttpResponse::Ok().json(MatchMentorsResponse {
        matches: result.mentors,
        message: None,
        total_candidates: result.total_candidates,
    })
}

/// Compact skill summary of a candidate for the scoring oracle
fn candidate_skill_summary(mentor: &MentorProfile) -> String {
    let skills = if mentor.skills.is_empty() {
        "none listed".to_string()
    } else {
        mentor.skills.join(", ")
    };

    format!(
        "skills: {}; {} years of experience",
        skills, mentor.total_experience_years
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            oracle_configured: false,
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_candidate_skill_summary() {
        let mentor = MentorProfile {
            user_id: "m1".to_string(),
            name: "Asha".to_string(),
            headline: None,
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            location: Location::default(),
            total_experience_years: 6,
            available_to_mentor: true,
        };

        assert_eq!(
            candidate_skill_summary(&mentor),
            "skills: Rust, SQL; 6 years of experience"
        );
    }

    #[test]
    fn test_candidate_skill_summary_without_skills() {
        let mentor = MentorProfile {
            user_id: "m1".to_string(),
            name: "Asha".to_string(),
            headline: None,
            skills: vec![],
            location: Location::default(),
            total_experience_years: 2,
            available_to_mentor: true,
        };

        assert_eq!(
            candidate_skill_summary(&mentor),
            "skills: none listed; 2 years of experience"
        );
    }
}
