use serde::{Deserialize, Serialize};

/// Where a user is, as stored on their profile
///
/// Only `state` is required for matching; district and college refine the
/// affinity tier when both sides have them on file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
}

/// Mentee profile fields the matching engine reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenteeProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl MenteeProfile {
    /// The mentee's state, if a non-blank value is on file
    pub fn state(&self) -> Option<&str> {
        self.location
            .state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Mentor candidate profile, read-only for this engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "totalExperienceYears", default)]
    pub total_experience_years: u32,
    #[serde(rename = "availableToMentor", default)]
    pub available_to_mentor: bool,
}

/// Geographic affinity between a mentee and a mentor candidate
///
/// `None` means the states differ; the candidate retriever filters on state,
/// so candidates entering the scoring pipeline are always `State` or better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTier {
    None = 0,
    State = 1,
    StateDistrict = 2,
    StateDistrictCollege = 3,
}

impl LocationTier {
    pub fn rank(self) -> u32 {
        self as u32
    }
}

/// A mentorship request linking a mentee to a specific mentor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipRequest {
    #[serde(rename = "menteeId")]
    pub mentee_id: String,
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
}

impl RequestStatus {
    /// Whether an existing request at this status keeps the mentor out of
    /// future shortlists for the same mentee
    pub fn blocks_rematch(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Accepted)
    }
}

/// Ranked shortlist entry returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMentor {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub headline: Option<String>,
    pub skills: Vec<String>,
    pub location: Location,
    #[serde(rename = "totalExperienceYears")]
    pub total_experience_years: u32,
    #[serde(rename = "availableToMentor")]
    pub available_to_mentor: bool,
    #[serde(rename = "locationTier")]
    pub location_tier: LocationTier,
    #[serde(rename = "skillOverlap")]
    pub skill_overlap: f64,
    #[serde(rename = "aiScore")]
    pub ai_score: Option<u8>,
    #[serde(rename = "finalScore")]
    pub final_score: u32,
}

/// Scoring weights
///
/// Defaults reproduce the production formula: 60 points per location tier,
/// up to 40 points for skill overlap, the AI opinion blended at half
/// strength, and the tier multipliers applied when the mentee prefers
/// mentors from their own college or district.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub tier_points: u32,
    pub skill_points: u32,
    pub ai_blend: f64,
    pub college_boost: f64,
    pub district_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tier_points: 60,
            skill_points: 40,
            ai_blend: 0.5,
            college_boost: 1.2,
            district_boost: 1.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(LocationTier::StateDistrictCollege > LocationTier::StateDistrict);
        assert!(LocationTier::StateDistrict > LocationTier::State);
        assert!(LocationTier::State > LocationTier::None);
        assert_eq!(LocationTier::StateDistrictCollege.rank(), 3);
        assert_eq!(LocationTier::None.rank(), 0);
    }

    #[test]
    fn test_request_status_blocking() {
        assert!(RequestStatus::Pending.blocks_rematch());
        assert!(RequestStatus::Accepted.blocks_rematch());
        assert!(!RequestStatus::Declined.blocks_rematch());
        assert!(!RequestStatus::Cancelled.blocks_rematch());
    }

    #[test]
    fn test_blank_state_is_missing() {
        let mentee = MenteeProfile {
            user_id: "u1".to_string(),
            name: "Test".to_string(),
            headline: None,
            bio: None,
            skills: vec![],
            location: Location {
                state: Some("   ".to_string()),
                district: None,
                college: None,
            },
        };

        assert_eq!(mentee.state(), None);
    }

    #[test]
    fn test_mentor_profile_from_document() {
        let doc = serde_json::json!({
            "userId": "m1",
            "name": "Asha",
            "skills": ["Rust", "Systems"],
            "state": "Karnataka",
            "district": "Bengaluru Urban",
            "totalExperienceYears": 6,
            "availableToMentor": true,
        });

        let profile: MentorProfile = serde_json::from_value(doc).unwrap();
        assert_eq!(profile.location.state.as_deref(), Some("Karnataka"));
        assert_eq!(profile.location.college, None);
        assert_eq!(profile.total_experience_years, 6);
        assert!(profile.available_to_mentor);
    }
}
