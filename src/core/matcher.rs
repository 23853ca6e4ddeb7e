use crate::core::location::location_tier;
use crate::core::preferences::DerivedPreferences;
use crate::core::scoring::{deterministic_score, final_score};
use crate::core::skills::skill_overlap;
use crate::models::{LocationTier, MenteeProfile, MentorProfile, RankedMentor, ScoringWeights};

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub mentors: Vec<RankedMentor>,
    pub total_candidates: usize,
    pub best_tier: Option<LocationTier>,
}

/// Per-candidate working state, discarded once the response is built
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub profile: MentorProfile,
    pub tier: LocationTier,
    pub skill_overlap: f64,
    pub deterministic_score: u32,
    pub ai_score: Option<u8>,
    pub final_score: u32,
}

impl From<MatchCandidate> for RankedMentor {
    fn from(candidate: MatchCandidate) -> Self {
        RankedMentor {
            user_id: candidate.profile.user_id,
            name: candidate.profile.name,
            headline: candidate.profile.headline,
            skills: candidate.profile.skills,
            location: candidate.profile.location,
            total_experience_years: candidate.profile.total_experience_years,
            available_to_mentor: candidate.profile.available_to_mentor,
            location_tier: candidate.tier,
            skill_overlap: candidate.skill_overlap,
            ai_score: candidate.ai_score,
            final_score: candidate.final_score,
        }
    }
}

/// Ranking orchestrator
///
/// # Pipeline stages
/// 1. Per-candidate evaluation: location tier + skill overlap + baseline score
/// 2. AI score blending (scores arrive from the caller, already best-effort)
/// 3. Sort by tier, then blended score, stable on retrieval order
/// 4. Strict-tier truncation: only the best tier present survives
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Evaluate one candidate against the mentee
    ///
    /// Produces the tier, overlap, and deterministic score. The AI score
    /// starts empty; the caller fills it in if an oracle is available.
    pub fn evaluate(&self, mentee: &MenteeProfile, mentor: MentorProfile) -> MatchCandidate {
        let tier = location_tier(&mentee.location, &mentor.location);
        let overlap = skill_overlap(&mentee.skills, &mentor.skills);
        let baseline = deterministic_score(tier, overlap, &self.weights);

        MatchCandidate {
            profile: mentor,
            tier,
            skill_overlap: overlap,
            deterministic_score: baseline,
            ai_score: None,
            final_score: 0,
        }
    }

    /// Blend, sort, and truncate the candidate pool into a shortlist
    ///
    /// Candidates must be passed in retrieval order; exact ties keep that
    /// order, so the outcome never depends on map or set iteration.
    pub fn rank(
        &self,
        prefs: &DerivedPreferences,
        mut candidates: Vec<MatchCandidate>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        for candidate in &mut candidates {
            candidate.final_score = final_score(
                candidate.deterministic_score,
                candidate.ai_score,
                candidate.tier,
                prefs,
                &self.weights,
            );
        }

        // stable sort: ties preserve retrieval order
        candidates.sort_by(|a, b| {
            b.tier
                .cmp(&a.tier)
                .then(b.final_score.cmp(&a.final_score))
        });

        let best_tier = candidates.first().map(|c| c.tier);
        if let Some(best) = best_tier {
            candidates.retain(|c| c.tier == best);
        }
        candidates.truncate(limit);

        MatchResult {
            mentors: candidates.into_iter().map(RankedMentor::from).collect(),
            total_candidates,
            best_tier,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
