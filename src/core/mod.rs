// Core algorithm exports
pub mod location;
pub mod matcher;
pub mod preferences;
pub mod scoring;
pub mod skills;

pub use location::location_tier;
pub use matcher::{MatchCandidate, MatchResult, Matcher};
pub use preferences::{merge_oracle_reply, mentee_skill_summary, mentee_summary, DerivedPreferences};
pub use scoring::{deterministic_score, extract_ai_score, final_score, location_weight};
pub use skills::{normalize_skills, skill_overlap};
