use crate::core::preferences::DerivedPreferences;
use crate::models::{LocationTier, ScoringWeights};

/// Baseline score with no external dependency
///
/// `tier * 60 + round(overlap * 40)` with the default weights. Geography
/// dominates: tiers contribute up to 180 points, skill overlap up to 40.
#[inline]
pub fn deterministic_score(tier: LocationTier, overlap: f64, weights: &ScoringWeights) -> u32 {
    tier.rank() * weights.tier_points + (overlap * f64::from(weights.skill_points)).round() as u32
}

/// Tier-dependent multiplier applied to the blended score
///
/// A college-tier match is boosted when the mentee prefers same-college
/// mentors; a district-or-better match is boosted when they prefer
/// same-district mentors.
#[inline]
pub fn location_weight(
    tier: LocationTier,
    prefs: &DerivedPreferences,
    weights: &ScoringWeights,
) -> f64 {
    if prefs.prefer_same_college {
        match tier {
            LocationTier::StateDistrictCollege => weights.college_boost,
            LocationTier::StateDistrict if prefs.prefer_same_district => weights.district_boost,
            _ => 1.0,
        }
    } else if prefs.prefer_same_district && tier >= LocationTier::StateDistrict {
        weights.district_boost
    } else {
        1.0
    }
}

/// Blend the deterministic score with the optional AI opinion
///
/// The result is intentionally not clamped to 0-100: a full-tier match with
/// a strong AI score lands well above 100, and clamping would change
/// tie-break behavior.
#[inline]
pub fn final_score(
    deterministic: u32,
    ai_score: Option<u8>,
    tier: LocationTier,
    prefs: &DerivedPreferences,
    weights: &ScoringWeights,
) -> u32 {
    let ai_component = ai_score.map_or(0.0, |s| f64::from(s) * weights.ai_blend);
    ((f64::from(deterministic) + ai_component) * location_weight(tier, prefs, weights)).round()
        as u32
}

/// Pull the first integer out of a scoring-oracle reply, clamped to 0-100
///
/// Returns `None` when the reply carries no digits at all.
pub fn extract_ai_score(raw: &str) -> Option<u8> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let rest = &raw[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    // parse only fails on overflow here, which clamps anyway
    let value = rest[..end].parse::<u64>().unwrap_or(100).min(100);
    Some(value as u8)
}
