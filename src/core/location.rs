use crate::models::{Location, LocationTier};

/// Compare one optional location field from each side
///
/// Trimmed, case-insensitive. A blank or missing value on either side can
/// never produce a match.
#[inline]
fn fields_match(a: &Option<String>, b: &Option<String>) -> bool {
    match (normalized(a), normalized(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[inline]
fn normalized(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Compute the geographic affinity tier between a mentee and a candidate
///
/// District only counts once the states match, and college only counts once
/// the districts match. The candidate retriever already guarantees a state
/// match, so `LocationTier::None` never reaches scoring.
pub fn location_tier(mentee: &Location, candidate: &Location) -> LocationTier {
    if !fields_match(&mentee.state, &candidate.state) {
        return LocationTier::None;
    }
    if !fields_match(&mentee.district, &candidate.district) {
        return LocationTier::State;
    }
    if !fields_match(&mentee.college, &candidate.college) {
        return LocationTier::StateDistrict;
    }
    LocationTier::StateDistrictCollege
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(state: &str, district: Option<&str>, college: Option<&str>) -> Location {
        Location {
            state: Some(state.to_string()),
            district: district.map(str::to_string),
            college: college.map(str::to_string),
        }
    }

    #[test]
    fn test_state_only_match() {
        let mentee = location("Karnataka", None, None);
        let candidate = location("Karnataka", Some("Mysuru"), Some("NIE"));

        assert_eq!(location_tier(&mentee, &candidate), LocationTier::State);
    }

    #[test]
    fn test_full_match() {
        let mentee = location("Karnataka", Some("Bengaluru Urban"), Some("RV College"));
        let candidate = location("Karnataka", Some("Bengaluru Urban"), Some("RV College"));

        assert_eq!(
            location_tier(&mentee, &candidate),
            LocationTier::StateDistrictCollege
        );
    }

    #[test]
    fn test_college_needs_district() {
        // Same college in a different district stays at the state tier
        let mentee = location("Karnataka", Some("Mysuru"), Some("RV College"));
        let candidate = location("Karnataka", Some("Bengaluru Urban"), Some("RV College"));

        assert_eq!(location_tier(&mentee, &candidate), LocationTier::State);
    }

    #[test]
    fn test_comparison_is_trimmed_and_case_insensitive() {
        let mentee = location("karnataka", Some("  bengaluru urban "), None);
        let candidate = location("Karnataka ", Some("Bengaluru Urban"), None);

        assert_eq!(
            location_tier(&mentee, &candidate),
            LocationTier::StateDistrict
        );
    }

    #[test]
    fn test_blank_district_never_matches() {
        let mentee = location("Karnataka", Some("   "), Some("RV College"));
        let candidate = location("Karnataka", Some("   "), Some("RV College"));

        assert_eq!(location_tier(&mentee, &candidate), LocationTier::State);
    }

    #[test]
    fn test_state_mismatch() {
        let mentee = location("Karnataka", None, None);
        let candidate = location("Kerala", None, None);

        assert_eq!(location_tier(&mentee, &candidate), LocationTier::None);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let mentee = location("Karnataka", Some("Mysuru"), Some("NIE"));

        let state_only = location_tier(&mentee, &location("Karnataka", None, None));
        let district = location_tier(&mentee, &location("Karnataka", Some("Mysuru"), None));
        let college = location_tier(
            &mentee,
            &location("Karnataka", Some("Mysuru"), Some("NIE")),
        );

        assert!(college >= district);
        assert!(district >= state_only);
    }
}
