use crate::models::MenteeProfile;
use serde_json::Value;

/// Matching preferences derived from a mentee profile
///
/// Built fresh for every request, starting from defaults. An oracle reply,
/// when one arrives, refines individual fields; anything missing or
/// malformed leaves the default in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPreferences {
    pub required_skills: Vec<String>,
    pub prefer_same_college: bool,
    pub prefer_same_district: bool,
    pub min_experience_years: u32,
}

impl Default for DerivedPreferences {
    fn default() -> Self {
        Self {
            required_skills: Vec::new(),
            prefer_same_college: true,
            prefer_same_district: true,
            min_experience_years: 1,
        }
    }
}

/// Merge a raw preference-oracle reply into `prefs`, field by field
///
/// The reply may be wrapped in prose or code fences; the first JSON object
/// found in it is used. Every field is type-checked independently, so one
/// bad field never discards the rest. `minExperienceYears` is floored to an
/// integer and clamped to at least 1.
pub fn merge_oracle_reply(prefs: &mut DerivedPreferences, raw: &str) {
    let Some(json) = extract_json_object(raw) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return;
    };
    let Some(obj) = value.as_object() else {
        return;
    };

    if let Some(skills) = obj.get("requiredSkills").and_then(Value::as_array) {
        prefs.required_skills = skills
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(flag) = obj.get("preferSameCollege").and_then(Value::as_bool) {
        prefs.prefer_same_college = flag;
    }
    if let Some(flag) = obj.get("preferSameDistrict").and_then(Value::as_bool) {
        prefs.prefer_same_district = flag;
    }
    if let Some(years) = obj.get("minExperienceYears").and_then(Value::as_f64) {
        prefs.min_experience_years = years.floor().max(1.0) as u32;
    }
}

/// Slice out the first JSON object embedded in free text
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then_some(&raw[start..=end])
}

/// Compact natural-language summary of a mentee for the preference oracle
pub fn mentee_summary(mentee: &MenteeProfile) -> String {
    let mut lines = Vec::new();

    if let Some(headline) = mentee.headline.as_deref().map(str::trim) {
        if !headline.is_empty() {
            lines.push(format!("Headline: {headline}"));
        }
    }
    if let Some(bio) = mentee.bio.as_deref().map(str::trim) {
        if !bio.is_empty() {
            lines.push(format!("About: {bio}"));
        }
    }
    if !mentee.skills.is_empty() {
        lines.push(format!("Skills: {}", mentee.skills.join(", ")));
    }

    let mut place = Vec::new();
    for field in [
        &mentee.location.college,
        &mentee.location.district,
        &mentee.location.state,
    ] {
        if let Some(value) = field.as_deref().map(str::trim) {
            if !value.is_empty() {
                place.push(value);
            }
        }
    }
    if !place.is_empty() {
        lines.push(format!("Location: {}", place.join(", ")));
    }

    lines.join("\n")
}

/// Mentee skill summary for the scoring oracle, folding in any derived
/// focus skills
pub fn mentee_skill_summary(mentee: &MenteeProfile, prefs: &DerivedPreferences) -> String {
    let skills = if mentee.skills.is_empty() {
        "none listed".to_string()
    } else {
        mentee.skills.join(", ")
    };

    if prefs.required_skills.is_empty() {
        format!("skills: {skills}")
    } else {
        format!(
            "skills: {skills}; looking for mentors strong in: {}",
            prefs.required_skills.join(", ")
        )
    }
}
