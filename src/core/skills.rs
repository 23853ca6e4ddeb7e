use std::collections::HashSet;

/// Normalize a raw skill list into a trimmed, case-folded set
///
/// Blank entries are dropped; duplicates collapse.
pub fn normalize_skills(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Jaccard similarity between two skill lists
///
/// Returns a value in [0, 1]. Two empty lists score 0, not NaN.
pub fn skill_overlap(a: &[String], b: &[String]) -> f64 {
    let a = normalize_skills(a);
    let b = normalize_skills(b);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_both_empty_is_zero() {
        let overlap = skill_overlap(&[], &[]);
        assert_eq!(overlap, 0.0);
        assert!(!overlap.is_nan());
    }

    #[test]
    fn test_identical_sets_score_one() {
        let a = skills(&["rust", "sql", "docker"]);
        assert_eq!(skill_overlap(&a, &a), 1.0);
    }

    #[test]
    fn test_symmetric() {
        let a = skills(&["rust", "sql"]);
        let b = skills(&["sql", "python", "go"]);

        assert_eq!(skill_overlap(&a, &b), skill_overlap(&b, &a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = skills(&["rust", "sql"]);
        let b = skills(&["sql", "python", "go"]);

        // intersection {sql} = 1, union {rust, sql, python, go} = 4
        assert_eq!(skill_overlap(&a, &b), 0.25);
    }

    #[test]
    fn test_normalization_ignores_case_and_whitespace() {
        let a = skills(&["  Rust ", "SQL"]);
        let b = skills(&["rust", "sql  "]);

        assert_eq!(skill_overlap(&a, &b), 1.0);
    }

    #[test]
    fn test_duplicates_and_blanks_collapse() {
        let a = skills(&["rust", "Rust", "", "  "]);
        let b = skills(&["rust"]);

        assert_eq!(skill_overlap(&a, &b), 1.0);
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        let a = skills(&["rust"]);
        let b = skills(&["marketing"]);

        assert_eq!(skill_overlap(&a, &b), 0.0);
    }
}
