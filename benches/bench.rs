// Criterion benchmarks for the mentor matching core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use disha_algo::core::{location_tier, skill_overlap, DerivedPreferences, Matcher};
use disha_algo::models::{Location, MenteeProfile, MentorProfile};

fn location(state: &str, district: Option<&str>, college: Option<&str>) -> Location {
    Location {
        state: Some(state.to_string()),
        district: district.map(str::to_string),
        college: college.map(str::to_string),
    }
}

fn create_mentee() -> MenteeProfile {
    MenteeProfile {
        user_id: "mentee".to_string(),
        name: "Priya".to_string(),
        headline: None,
        bio: None,
        skills: vec!["rust".to_string(), "sql".to_string(), "docker".to_string()],
        location: location("Karnataka", Some("Mysuru"), Some("NIE")),
    }
}

fn create_mentor(id: usize) -> MentorProfile {
    let district = if id % 3 == 0 { Some("Mysuru") } else { None };
    let college = if id % 9 == 0 { Some("NIE") } else { None };

    MentorProfile {
        user_id: id.to_string(),
        name: format!("Mentor {}", id),
        headline: None,
        skills: vec![
            "rust".to_string(),
            format!("skill-{}", id % 7),
            format!("skill-{}", id % 11),
        ],
        location: location("Karnataka", district, college),
        total_experience_years: 1 + (id % 15) as u32,
        available_to_mentor: true,
    }
}

fn bench_skill_overlap(c: &mut Criterion) {
    let a: Vec<String> = (0..10).map(|i| format!("skill-{}", i)).collect();
    let b: Vec<String> = (5..15).map(|i| format!("skill-{}", i)).collect();

    c.bench_function("skill_overlap", |bench| {
        bench.iter(|| skill_overlap(black_box(&a), black_box(&b)));
    });
}

fn bench_location_tier(c: &mut Criterion) {
    let mentee = location("Karnataka", Some("Mysuru"), Some("NIE"));
    let mentor = location("Karnataka", Some("Mysuru"), Some("SJCE"));

    c.bench_function("location_tier", |bench| {
        bench.iter(|| location_tier(black_box(&mentee), black_box(&mentor)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let mentee = create_mentee();
    let prefs = DerivedPreferences::default();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<_> = (0..*candidate_count)
            .map(|i| matcher.evaluate(&mentee, create_mentor(i)))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |bench, _| {
                bench.iter(|| {
                    matcher.rank(
                        black_box(&prefs),
                        black_box(candidates.clone()),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_evaluation_pipeline(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let mentee = create_mentee();
    let mentors: Vec<MentorProfile> = (0..100).map(create_mentor).collect();

    c.bench_function("evaluate_100_candidates", |bench| {
        bench.iter(|| {
            let candidates: Vec<_> = mentors
                .iter()
                .map(|m| matcher.evaluate(black_box(&mentee), m.clone()))
                .collect();
            black_box(candidates)
        });
    });
}

criterion_group!(
    benches,
    bench_skill_overlap,
    bench_location_tier,
    bench_ranking,
    bench_evaluation_pipeline
);

criterion_main!(benches);
