//! Gap analysis engine tests.

use skillgap_core::{
    config::CatalogConfig,
    error::GapError,
    gap_analysis::{
        analyze, readiness_score, run_gap_analysis, GapStatus, ReadinessBand, Recommendation,
        EXCEEDS_LABEL, MEETS_LABEL, SURPLUS_LABEL,
    },
    role_catalog::RoleProfile,
    roster::{Employee, EmployeeUpdate, Roster},
    training_catalog::{TrainingRecommendation, TAILORED_PLAN_LABEL},
};

fn employee(name: &str, skills: &[(&str, i64)]) -> Employee {
    let mut e = Employee::new(name);
    for (skill, level) in skills {
        e.skills.insert(skill.to_string(), *level);
    }
    e
}

/// Ann holds Python at 2 and nothing else the AI Specialist role needs.
#[test]
fn ann_against_ai_specialist() {
    let catalog = CatalogConfig::builtin();
    let role = catalog.roles.get("AI Specialist").unwrap();
    let ann = employee("Ann", &[("Python", 2)]);

    let report = analyze(&ann, role, &catalog.training);

    let summary: Vec<(&str, Option<i64>, &str)> = report
        .rows
        .iter()
        .map(|r| (r.skill.as_str(), r.gap, r.recommendation.label()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Python", Some(-3), "Advanced Certification (LMS-303)"),
            ("Machine Learning", Some(-4), "Expert Masterclass (LMS-404)"),
            ("Statistical Analysis", Some(-4), "Expert Masterclass (LMS-404)"),
            ("Data Structures", Some(-3), "Advanced Certification (LMS-303)"),
        ]
    );
    assert_eq!(report.total_deficit, 14);
    assert_eq!(report.max_deficit_possible, 20);
    assert_eq!(report.skills_to_develop, 4);
    assert!((report.readiness_score - 30.0).abs() < 1e-9);
    assert_eq!(report.headline_score(), 30);
    assert_eq!(report.display_score(), "30.0");
    assert_eq!(report.band(), ReadinessBand::Low);
}

#[test]
fn required_skills_match_case_insensitively() {
    let catalog = CatalogConfig::builtin();
    let role = catalog.roles.get("AI Specialist").unwrap();
    let e = employee("Bo", &[("python", 5)]);

    let report = analyze(&e, role, &catalog.training);

    let python = &report.rows[0];
    assert_eq!(python.skill, "Python");
    assert_eq!(python.current, 5);
    assert_eq!(python.status, GapStatus::Meets);
    assert_eq!(python.recommendation.label(), MEETS_LABEL);
    assert_eq!(report.surplus().count(), 0, "lower-case python is not surplus");
}

/// When two keys fold to the same name, the first in skill order is used.
#[test]
fn first_case_folded_match_wins() {
    let catalog = CatalogConfig::builtin();
    let role = catalog.roles.get("AI Specialist").unwrap();
    let e = employee("Cy", &[("PYTHON", 1), ("python", 5)]);

    let report = analyze(&e, role, &catalog.training);
    assert_eq!(report.rows[0].current, 1);
    assert_eq!(report.rows[0].gap, Some(-4));
}

#[test]
fn rows_are_required_then_surplus() {
    let catalog = CatalogConfig::builtin();
    let role = catalog.roles.get("AI Specialist").unwrap();
    let e = employee(
        "Dee",
        &[("Figma", 4), ("Machine Learning", 5), ("Rust", 3), ("Python", 5)],
    );

    let report = analyze(&e, role, &catalog.training);

    let order: Vec<(&str, GapStatus)> =
        report.rows.iter().map(|r| (r.skill.as_str(), r.status)).collect();
    assert_eq!(
        order,
        vec![
            ("Python", GapStatus::Meets),
            ("Machine Learning", GapStatus::Exceeds),
            ("Statistical Analysis", GapStatus::Deficit),
            ("Data Structures", GapStatus::Deficit),
            ("Figma", GapStatus::Surplus),
            ("Rust", GapStatus::Surplus),
        ]
    );
    assert_eq!(report.rows[1].recommendation.label(), EXCEEDS_LABEL);

    let figma = &report.rows[4];
    assert_eq!(figma.required, None);
    assert_eq!(figma.gap, None);
    assert_eq!(figma.current, 4);
    assert_eq!(figma.recommendation, Recommendation::ValueAdd);
    assert_eq!(figma.recommendation.label(), SURPLUS_LABEL);
}

#[test]
fn one_row_per_requirement_plus_one_per_unmatched_skill() {
    let catalog = CatalogConfig::builtin();
    let holdings: &[&[(&str, i64)]] = &[
        &[],
        &[("Python", 3)],
        &[("figma", 2), ("Leadership", 5), ("Budgeting", 1)],
        &[("JavaScript", 5), ("react", 5), ("Cooking", 9)],
    ];
    for profile in catalog.roles.profiles() {
        for skills in holdings {
            let e = employee("E", skills);
            let report = analyze(&e, profile, &catalog.training);
            let unmatched = skills
                .iter()
                .filter(|(s, _)| {
                    !profile
                        .required_skills
                        .keys()
                        .any(|r| r.to_lowercase() == s.to_lowercase())
                })
                .count();
            assert_eq!(report.rows.len(), profile.required_skills.len() + unmatched);
            assert!((0.0..=100.0).contains(&report.readiness_score));
        }
    }
}

/// A deficit larger than the catalog covers gets the tailored plan.
#[test]
fn out_of_range_proficiency_falls_back_to_tailored_plan() {
    let catalog = CatalogConfig::builtin();
    let role = RoleProfile::new("Custom", &[("Welding", 5)]);
    let e = employee("Ed", &[("Welding", -2)]);

    let report = analyze(&e, &role, &catalog.training);
    let row = &report.rows[0];
    assert_eq!(row.gap, Some(-7));
    assert_eq!(
        row.recommendation,
        Recommendation::Training(TrainingRecommendation::TailoredPlan)
    );
    assert_eq!(row.recommendation.label(), TAILORED_PLAN_LABEL);
    assert_eq!(report.total_deficit, 7);
    assert_eq!(report.readiness_score, 0.0, "score is floored at zero");
}

#[test]
fn role_without_requirements_scores_full_readiness() {
    let catalog = CatalogConfig::builtin();
    let role = RoleProfile::new("Generalist", &[]);
    let e = employee("Flo", &[("Python", 1)]);

    let report = analyze(&e, &role, &catalog.training);
    assert_eq!(report.readiness_score, 100.0);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.band(), ReadinessBand::High);
}

#[test]
fn readiness_bands() {
    assert_eq!(ReadinessBand::for_score(49.9), ReadinessBand::Low);
    assert_eq!(ReadinessBand::for_score(50.0), ReadinessBand::Medium);
    assert_eq!(ReadinessBand::for_score(84.9), ReadinessBand::Medium);
    assert_eq!(ReadinessBand::for_score(85.0), ReadinessBand::High);
    assert_eq!(ReadinessBand::Low.color(), "#DC2626");
    assert_eq!(ReadinessBand::High.color(), "#059669");
}

#[test]
fn readiness_score_formula() {
    assert_eq!(readiness_score(0, 0), 100.0);
    assert_eq!(readiness_score(0, 25), 100.0);
    assert!((readiness_score(5, 25) - 80.0).abs() < 1e-9);
    assert_eq!(readiness_score(40, 25), 0.0);
}

#[test]
fn incomplete_selection_is_reported_before_lookup() {
    let catalog = CatalogConfig::builtin();
    let roster = Roster::new();

    for (employee, role) in [
        (None, Some("AI Specialist")),
        (Some("Ann"), None),
        (Some("  "), Some("Nonexistent Role")),
        (None, None),
    ] {
        let err = run_gap_analysis(&roster, &catalog.roles, &catalog.training, employee, role)
            .unwrap_err();
        assert!(
            matches!(err, GapError::InputIncomplete(_)),
            "expected InputIncomplete for {employee:?}/{role:?}, got {err:?}"
        );
    }
}

#[test]
fn unknown_role_and_unknown_employee_are_distinct_errors() {
    let catalog = CatalogConfig::builtin();
    let mut roster = Roster::new();
    roster.upsert(EmployeeUpdate::new("Ann").skill("Python", 2));

    let err = run_gap_analysis(
        &roster,
        &catalog.roles,
        &catalog.training,
        Some("Ann"),
        Some("Astronaut"),
    )
    .unwrap_err();
    assert!(matches!(err, GapError::RoleNotFound { .. }));

    let err = run_gap_analysis(
        &roster,
        &catalog.roles,
        &catalog.training,
        Some("Zed"),
        Some("AI Specialist"),
    )
    .unwrap_err();
    assert!(matches!(err, GapError::EmployeeNotFound { ref name } if name == "Zed"));
    assert!(err.is_user_facing());

    let report = run_gap_analysis(
        &roster,
        &catalog.roles,
        &catalog.training,
        Some("Ann"),
        Some("AI Specialist"),
    )
    .unwrap();
    assert_eq!(report.employee, "Ann");
    assert_eq!(report.total_deficit, 14);
}

/// Extreme stored proficiencies saturate instead of overflowing.
#[test]
fn extreme_proficiencies_do_not_overflow() {
    let catalog = CatalogConfig::builtin();
    let role = catalog.roles.get("AI Specialist").unwrap();

    let low = employee("Min", &[("Python", i64::MIN)]);
    let report = analyze(&low, role, &catalog.training);
    assert_eq!(report.rows[0].gap, Some(i64::MIN));
    assert_eq!(report.rows[0].status, GapStatus::Deficit);
    assert_eq!(
        report.rows[0].recommendation,
        Recommendation::Training(TrainingRecommendation::TailoredPlan)
    );
    assert_eq!(report.total_deficit, i64::MAX);
    assert_eq!(report.readiness_score, 0.0);
    assert_eq!(report.band(), ReadinessBand::Low);

    let high = employee("Max", &[("Python", i64::MAX), ("Welding", i64::MIN)]);
    let report = analyze(&high, role, &catalog.training);
    assert_eq!(report.rows[0].gap, Some(i64::MAX - 5));
    assert_eq!(report.rows[0].status, GapStatus::Exceeds);
    assert_eq!(report.total_deficit, 11);
    assert_eq!(report.rows.len(), 5);
    assert_eq!(report.rows[4].current, i64::MIN);
}

/// Halves round away from zero for both the headline and the detail.
#[test]
fn score_ties_round_half_up() {
    let catalog = CatalogConfig::builtin();
    let skills = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let required: Vec<(&str, i64)> = skills.iter().map(|s| (*s, 5)).collect();
    let role = RoleProfile::new("Generalist", &required);
    // Three skills missing: deficit 15 of 40.
    let held: Vec<(&str, i64)> = skills[3..].iter().map(|s| (*s, 5)).collect();
    let e = employee("Cy", &held);

    let mut report = analyze(&e, &role, &catalog.training);
    assert_eq!(report.total_deficit, 15);
    assert_eq!(report.readiness_score, 62.5);
    assert_eq!(report.headline_score(), 63);
    assert_eq!(report.display_score(), "62.5");

    report.readiness_score = 0.25;
    assert_eq!(report.display_score(), "0.3");
}
