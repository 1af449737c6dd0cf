//! Dashboard aggregator tests.

use skillgap_core::{
    config::default_tracked_skills,
    dashboard::{summarize, DashboardSummary},
    roster::{EmployeeUpdate, Roster},
};

#[test]
fn empty_roster_reports_zero_readiness() {
    let summary = summarize(&Roster::new(), &default_tracked_skills());
    assert_eq!(summary.employee_count, 0);
    assert_eq!(summary.total_skills_mapped, 0);
    assert_eq!(summary.readiness_percentage, 0.0);
}

#[test]
fn no_tracked_skills_reports_zero_readiness() {
    let mut roster = Roster::new();
    roster.upsert(EmployeeUpdate::new("Ann").skill("Python", 5));
    let summary = summarize(&roster, &[]);
    assert_eq!(summary.readiness_percentage, 0.0);
    assert_eq!(summary.total_skills_mapped, 1);
}

#[test]
fn readiness_over_tracked_skills() {
    let mut roster = Roster::new();
    roster.upsert(
        EmployeeUpdate::new("Ann")
            .skill("Python", 5)
            .skill("Machine Learning", 4)
            .skill("SQL", 3),
    );
    roster.upsert(EmployeeUpdate::new("Bo").skill("Data Analysis", 3).skill("SQL", 2));

    let summary = summarize(&roster, &default_tracked_skills());
    assert_eq!(summary.employee_count, 2);
    assert_eq!(summary.total_skills_mapped, 5, "shared skills count per employee");
    // (5 + 4 + 3) / (2 * 3 * 5) = 12 / 30
    assert!((summary.readiness_percentage - 40.0).abs() < 1e-9);
    assert_eq!(summary.bar_percent(), "40%");
    assert_eq!(summary.readiness_label(), "40.0% Ready");
}

#[test]
fn tracked_skills_match_exact_case_only() {
    let mut roster = Roster::new();
    roster.upsert(EmployeeUpdate::new("Ann").skill("python", 5));
    let summary = summarize(&roster, &default_tracked_skills());
    assert_eq!(summary.readiness_percentage, 0.0);
}

/// 75 of 120 tracked points: the bar rounds 62.5 up.
#[test]
fn bar_rounds_half_up() {
    let mut roster = Roster::new();
    for i in 0..8 {
        let level = if i < 5 { 5 } else { 0 };
        roster.upsert(
            EmployeeUpdate::new(format!("E{i}"))
                .skill("Python", level)
                .skill("Machine Learning", level)
                .skill("Data Analysis", level),
        );
    }
    let summary = summarize(&roster, &default_tracked_skills());
    assert_eq!(summary.readiness_percentage, 62.5);
    assert_eq!(summary.bar_percent(), "63%");
    assert_eq!(summary.readiness_label(), "62.5% Ready");
}

#[test]
fn label_rounds_half_up() {
    let summary = DashboardSummary {
        employee_count: 80,
        total_skills_mapped: 3,
        readiness_percentage: 0.25,
    };
    assert_eq!(summary.bar_percent(), "0%");
    assert_eq!(summary.readiness_label(), "0.3% Ready");
}

#[test]
fn extreme_proficiencies_do_not_overflow() {
    let mut roster = Roster::new();
    roster.upsert(EmployeeUpdate::new("Max").skill("Python", i64::MAX).skill("Data Analysis", i64::MAX));
    roster.upsert(EmployeeUpdate::new("Min").skill("Python", i64::MIN));

    let summary = summarize(&roster, &default_tracked_skills());
    // MAX + MAX + MIN = MAX - 1 over 30 possible points.
    let expected = (i64::MAX - 1) as f64 * 100.0 / 30.0;
    assert!((summary.readiness_percentage - expected).abs() / expected < 1e-9);
    assert!(summary.bar_percent().ends_with('%'));
}
