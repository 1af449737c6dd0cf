//! Skill gap analysis — one employee against one target role.
//!
//! Row order is part of the contract:
//!   1. every required skill, in the role's declared order
//!   2. every surplus skill, in the employee's skill-map order
//!
//! Required skills are matched case-insensitively. A required skill the
//! employee does not hold counts as proficiency 0.

use crate::{
    error::{GapError, GapResult},
    role_catalog::{RoleCatalog, RoleProfile},
    roster::{Employee, Roster},
    training_catalog::{TrainingCatalog, TrainingRecommendation},
    types::Proficiency,
};
use serde::{Deserialize, Serialize};

pub const MEETS_LABEL: &str = "Meets or Exceeds Requirement";
pub const EXCEEDS_LABEL: &str = "Potential Mentor / Exceeds Role Requirement";
pub const SURPLUS_LABEL: &str = "Value-add skill, consider for special projects or other roles.";

/// Score at or above which readiness is reported as high.
pub const HIGH_READINESS_THRESHOLD: f64 = 85.0;
/// Score below which readiness is reported as low.
pub const LOW_READINESS_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    Deficit,
    Meets,
    Exceeds,
    /// Held by the employee, not required by the role.
    Surplus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Recommendation {
    Training(TrainingRecommendation),
    MeetsRequirement,
    PotentialMentor,
    ValueAdd,
}

impl Recommendation {
    pub fn label(&self) -> &str {
        match self {
            Recommendation::Training(t)        => t.label(),
            Recommendation::MeetsRequirement   => MEETS_LABEL,
            Recommendation::PotentialMentor    => EXCEEDS_LABEL,
            Recommendation::ValueAdd           => SURPLUS_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapRow {
    /// Role's spelling for required rows, employee's spelling for surplus rows.
    pub skill: String,
    /// `None` on surplus rows.
    pub required: Option<Proficiency>,
    pub current: Proficiency,
    /// `current - required`; `None` on surplus rows.
    pub gap: Option<i64>,
    pub status: GapStatus,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    Low,
    Medium,
    High,
}

impl ReadinessBand {
    pub fn for_score(score: f64) -> Self {
        if score < LOW_READINESS_THRESHOLD {
            ReadinessBand::Low
        } else if score < HIGH_READINESS_THRESHOLD {
            ReadinessBand::Medium
        } else {
            ReadinessBand::High
        }
    }

    /// Display colour for the band.
    pub fn color(&self) -> &'static str {
        match self {
            ReadinessBand::Low    => "#DC2626",
            ReadinessBand::Medium => "#F59E0B",
            ReadinessBand::High   => "#059669",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub employee: String,
    pub role: String,
    pub rows: Vec<GapRow>,
    /// 0.0 ..= 100.0
    pub readiness_score: f64,
    pub skills_to_develop: usize,
    pub total_deficit: i64,
    pub max_deficit_possible: i64,
}

impl GapReport {
    /// Integer headline score, e.g. "30/100".
    pub fn headline_score(&self) -> i64 {
        self.readiness_score.round() as i64
    }

    /// One-decimal score for detailed display.
    pub fn display_score(&self) -> String {
        one_decimal(self.readiness_score)
    }

    pub fn band(&self) -> ReadinessBand {
        ReadinessBand::for_score(self.readiness_score)
    }

    pub fn surplus(&self) -> impl Iterator<Item = &GapRow> {
        self.rows.iter().filter(|r| r.status == GapStatus::Surplus)
    }
}

/// Format with one decimal, halves rounded away from zero.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Readiness from accumulated deficit: 100 when nothing is required,
/// otherwise the share of deficit points avoided, floored at 0.
pub fn readiness_score(total_deficit: i64, max_deficit_possible: i64) -> f64 {
    if max_deficit_possible <= 0 {
        return 100.0;
    }
    let lost = total_deficit as f64 * 100.0 / max_deficit_possible as f64;
    (100.0 - lost).clamp(0.0, 100.0)
}

/// Compare `employee` against `role`.
pub fn analyze(employee: &Employee, role: &RoleProfile, training: &TrainingCatalog) -> GapReport {
    let mut rows = Vec::with_capacity(role.required_skills.len() + employee.skills.len());
    let mut total_deficit = 0i64;
    let mut skills_to_develop = 0usize;

    for (skill, &required) in &role.required_skills {
        let current = employee.proficiency_ignore_case(skill).unwrap_or(0);
        // Proficiencies are unclamped; saturate instead of overflowing.
        let gap = current.saturating_sub(required);

        let (status, recommendation) = if gap < 0 {
            let magnitude = gap.saturating_abs();
            total_deficit = total_deficit.saturating_add(magnitude);
            skills_to_develop += 1;
            (GapStatus::Deficit, Recommendation::Training(training.recommend(magnitude)))
        } else if gap > 0 {
            (GapStatus::Exceeds, Recommendation::PotentialMentor)
        } else {
            (GapStatus::Meets, Recommendation::MeetsRequirement)
        };

        rows.push(GapRow {
            skill: skill.clone(),
            required: Some(required),
            current,
            gap: Some(gap),
            status,
            recommendation,
        });
    }

    let required_lower: Vec<String> = role
        .required_skills
        .keys()
        .map(|s| s.to_lowercase())
        .collect();
    for (skill, &current) in &employee.skills {
        if !required_lower.contains(&skill.to_lowercase()) {
            rows.push(GapRow {
                skill: skill.clone(),
                required: None,
                current,
                gap: None,
                status: GapStatus::Surplus,
                recommendation: Recommendation::ValueAdd,
            });
        }
    }

    let max_deficit_possible = role.max_deficit_possible();
    let report = GapReport {
        employee: employee.name.clone(),
        role: role.role.clone(),
        rows,
        readiness_score: readiness_score(total_deficit, max_deficit_possible),
        skills_to_develop,
        total_deficit,
        max_deficit_possible,
    };
    log::debug!(
        "Gap analysis {} -> {}: deficit {}/{} score {:.1}",
        report.employee,
        report.role,
        report.total_deficit,
        report.max_deficit_possible,
        report.readiness_score
    );
    report
}

/// Resolve a selection and run the analysis.
///
/// A blank or missing selection is `InputIncomplete` and is reported before
/// any lookup. The role is resolved before the employee.
pub fn run_gap_analysis(
    roster: &Roster,
    roles: &RoleCatalog,
    training: &TrainingCatalog,
    employee: Option<&str>,
    role: Option<&str>,
) -> GapResult<GapReport> {
    let employee = employee.map(str::trim).filter(|s| !s.is_empty());
    let role = role.map(str::trim).filter(|s| !s.is_empty());
    let (Some(employee), Some(role)) = (employee, role) else {
        return Err(GapError::InputIncomplete(
            "Please select both an employee and an aspired role to run the analysis.".into(),
        ));
    };

    let profile = roles.get(role)?;
    let employee = roster.get(employee)?;
    Ok(analyze(employee, profile, training))
}
