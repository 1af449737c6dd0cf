//! Roster-wide readiness summary.
//!
//! Tracked skills are matched exact-case, unlike gap analysis which folds
//! case. Both behaviours are kept as they are.

use crate::{gap_analysis::one_decimal, roster::Roster, types::MAX_PROFICIENCY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub employee_count: usize,
    pub total_skills_mapped: usize,
    /// 0.0 ..= 100.0 for on-scale data.
    pub readiness_percentage: f64,
}

impl DashboardSummary {
    /// Width of the readiness bar, whole percent. Halves round up.
    pub fn bar_percent(&self) -> String {
        format!("{:.0}%", self.readiness_percentage.round())
    }

    pub fn readiness_label(&self) -> String {
        format!("{}% Ready", one_decimal(self.readiness_percentage))
    }
}

pub fn summarize(roster: &Roster, tracked_skills: &[String]) -> DashboardSummary {
    let employee_count = roster.len();
    let total_skills_mapped = roster.iter().map(|e| e.skill_count()).sum();

    let possible = employee_count as i128 * tracked_skills.len() as i128 * MAX_PROFICIENCY as i128;
    // i128 so extreme proficiencies cannot overflow the sum.
    let current: i128 = roster
        .iter()
        .flat_map(|e| tracked_skills.iter().map(move |s| e.proficiency(s).unwrap_or(0)))
        .map(i128::from)
        .sum();

    let readiness_percentage = if possible > 0 {
        current as f64 * 100.0 / possible as f64
    } else {
        0.0
    };

    DashboardSummary { employee_count, total_skills_mapped, readiness_percentage }
}
