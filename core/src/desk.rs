//! The skill desk — one working session over a persisted roster.
//!
//! The desk owns the store, the catalogs, and the loaded roster.
//!
//! RULES:
//!   - The roster is loaded once, in `open()`.
//!   - Every mutation runs on a working copy. The copy is saved, and only
//!     after a successful save does it replace the live roster.
//!   - Mutations take `&mut self`: read, merge, and write form one critical
//!     section per desk.

use crate::{
    config::CatalogConfig,
    dashboard::{summarize, DashboardSummary},
    error::GapResult,
    gap_analysis::{run_gap_analysis, GapReport},
    roster::{Employee, EmployeeUpdate, Roster, SkillEntryForm},
    store::RosterStore,
    tabular::{self, ImportSummary},
};
use serde::{Deserialize, Serialize};

/// One line of the skills matrix view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub name: String,
    pub designation: Option<String>,
    pub experience: Option<u32>,
    pub skills: Vec<(String, i64)>,
    pub total_skills: usize,
}

impl From<&Employee> for MatrixRow {
    fn from(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            designation: e.designation.clone(),
            experience: e.experience,
            skills: e.skills.iter().map(|(s, l)| (s.clone(), *l)).collect(),
            total_skills: e.skill_count(),
        }
    }
}

pub struct SkillDesk {
    store:   RosterStore,
    catalog: CatalogConfig,
    roster:  Roster,
}

impl SkillDesk {
    /// Load the roster from `store` and start a session.
    pub fn open(store: RosterStore, catalog: CatalogConfig) -> GapResult<Self> {
        let roster = store.load_roster()?;
        log::debug!(
            "Desk opened with {} employees and {} roles",
            roster.len(),
            catalog.roles.len()
        );
        Ok(Self { store, catalog, roster })
    }

    /// In-memory store, built-in catalogs.
    pub fn open_test() -> GapResult<Self> {
        let store = RosterStore::in_memory()?;
        store.migrate()?;
        Self::open(store, CatalogConfig::builtin())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Apply `mutate` to a copy of the roster, persist the copy, then
    /// make it live. On any error the live roster is untouched.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut Roster) -> GapResult<T>) -> GapResult<T> {
        let mut working = self.roster.clone();
        let out = mutate(&mut working)?;
        self.store.save_roster(&working)?;
        self.roster = working;
        Ok(out)
    }

    // ── Mutations ──────────────────────────────────────────────

    pub fn upsert(&mut self, update: EmployeeUpdate) -> GapResult<Employee> {
        self.commit(|roster| Ok(roster.upsert(update).clone()))
    }

    /// Validate the "add skills" form, then merge it.
    pub fn add_skills(&mut self, form: SkillEntryForm) -> GapResult<Employee> {
        let update = form.into_update()?;
        let employee = self.upsert(update)?;
        log::info!(
            "Skills updated for {} ({} total)",
            employee.name,
            employee.skill_count()
        );
        Ok(employee)
    }

    pub fn import_csv(&mut self, text: &str) -> GapResult<ImportSummary> {
        self.commit(|roster| tabular::import_csv(roster, text))
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn export_csv(&self) -> String {
        tabular::export_csv(&self.roster)
    }

    /// The "as-is placement" of one employee.
    pub fn employee_skills(&self, name: &str) -> GapResult<&Employee> {
        self.roster.get(name)
    }

    pub fn skills_matrix(&self) -> Vec<MatrixRow> {
        self.roster.iter().map(MatrixRow::from).collect()
    }

    pub fn team(&self, designation: Option<&str>) -> Vec<&Employee> {
        self.roster.filter_by_designation(designation)
    }

    pub fn designations(&self) -> Vec<&str> {
        self.roster.distinct_designations()
    }

    pub fn target_roles(&self) -> Vec<&str> {
        self.catalog.roles.role_names()
    }

    pub fn run_gap_analysis(
        &self,
        employee: Option<&str>,
        role: Option<&str>,
    ) -> GapResult<GapReport> {
        run_gap_analysis(
            &self.roster,
            &self.catalog.roles,
            &self.catalog.training,
            employee,
            role,
        )
    }

    pub fn dashboard(&self) -> DashboardSummary {
        summarize(&self.roster, &self.catalog.tracked_skills)
    }
}
