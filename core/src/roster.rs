//! Employee roster — the in-memory set of employees and their skill maps.
//!
//! RULE: `name` is the only identity key. At most one employee per name,
//! compared case-sensitively. Roster order is the order employees were
//! first added and never changes afterwards.

use crate::{
    error::{GapError, GapResult},
    types::{EmployeeName, Proficiency, SkillMap},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: EmployeeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default)]
    pub skills: SkillMap,
}

impl Employee {
    pub fn new(name: impl Into<EmployeeName>) -> Self {
        Self {
            name: name.into(),
            designation: None,
            experience: None,
            skills: SkillMap::new(),
        }
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Exact-case lookup.
    pub fn proficiency(&self, skill: &str) -> Option<Proficiency> {
        self.skills.get(skill).copied()
    }

    /// Case-insensitive lookup. When several keys fold to the same name,
    /// the first in skill-map order wins.
    pub fn proficiency_ignore_case(&self, skill: &str) -> Option<Proficiency> {
        let wanted = skill.to_lowercase();
        self.skills
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, level)| *level)
    }
}

/// A merge-insert request for one employee.
///
/// `None` fields mean "leave as is". An empty designation is treated
/// the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: EmployeeName,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub skills: SkillMap,
}

impl EmployeeUpdate {
    pub fn new(name: impl Into<EmployeeName>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    pub fn experience(mut self, years: u32) -> Self {
        self.experience = Some(years);
        self
    }

    pub fn skill(mut self, skill: impl Into<String>, level: Proficiency) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }
}

/// Raw "add skills" form input, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntryForm {
    pub name: String,
    pub designation: String,
    pub experience: String,
    /// Comma-separated skill names.
    pub skill_names: String,
    /// One proficiency applied to every listed skill.
    pub proficiency: String,
}

impl SkillEntryForm {
    /// Validate the form and turn it into a merge request.
    ///
    /// Fails with `InputIncomplete` when the name or every skill name is
    /// blank, and with `InvalidNumericInput` when the proficiency is not an
    /// integer. A malformed experience value is dropped, not rejected.
    pub fn into_update(self) -> GapResult<EmployeeUpdate> {
        let name = self.name.trim();
        let skill_names = split_skill_names(&self.skill_names);
        if name.is_empty() || skill_names.is_empty() {
            return Err(GapError::InputIncomplete(
                "Please enter both employee name and at least one skill name.".into(),
            ));
        }

        let proficiency = parse_proficiency(&self.proficiency)?;
        let designation = self.designation.trim();

        Ok(EmployeeUpdate {
            name: name.to_string(),
            designation: (!designation.is_empty()).then(|| designation.to_string()),
            experience: parse_experience(&self.experience),
            skills: skill_names.into_iter().map(|s| (s, proficiency)).collect(),
        })
    }
}

/// Split a comma-separated skill list, trimming each segment and dropping
/// the empty ones.
pub fn split_skill_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Years of experience; `None` ("no change") unless a non-negative integer.
pub fn parse_experience(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// Strict proficiency parse. Out-of-range integers are accepted as-is.
pub fn parse_proficiency(input: &str) -> GapResult<Proficiency> {
    input
        .trim()
        .parse()
        .map_err(|_| GapError::InvalidNumericInput {
            field: "proficiency",
            value: input.to_string(),
        })
}

/// The ordered, name-keyed employee roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Employee>", into = "Vec<Employee>")]
pub struct Roster {
    employees: IndexMap<EmployeeName, Employee>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Employee> {
        self.employees.get(name)
    }

    /// Like `find_by_name`, but absence is an error.
    pub fn get(&self, name: &str) -> GapResult<&Employee> {
        self.find_by_name(name).ok_or_else(|| GapError::EmployeeNotFound {
            name: name.to_string(),
        })
    }

    /// Insert a new employee or merge into the existing one.
    ///
    /// Existing designation is replaced only by a non-empty value, existing
    /// experience only by a parsed value. Skill levels are replaced per key,
    /// never accumulated.
    pub fn upsert(&mut self, update: EmployeeUpdate) -> &Employee {
        let EmployeeUpdate { name, designation, experience, skills } = update;
        let designation = designation.filter(|d| !d.is_empty());

        let employee = self.employees.entry(name).or_insert_with_key(|name| {
            log::debug!("Adding employee '{name}' to roster");
            Employee::new(name.clone())
        });
        if designation.is_some() {
            employee.designation = designation;
        }
        if experience.is_some() {
            employee.experience = experience;
        }
        for (skill, level) in skills {
            employee.skills.insert(skill, level);
        }
        employee
    }

    /// Non-empty designations in first-seen order, without duplicates.
    pub fn distinct_designations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for designation in self.iter().filter_map(|e| e.designation.as_deref()) {
            if !designation.is_empty() && !seen.contains(&designation) {
                seen.push(designation);
            }
        }
        seen
    }

    /// The whole roster for `None`/empty, else the exact-match subset.
    pub fn filter_by_designation(&self, designation: Option<&str>) -> Vec<&Employee> {
        match designation.filter(|d| !d.is_empty()) {
            None => self.iter().collect(),
            Some(wanted) => self
                .iter()
                .filter(|e| e.designation.as_deref() == Some(wanted))
                .collect(),
        }
    }

    /// Every distinct skill name across the roster, first-seen order.
    pub fn distinct_skills(&self) -> Vec<&str> {
        let mut skills: IndexMap<&str, ()> = IndexMap::new();
        for employee in self.iter() {
            for skill in employee.skills.keys() {
                skills.entry(skill.as_str()).or_insert(());
            }
        }
        skills.into_keys().collect()
    }
}

impl From<Vec<Employee>> for Roster {
    /// Duplicate names collapse into the first position; later records
    /// merge over earlier ones.
    fn from(records: Vec<Employee>) -> Self {
        let mut roster = Roster::new();
        for e in records {
            roster.upsert(EmployeeUpdate {
                name: e.name,
                designation: e.designation,
                experience: e.experience,
                skills: e.skills,
            });
        }
        roster
    }
}

impl From<Roster> for Vec<Employee> {
    fn from(roster: Roster) -> Self {
        roster.employees.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Employee;
    type IntoIter = indexmap::map::Values<'a, EmployeeName, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.values()
    }
}
