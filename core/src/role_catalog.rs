//! Role catalog — the aspirational roles an employee can be measured against.
//!
//! Read-only reference data. Each role carries an ordered required-skills
//! profile; the declared order is the row order of every gap report.

use crate::{
    error::{GapError, GapResult},
    types::{Proficiency, SkillMap, MAX_PROFICIENCY},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: String,
    pub required_skills: SkillMap,
}

impl RoleProfile {
    pub fn new(role: impl Into<String>, required: &[(&str, Proficiency)]) -> Self {
        Self {
            role: role.into(),
            required_skills: required
                .iter()
                .map(|(skill, level)| (skill.to_string(), *level))
                .collect(),
        }
    }

    /// Worst-case deficit: every required skill missing entirely.
    pub fn max_deficit_possible(&self) -> i64 {
        self.required_skills.len() as i64 * MAX_PROFICIENCY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: IndexMap<String, RoleProfile>,
}

impl RoleCatalog {
    pub fn from_profiles(profiles: Vec<RoleProfile>) -> Self {
        Self {
            roles: profiles.into_iter().map(|p| (p.role.clone(), p)).collect(),
        }
    }

    /// Look up a role by exact name.
    pub fn get(&self, role: &str) -> GapResult<&RoleProfile> {
        self.roles.get(role).ok_or_else(|| GapError::RoleNotFound {
            role: role.to_string(),
        })
    }

    /// Role names sorted alphabetically, for selection menus.
    pub fn role_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn profiles(&self) -> impl Iterator<Item = &RoleProfile> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Every required level must sit on the 1..=5 scale.
    pub fn validate(&self) -> anyhow::Result<()> {
        for profile in self.roles.values() {
            for (skill, level) in &profile.required_skills {
                if !(1..=MAX_PROFICIENCY).contains(level) {
                    anyhow::bail!(
                        "role '{}' requires '{skill}' at level {level}, expected 1..={MAX_PROFICIENCY}",
                        profile.role
                    );
                }
            }
        }
        Ok(())
    }

    /// The roles shipped with the application.
    pub fn builtin() -> Self {
        Self::from_profiles(vec![
            RoleProfile::new(
                "Senior Software Engineer",
                &[
                    ("JavaScript", 5),
                    ("React", 5),
                    ("Node.js", 4),
                    ("Cloud Computing", 3),
                    ("Data Structures", 4),
                ],
            ),
            RoleProfile::new(
                "Team Lead",
                &[
                    ("Project Management", 5),
                    ("Communication", 4),
                    ("Mentorship", 4),
                    ("Node.js", 3),
                    ("Agile Methodology", 5),
                ],
            ),
            RoleProfile::new(
                "UX Designer",
                &[
                    ("Figma", 5),
                    ("User Research", 4),
                    ("Prototyping", 5),
                    ("HTML/CSS", 3),
                    ("Visual Design", 4),
                ],
            ),
            RoleProfile::new(
                "AI Specialist",
                &[
                    ("Python", 5),
                    ("Machine Learning", 4),
                    ("Statistical Analysis", 4),
                    ("Data Structures", 3),
                ],
            ),
            RoleProfile::new(
                "Sr. Manager",
                &[
                    ("Project Management", 5),
                    ("Communication", 5),
                    ("Leadership", 4),
                    ("Strategic Planning", 4),
                    ("Budgeting", 3),
                ],
            ),
        ])
    }
}
