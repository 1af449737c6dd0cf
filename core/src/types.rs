//! Shared primitive types used across the crate.

use indexmap::IndexMap;

/// A proficiency rating. Conventionally 1 (novice) to 5 (expert), but
/// stored values are never clamped.
pub type Proficiency = i64;

/// Skill name → proficiency, in insertion order.
pub type SkillMap = IndexMap<String, Proficiency>;

/// The identity key of an employee within a roster.
pub type EmployeeName = String;

/// Highest conventional proficiency level.
pub const MAX_PROFICIENCY: Proficiency = 5;
