//! SkillGap core: employee skill roster, role catalogs, and the
//! skill-gap analysis engine.

pub mod config;
pub mod dashboard;
pub mod desk;
pub mod error;
pub mod gap_analysis;
pub mod role_catalog;
pub mod roster;
pub mod store;
pub mod tabular;
pub mod training_catalog;
pub mod types;
