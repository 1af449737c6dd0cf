//! Training catalog — deficit magnitude → recommended LMS module.

use crate::types::MAX_PROFICIENCY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used when no module is mapped to a deficit magnitude.
pub const TAILORED_PLAN_LABEL: &str = "Tailored Development Plan";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum TrainingRecommendation {
    Module(String),
    /// No catalog entry for this magnitude (beyond the scale, or unmapped).
    TailoredPlan,
}

impl TrainingRecommendation {
    pub fn label(&self) -> &str {
        match self {
            TrainingRecommendation::Module(label) => label,
            TrainingRecommendation::TailoredPlan  => TAILORED_PLAN_LABEL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingCatalog {
    modules: BTreeMap<i64, String>,
}

impl TrainingCatalog {
    pub fn new(modules: BTreeMap<i64, String>) -> Self {
        Self { modules }
    }

    /// Recommend a module for a deficit of `magnitude` points.
    pub fn recommend(&self, magnitude: i64) -> TrainingRecommendation {
        match self.modules.get(&magnitude) {
            Some(label) => TrainingRecommendation::Module(label.clone()),
            None        => TrainingRecommendation::TailoredPlan,
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(bad) = self.modules.keys().find(|k| !(1..=MAX_PROFICIENCY).contains(*k)) {
            anyhow::bail!("training module keyed by deficit {bad}, expected 1..={MAX_PROFICIENCY}");
        }
        Ok(())
    }

    pub fn builtin() -> Self {
        Self::new(
            [
                (1, "Foundation Course (LMS-101)"),
                (2, "Intermediate Workshop (LMS-202)"),
                (3, "Advanced Certification (LMS-303)"),
                (4, "Expert Masterclass (LMS-404)"),
                (5, "External Specialization (LMS-505)"),
            ]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect(),
        )
    }
}
