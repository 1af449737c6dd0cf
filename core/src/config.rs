use crate::{
    role_catalog::{RoleCatalog, RoleProfile},
    training_catalog::TrainingCatalog,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct RolesFile {
    roles: Vec<RoleProfile>,
}

#[derive(Debug, Clone, Deserialize)]
struct TrackedSkillsFile {
    tracked_skills: Vec<String>,
}

/// Skills the dashboard readiness bar is computed over.
pub fn default_tracked_skills() -> Vec<String> {
    ["Python", "Machine Learning", "Data Analysis"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Static reference data: roles, training modules, dashboard skills.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub roles: RoleCatalog,
    pub training: TrainingCatalog,
    pub tracked_skills: Vec<String>,
}

impl CatalogConfig {
    /// Load from a data directory laid out like `data/`.
    /// Without a data directory, use CatalogConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let roles_path = format!("{data_dir}/catalog/roles.json");
        let roles_content = std::fs::read_to_string(&roles_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {roles_path}: {e}"))?;
        let roles_file: RolesFile = serde_json::from_str(&roles_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {roles_path}: {e}"))?;
        let roles = RoleCatalog::from_profiles(roles_file.roles);
        roles.validate()?;

        let training_path = format!("{data_dir}/catalog/training_modules.json");
        let training_content = std::fs::read_to_string(&training_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {training_path}: {e}"))?;
        let training: TrainingCatalog = serde_json::from_str(&training_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {training_path}: {e}"))?;
        training.validate()?;

        let tracked_path = format!("{data_dir}/dashboard/tracked_skills.json");
        let tracked_skills = match std::fs::read_to_string(&tracked_path) {
            Ok(content) => {
                let file: TrackedSkillsFile = serde_json::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Cannot parse {tracked_path}: {e}"))?;
                file.tracked_skills
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{tracked_path} missing, using default tracked skills");
                default_tracked_skills()
            }
            Err(e) => anyhow::bail!("Cannot read {tracked_path}: {e}"),
        };

        log::debug!(
            "Loaded {} roles and {} training modules from {data_dir}",
            roles.len(),
            training.len()
        );
        Ok(Self { roles, training, tracked_skills })
    }

    /// Catalogs compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            roles: RoleCatalog::builtin(),
            training: TrainingCatalog::builtin(),
            tracked_skills: default_tracked_skills(),
        }
    }
}
