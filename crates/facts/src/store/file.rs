//! [`FileConfigStore`]: one YAML document per agent on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::{debug, info, warn};

use super::error::{Result, StoreError};
use super::{ConfigStore, OrchestrationConfig};
use crate::schema::FactDefinition;
use crate::validation::validate_definitions;

/// Filesystem-backed config store.
///
/// Each agent lives in `<dir>/<agent_id>.yml`. Writes go to a dot-prefixed
/// `.tmp` file first and are renamed into place, so a crash mid-write never
/// leaves a truncated config behind.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the config document for `agent_id`.
    pub fn config_path(&self, agent_id: &str) -> Result<PathBuf> {
        check_agent_id(agent_id)?;
        Ok(self.dir.join(format!("{agent_id}.yml")))
    }

    /// Ids of every agent with a stored config, sorted.
    ///
    /// Dotfiles (including in-flight `.tmp` files) and non-YAML files are skipped.
    pub async fn list_agents(&self) -> Result<Vec<String>> {
        let mut agents = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(agents),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "yml" || e == "yaml")
                .unwrap_or(false);
            if is_yaml && check_agent_id(stem).is_ok() {
                agents.push(stem.to_string());
            }
        }

        agents.sort();
        agents.dedup();
        Ok(agents)
    }

    async fn read_config(&self, agent_id: &str) -> Result<OrchestrationConfig> {
        let primary = self.config_path(agent_id)?;
        let fallback = self.dir.join(format!("{agent_id}.yaml"));

        for path in [primary, fallback] {
            match fs::read_to_string(&path).await {
                Ok(contents) => {
                    let config: OrchestrationConfig = serde_yaml::from_str(&contents)?;
                    debug!(
                        agent_id = %agent_id,
                        facts = config.fact_definitions.len(),
                        path = %path.display(),
                        "loaded orchestration config"
                    );
                    return Ok(config);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }

        debug!(agent_id = %agent_id, "no stored orchestration config, starting empty");
        Ok(OrchestrationConfig::default())
    }

    async fn write_config(&self, agent_id: &str, config: &OrchestrationConfig) -> Result<PathBuf> {
        let final_path = self.config_path(agent_id)?;
        let tmp_path = self.dir.join(format!(".{agent_id}.tmp"));

        let yaml = serde_yaml::to_string(config)?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&tmp_path, yaml).await?;
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(final_path)
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self, agent_id: &str) -> Result<OrchestrationConfig> {
        self.read_config(agent_id).await
    }

    async fn replace_fact_definitions(
        &self,
        agent_id: &str,
        defs: Vec<FactDefinition>,
    ) -> Result<OrchestrationConfig> {
        check_agent_id(agent_id)?;

        let report = validate_definitions(&defs);
        if !report.valid {
            warn!(agent_id = %agent_id, errors = report.errors.len(), "refusing to store invalid fact definitions");
            return Err(StoreError::Rejected(report.errors));
        }

        let mut config = self.read_config(agent_id).await?;
        config.fact_definitions = defs;
        config.facts_updated_at = Some(Utc::now());

        let path = self.write_config(agent_id, &config).await?;
        info!(
            agent_id = %agent_id,
            facts = config.fact_definitions.len(),
            path = %path.display(),
            "replaced fact definitions"
        );
        Ok(config)
    }
}

/// Agent ids become file names: letters, digits, `-` and `_` only.
fn check_agent_id(agent_id: &str) -> Result<()> {
    let ok = !agent_id.is_empty()
        && agent_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidAgentId(agent_id.to_string()))
    }
}
