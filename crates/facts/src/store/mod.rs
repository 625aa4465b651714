//! Persistence of an agent's orchestration config.
//!
//! The fact definition list is only ever replaced wholesale: a save either
//! writes the complete new list or fails and leaves the previous document
//! authoritative.

mod error;
mod file;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::FactDefinition;

pub use self::error::{Result, StoreError};
pub use self::file::FileConfigStore;

/// An agent's orchestration config as far as this crate is concerned.
///
/// Keys other than the fact definitions belong to the orchestrator and are
/// carried through saves untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    #[serde(default)]
    pub fact_definitions: Vec<FactDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts_updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

/// Backing store for agent orchestration configs.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load an agent's config. An agent with nothing stored yet yields an
    /// empty config.
    async fn load(&self, agent_id: &str) -> Result<OrchestrationConfig>;

    /// Replace the agent's fact definition list in a single round trip and
    /// return the config as stored.
    async fn replace_fact_definitions(
        &self,
        agent_id: &str,
        defs: Vec<FactDefinition>,
    ) -> Result<OrchestrationConfig>;
}
