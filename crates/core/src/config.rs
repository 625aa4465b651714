use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FactdefError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Key lookup used to resolve config. Production reads the process env.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt(lookup: Lookup<'_>, profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        if let Some(v) = lookup(&format!("{}_{}", profile, key)) {
            return Some(v);
        }
    }
    lookup(key)
}

fn profiled_or(lookup: Lookup<'_>, profile: &str, key: &str, default: &str) -> String {
    profiled_opt(lookup, profile, key).unwrap_or_else(|| default.to_string())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FACTDEF_PROFILE`. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_opt("FACTDEF_PROFILE").unwrap_or_default();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        Self::resolve(profile, &env_opt)
    }

    /// Build config for `profile` from an arbitrary key lookup.
    pub fn resolve(profile: &str, lookup: Lookup<'_>) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            storage: StorageConfig::resolve(lookup, p),
            log: LogConfig::resolve(lookup, p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject settings no command can work with. Touches nothing on disk.
    pub fn validate(&self) -> Result<()> {
        if self.storage.agents_dir.as_os_str().is_empty() {
            return Err(FactdefError::Config(
                "FACTDEF_AGENTS_DIR must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  storage:     data_dir={}", self.storage.data_dir.display());
        tracing::info!("  agents:      dir={}", self.storage.agents_dir.display());
        tracing::info!("  log:         filter={}", self.log.filter);
    }

    /// Return a view safe for printing to operators.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "storage": {
                "data_dir": self.storage.data_dir,
                "agents_dir": self.storage.agents_dir,
            },
            "log": { "filter": self.log.filter },
        })
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Directory holding one orchestration config document per agent.
    pub agents_dir: PathBuf,
}

impl StorageConfig {
    fn resolve(lookup: Lookup<'_>, p: &str) -> Self {
        let data_dir = PathBuf::from(profiled_or(lookup, p, "FACTDEF_DATA_DIR", "data"));
        let agents_dir = profiled_opt(lookup, p, "FACTDEF_AGENTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("agents"));
        Self {
            data_dir,
            agents_dir,
        }
    }
}

// ── Logging ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl LogConfig {
    fn resolve(lookup: Lookup<'_>, p: &str) -> Self {
        Self {
            filter: profiled_or(lookup, p, "FACTDEF_LOG", "warn"),
        }
    }
}
