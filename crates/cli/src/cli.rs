use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use factdef_core::Config;

/// Validate, explain and save agent fact definitions.
///
/// Fact files are YAML or JSON: either a list of definitions or an
/// orchestration config mapping with a `fact_definitions` list.
#[derive(Parser, Debug)]
#[command(name = "factdef", version, about = "Fact definition tooling for agent orchestration configs")]
pub struct CliArgs {
    /// Directory holding one orchestration config per agent. Overrides
    /// `FACTDEF_AGENTS_DIR` and its profiled variant.
    #[arg(long, global = true)]
    pub agents_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    /// Apply command-line overrides on top of the env-derived config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.agents_dir {
            config.storage.agents_dir = dir.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a rule set file (shape, duplicates, references, cycles)
    Validate {
        /// Path to a YAML or JSON rule set
        file: PathBuf,
    },
    /// Print a plain-language explanation of every rule in a file
    Explain {
        /// Path to a YAML or JSON rule set
        file: PathBuf,
    },
    /// List the built-in core facts
    CoreFacts,
    /// List agents with a stored config
    Agents,
    /// Show an agent's stored fact definitions
    Show {
        /// Agent id
        #[arg(long)]
        agent: String,
    },
    /// Replace an agent's fact definitions with the contents of a file
    Save {
        /// Agent id
        #[arg(long)]
        agent: String,
        /// Path to a YAML or JSON rule set
        file: PathBuf,
    },
    /// Print the resolved configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn staging_config() -> Config {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STAGING_FACTDEF_AGENTS_DIR", "/srv/staging/agents"),
            ("FACTDEF_AGENTS_DIR", "/srv/plain/agents"),
        ]);
        Config::resolve("staging", &|key: &str| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn profiled_agents_dir_survives_without_flag() {
        std::env::set_var("FACTDEF_AGENTS_DIR", "/srv/plain/agents");
        let args = CliArgs::try_parse_from(["factdef", "config"]).unwrap();
        std::env::remove_var("FACTDEF_AGENTS_DIR");
        assert!(args.agents_dir.is_none());

        let mut config = staging_config();
        args.apply_overrides(&mut config);
        assert_eq!(config.storage.agents_dir, PathBuf::from("/srv/staging/agents"));
    }

    #[test]
    fn explicit_flag_overrides_profile() {
        let args =
            CliArgs::try_parse_from(["factdef", "agents", "--agents-dir", "/tmp/agents"]).unwrap();
        let mut config = staging_config();
        args.apply_overrides(&mut config);
        assert_eq!(config.storage.agents_dir, PathBuf::from("/tmp/agents"));
    }
}
