mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use factdef_core::config::{load_dotenv, Config};
use factdef_facts::store::FileConfigStore;

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let mut config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    args.apply_overrides(&mut config);
    config.validate()?;
    config.log_summary();

    let agents_dir = config.storage.agents_dir.clone();
    debug!(agents_dir = %agents_dir.display(), "resolved agents directory");

    let format = args.format;
    let (output, failure) = match args.command {
        Command::Validate { file } => {
            let (report, valid) = commands::validate(&file, format)?;
            let failure = (!valid).then(|| format!("validation failed for {}", file.display()));
            (report, failure)
        }
        Command::Explain { file } => (commands::explain_file(&file, format)?, None),
        Command::CoreFacts => (commands::list_core_facts(format)?, None),
        Command::Agents => {
            let store = FileConfigStore::new(agents_dir);
            (commands::list_agents(&store, format).await?, None)
        }
        Command::Show { agent } => {
            let store = FileConfigStore::new(agents_dir);
            (commands::show(&store, &agent, format).await?, None)
        }
        Command::Save { agent, file } => {
            let store = FileConfigStore::new(agents_dir);
            let (report, saved) = commands::save(&store, &agent, &file, format)
                .await
                .with_context(|| format!("save of {} failed", file.display()))?;
            let failure = (!saved).then(|| format!("refusing to save agent '{agent}'"));
            (report, failure)
        }
        Command::Config => (serde_json::to_string_pretty(&config.redacted_summary())?, None),
    };

    // Reports always go to stdout so `--format json` stays parseable.
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    if let Some(message) = failure {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
    Ok(())
}
