//! Subcommand implementations. Each returns the text to print so the
//! formatting can be tested without a terminal.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::debug;

use factdef_facts::schema::{draft_name, parse_drafts};
use factdef_facts::store::{ConfigStore, FileConfigStore};
use factdef_facts::{core_facts, explain, explain_draft, validate_all, FactEditor, ValidationResult};

use crate::cli::OutputFormat;

/// Read and parse a rule set file into drafts.
pub fn read_drafts(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let drafts = parse_drafts(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), definitions = drafts.len(), "read rule set");
    Ok(drafts)
}

/// Render a validation report.
pub fn render_report(report: &ValidationResult, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut out = String::new();
    if report.valid {
        out.push_str("OK: rule set is valid\n");
    } else {
        out.push_str(&format!("INVALID: {} error(s)\n", report.errors.len()));
        for error in &report.errors {
            out.push_str(&format!("  error: {error}\n"));
        }
    }
    for warning in &report.warnings {
        out.push_str(&format!("  warning: {warning}\n"));
    }
    Ok(out)
}

/// `validate`: returns the rendered report and whether the set is valid.
pub fn validate(path: &Path, format: OutputFormat) -> Result<(String, bool)> {
    let drafts = read_drafts(path)?;
    let report = validate_all(&drafts);
    Ok((render_report(&report, format)?, report.valid))
}

/// `explain`: one line per rule, in file order.
pub fn explain_file(path: &Path, format: OutputFormat) -> Result<String> {
    let drafts = read_drafts(path)?;
    let rows: Vec<(&str, String)> = drafts
        .iter()
        .map(|d| (draft_name(d).unwrap_or("unnamed"), explain_draft(d)))
        .collect();

    match format {
        OutputFormat::Json => {
            let items: Vec<Value> = rows
                .iter()
                .map(|(name, text)| json!({ "name": name, "explanation": text }))
                .collect();
            Ok(serde_json::to_string_pretty(&items)?)
        }
        OutputFormat::Text => Ok(rows
            .iter()
            .enumerate()
            .map(|(i, (name, text))| format!("{}. {name}: {text}\n", i + 1))
            .collect()),
    }
}

/// `core-facts`: the built-in registry.
pub fn list_core_facts(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(core_facts())?),
        OutputFormat::Text => {
            let width = core_facts().iter().map(|f| f.name.len()).max().unwrap_or(0);
            Ok(core_facts()
                .iter()
                .map(|f| format!("{:<width$}  {}\n", f.name, f.description))
                .collect())
        }
    }
}

/// `agents`: ids with a stored config.
pub async fn list_agents(store: &FileConfigStore, format: OutputFormat) -> Result<String> {
    let agents = store.list_agents().await?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&agents)?),
        OutputFormat::Text => Ok(agents.iter().map(|a| format!("{a}\n")).collect()),
    }
}

/// `show`: an agent's stored definitions with explanations.
pub async fn show(store: &dyn ConfigStore, agent: &str, format: OutputFormat) -> Result<String> {
    let config = store
        .load(agent)
        .await
        .with_context(|| format!("failed to load config for agent '{agent}'"))?;

    match format {
        OutputFormat::Json => {
            let items: Vec<Value> = config
                .fact_definitions
                .iter()
                .map(|def| {
                    let mut item = def.to_draft();
                    item["explanation"] = Value::String(explain(def));
                    item
                })
                .collect();
            Ok(serde_json::to_string_pretty(&json!({
                "agent": agent,
                "facts_updated_at": config.facts_updated_at,
                "fact_definitions": items,
            }))?)
        }
        OutputFormat::Text => {
            let mut out = format!(
                "agent {agent}: {} fact definition(s)",
                config.fact_definitions.len()
            );
            if let Some(at) = config.facts_updated_at {
                out.push_str(&format!(", updated {}", at.to_rfc3339()));
            }
            out.push('\n');
            for def in &config.fact_definitions {
                out.push_str(&format!("  {} ({}): {}\n", def.name, def.fact_type(), explain(def)));
            }
            Ok(out)
        }
    }
}

/// `save`: replace an agent's rule set with the file contents.
///
/// Returns the text to print and whether the save went through. An invalid
/// file leaves the store untouched and yields the rendered report.
pub async fn save(
    store: &dyn ConfigStore,
    agent: &str,
    path: &Path,
    format: OutputFormat,
) -> Result<(String, bool)> {
    let drafts = read_drafts(path)?;
    let mut editor = FactEditor::open(store, agent)
        .await
        .with_context(|| format!("failed to load config for agent '{agent}'"))?;
    editor.replace_all(drafts);

    if !editor.validation().valid {
        return Ok((render_report(editor.validation(), format)?, false));
    }
    if !editor.is_dirty() {
        return Ok((format!("agent {agent}: no changes\n"), true));
    }

    let saved = editor
        .save(store)
        .await
        .with_context(|| format!("failed to save agent '{agent}'"))?;
    Ok((format!("agent {agent}: saved {} fact definition(s)\n", saved.len()), true))
}
