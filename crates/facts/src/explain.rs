//! Natural-language rendering of fact definitions for operator review.

use serde_json::Value;

use crate::schema::{draft_references, CompositeLogic, FactDefinition, FactRule, FactType};

const MISSING: &str = "?";

/// Explain a typed definition.
pub fn explain(def: &FactDefinition) -> String {
    match &def.rule {
        FactRule::Exists { field } => exists_text(field),
        FactRule::NotExists { field } => not_exists_text(field),
        FactRule::Equals { field, value } => equals_text(field, &render_value(value)),
        FactRule::AnyExists { fields } => any_exists_text(fields.iter().map(String::as_str)),
        FactRule::AllExists { fields } => all_exists_text(fields.iter().map(String::as_str)),
        FactRule::Composite { logic, conditions } => {
            composite_text(*logic, conditions.iter().map(|c| c.fact.as_str()))
        }
    }
}

/// Explain an operator draft. Never fails: malformed parts render as `?`.
pub fn explain_draft(def: &Value) -> String {
    let raw_type = def.get("type").and_then(Value::as_str);
    let fact_type = match raw_type.map(str::parse::<FactType>) {
        Some(Ok(t)) => t,
        Some(Err(_)) => return format!("unknown fact type \"{}\"", raw_type.unwrap_or_default()),
        None => return "fact type not set".to_string(),
    };

    let field = def.get("field").and_then(Value::as_str).unwrap_or(MISSING);
    let fields = || {
        def.get("fields")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|f| f.as_str().unwrap_or(MISSING))
    };

    match fact_type {
        FactType::Exists => exists_text(field),
        FactType::NotExists => not_exists_text(field),
        FactType::Equals => {
            let value = def.get("value").map(render_value);
            equals_text(field, value.as_deref().unwrap_or(MISSING))
        }
        FactType::AnyExists => any_exists_text(fields()),
        FactType::AllExists => all_exists_text(fields()),
        FactType::Composite => {
            let logic = match def.get("logic").and_then(Value::as_str) {
                Some("any") => CompositeLogic::Any,
                _ => CompositeLogic::All,
            };
            composite_text(logic, draft_references(def))
        }
    }
}

fn exists_text(field: &str) -> String {
    format!("field \"{field}\" is present")
}

fn not_exists_text(field: &str) -> String {
    format!("field \"{field}\" is NOT present")
}

fn equals_text(field: &str, value: &str) -> String {
    format!("field \"{field}\" equals {value}")
}

fn any_exists_text<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    format!("at least one of fields: {}", join(fields))
}

fn all_exists_text<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    format!("all of fields: {}", join(fields))
}

fn composite_text<'a>(logic: CompositeLogic, facts: impl Iterator<Item = &'a str>) -> String {
    let quantifier = match logic {
        CompositeLogic::All => "ALL",
        CompositeLogic::Any => "ANY",
    };
    format!("{quantifier} of these facts are true: {}", join(facts))
}

/// Strings are quoted, everything else renders as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
