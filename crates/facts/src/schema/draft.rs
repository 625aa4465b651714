//! Lenient accessors over operator drafts (`serde_json::Value` objects).

use serde_json::Value;

/// Non-empty string name of a draft, if any.
pub fn draft_name(def: &Value) -> Option<&str> {
    def.get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

/// Whether the draft declares `type: composite`.
pub fn is_composite_draft(def: &Value) -> bool {
    def.get("type").and_then(Value::as_str) == Some("composite")
}

/// String `fact` references of a draft's conditions, skipping malformed entries.
pub fn draft_references(def: &Value) -> impl Iterator<Item = &str> {
    def.get("conditions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|c| c.get("fact").and_then(Value::as_str))
}

/// Errors reading a rule set file.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// YAML (or JSON) syntax error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Parsed, but not a list of definitions.
    #[error("expected a list of fact definitions or a mapping with `fact_definitions`, got {0}")]
    Shape(&'static str),
}

/// Read drafts from YAML or JSON text.
///
/// Accepts a bare list of definitions or an orchestration config mapping
/// with a `fact_definitions` list. Entries are not validated here.
pub fn parse_drafts(text: &str) -> std::result::Result<Vec<Value>, DraftError> {
    let doc: Value = serde_yaml::from_str(text)?;
    match doc {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("fact_definitions") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DraftError::Shape("a non-list `fact_definitions`")),
            None => Err(DraftError::Shape("a mapping without `fact_definitions`")),
        },
        Value::Null => Ok(Vec::new()),
        _ => Err(DraftError::Shape("a scalar")),
    }
}
