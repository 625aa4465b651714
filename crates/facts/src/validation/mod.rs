//! Fact definition validation with operator-facing error strings.
//!
//! Two layers: [`validate_definition`] checks one draft against the shape its
//! `type` requires, [`validate_set`] checks a whole rule set (per-definition
//! errors, duplicate names, undefined references). Cycle detection lives in
//! [`crate::graph`]; [`validate_all`] concatenates both.
//!
//! Validators take `serde_json::Value` drafts so malformed operator input is
//! reported, never rejected at deserialization time.

mod definition_checks;
mod set_checks;

pub(crate) mod fuzzy;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::find_cycles;
use crate::schema::FactDefinition;

// ── Result type ─────────────────────────────────────────────────────

/// Overall validation outcome.
///
/// `errors` block a save; `warnings` are advisory and never affect `valid`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Errors routed to the 1-based definition row `position`.
    pub fn errors_for(&self, position: usize) -> Vec<&str> {
        let prefix = format!("Definition {position} (");
        self.errors
            .iter()
            .filter(|e| e.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a single fact definition draft against its declared type.
///
/// Every violation is collected; nothing short-circuits.
pub fn validate_definition(def: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();
    definition_checks::check_definition(def, &mut result);
    result
}

/// Validate a whole rule set: per-definition shape, unique names, and
/// reference integrity of composite facts.
pub fn validate_set(defs: &[Value]) -> ValidationResult {
    let mut result = ValidationResult::new();
    set_checks::check_set(defs, &mut result);
    result
}

/// [`validate_set`] followed by cycle detection; the report that gates a save.
pub fn validate_all(defs: &[Value]) -> ValidationResult {
    let mut result = validate_set(defs);
    for cycle in find_cycles(defs) {
        result.error(cycle);
    }
    result
}

/// Validate already-typed definitions (e.g. read back from the config store).
pub fn validate_definitions(defs: &[FactDefinition]) -> ValidationResult {
    let drafts: Vec<Value> = defs.iter().map(FactDefinition::to_draft).collect();
    validate_all(&drafts)
}
