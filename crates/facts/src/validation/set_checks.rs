//! Rule-set checks: per-definition errors with row prefixes, duplicate
//! names, and composite references to undefined facts.

use std::collections::HashSet;

use serde_json::Value;

use super::fuzzy::suggest;
use super::{validate_definition, ValidationResult};
use crate::schema::{draft_name, draft_references, is_composite_draft, is_core_fact};

pub(super) fn check_set(defs: &[Value], result: &mut ValidationResult) {
    let mut known: HashSet<&str> = HashSet::new();

    for (i, def) in defs.iter().enumerate() {
        let position = i + 1;
        let label = draft_name(def).unwrap_or("unnamed");

        let single = validate_definition(def);
        for error in single.errors {
            result.error(format!("Definition {position} ({label}): {error}"));
        }
        for warning in single.warnings {
            result.warn(format!("Definition {position} ({label}): {warning}"));
        }

        if let Some(name) = draft_name(def) {
            if !known.insert(name) {
                result.error(format!("Duplicate fact name: \"{name}\""));
            }
        }
    }

    // References are checked only once every name in the set is known, so
    // forward references are fine.

    for def in defs {
        if !is_composite_draft(def) {
            continue;
        }
        let owner = draft_name(def).unwrap_or("unnamed");
        for fact in draft_references(def) {
            if known.contains(fact) {
                continue;
            }
            result.error(format!(
                "Composite fact \"{owner}\" references undefined fact: \"{fact}\""
            ));
            if is_core_fact(fact) {
                result.warn(format!(
                    "Composite fact \"{owner}\": \"{fact}\" is a built-in core fact; \
                     core facts cannot be referenced from custom composite facts"
                ));
            } else if let Some(s) = suggest(fact, defs.iter().filter_map(draft_name)) {
                result.warn(format!(
                    "Composite fact \"{owner}\": did you mean \"{s}\" instead of \"{fact}\"?"
                ));
            }
        }
    }
}
