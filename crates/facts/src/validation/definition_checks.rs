//! Per-definition checks: name, type, and the payload each type requires.

use serde_json::Value;

use super::fuzzy::{is_identifier, suggest};
use super::ValidationResult;
use crate::schema::FactType;

pub(super) fn check_definition(def: &Value, result: &mut ValidationResult) {
    check_name(def, result);

    let type_names = FactType::names();
    match def.get("type").and_then(Value::as_str) {
        None => {
            result.error(format!(
                "type is required and must be one of: {}",
                type_names.join(", ")
            ));
        }
        Some(raw) => match raw.parse::<FactType>() {
            Ok(fact_type) => check_payload(fact_type, def, result),
            Err(_) => {
                let mut message = format!(
                    "type \"{raw}\" is not valid; must be one of: {}",
                    type_names.join(", ")
                );
                if let Some(s) = suggest(raw, type_names) {
                    message.push_str(&format!(". Did you mean \"{s}\"?"));
                }
                result.error(message);
            }
        },
    }
}

fn check_name(def: &Value, result: &mut ValidationResult) {
    match def.get("name") {
        Some(Value::String(name)) if name.is_empty() => {
            result.error("name is required");
        }
        Some(Value::String(name)) => {
            if !is_identifier(name) {
                result.error(format!(
                    "name \"{name}\" is invalid: it must start with a letter or underscore \
                     and contain only letters, digits, and underscores"
                ));
            }
        }
        _ => result.error("name is required and must be a string"),
    }
}

fn check_payload(fact_type: FactType, def: &Value, result: &mut ValidationResult) {
    match fact_type {
        FactType::Exists | FactType::NotExists => {
            check_field(fact_type, def, result);
        }
        FactType::Equals => {
            check_field(fact_type, def, result);
            // Only an absent key counts as missing; "", 0, false and null are values.
            if def.get("value").is_none() {
                result.error(format!("value is required for type \"{fact_type}\""));
            }
        }
        FactType::AnyExists | FactType::AllExists => {
            check_fields(fact_type, def, result);
        }
        FactType::Composite => {
            check_conditions(def, result);
            check_logic(def, result);
        }
    }
}

fn check_field(fact_type: FactType, def: &Value, result: &mut ValidationResult) {
    match def.get("field") {
        Some(Value::String(field)) if field.is_empty() => {
            result.error(format!("field must not be empty for type \"{fact_type}\""));
        }
        Some(Value::String(_)) => {}
        _ => result.error(format!(
            "field is required for type \"{fact_type}\" and must be a string"
        )),
    }
}

fn check_fields(fact_type: FactType, def: &Value, result: &mut ValidationResult) {
    let fields = match def.get("fields").and_then(Value::as_array) {
        Some(fields) if !fields.is_empty() => fields,
        _ => {
            result.error(format!(
                "fields must be a non-empty list of field names for type \"{fact_type}\""
            ));
            return;
        }
    };

    for (i, field) in fields.iter().enumerate() {
        match field {
            Value::String(s) if s.is_empty() => {
                result.error(format!("fields[{i}] must not be empty"));
            }
            Value::String(_) => {}
            _ => result.error(format!("fields[{i}] must be a string")),
        }
    }
}

fn check_conditions(def: &Value, result: &mut ValidationResult) {
    let conditions = match def.get("conditions").and_then(Value::as_array) {
        Some(conditions) if !conditions.is_empty() => conditions,
        _ => {
            result.error(
                "conditions must be a non-empty list of {fact} references for type \"composite\"",
            );
            return;
        }
    };

    for (i, condition) in conditions.iter().enumerate() {
        match condition.get("fact") {
            Some(Value::String(fact)) if !fact.is_empty() => {}
            _ => result.error(format!(
                "conditions[{i}].fact is required and must be a fact name"
            )),
        }
    }
}

fn check_logic(def: &Value, result: &mut ValidationResult) {
    if let Some(logic) = def.get("logic") {
        if !matches!(logic.as_str(), Some("all") | Some("any")) {
            result.error(format!("logic must be \"all\" or \"any\", got {logic}"));
        }
    }
}
