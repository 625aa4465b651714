//! Typed fact definitions: one concrete payload shape per fact type.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use super::FactType;
use crate::validation::validate_definition;

/// One named derivation rule as persisted in an agent's orchestration config.
///
/// Serialized flat: `{ name, type, <payload fields> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactDefinition {
    pub name: String,
    #[serde(flatten)]
    pub rule: FactRule,
}

/// Type-specific payload, tagged by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FactRule {
    /// `field` is present in collected data.
    Exists { field: String },
    /// `field` is absent from collected data.
    NotExists { field: String },
    /// `field` is present and exactly equal to `value`.
    Equals { field: String, value: Value },
    /// At least one of `fields` is present.
    AnyExists { fields: Vec<String> },
    /// Every one of `fields` is present.
    AllExists { fields: Vec<String> },
    /// Logical combination over other facts.
    Composite {
        #[serde(default)]
        logic: CompositeLogic,
        conditions: Vec<FactCondition>,
    },
}

/// How a composite fact combines its conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeLogic {
    /// Logical AND.
    #[default]
    All,
    /// Logical OR.
    Any,
}

impl CompositeLogic {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeLogic::All => "all",
            CompositeLogic::Any => "any",
        }
    }
}

impl fmt::Display for CompositeLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference from a composite fact to another fact by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCondition {
    pub fact: String,
}

impl FactCondition {
    pub fn new(fact: impl Into<String>) -> Self {
        Self { fact: fact.into() }
    }
}

impl FactRule {
    /// Empty payload for a freshly added rule of the given type.
    pub fn empty(fact_type: FactType) -> Self {
        match fact_type {
            FactType::Exists => FactRule::Exists { field: String::new() },
            FactType::NotExists => FactRule::NotExists { field: String::new() },
            FactType::Equals => FactRule::Equals {
                field: String::new(),
                value: Value::String(String::new()),
            },
            FactType::AnyExists => FactRule::AnyExists { fields: Vec::new() },
            FactType::AllExists => FactRule::AllExists { fields: Vec::new() },
            FactType::Composite => FactRule::Composite {
                logic: CompositeLogic::All,
                conditions: Vec::new(),
            },
        }
    }

    pub fn fact_type(&self) -> FactType {
        match self {
            FactRule::Exists { .. } => FactType::Exists,
            FactRule::NotExists { .. } => FactType::NotExists,
            FactRule::Equals { .. } => FactType::Equals,
            FactRule::AnyExists { .. } => FactType::AnyExists,
            FactRule::AllExists { .. } => FactType::AllExists,
            FactRule::Composite { .. } => FactType::Composite,
        }
    }
}

impl FactDefinition {
    pub fn new(name: impl Into<String>, rule: FactRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    /// Unnamed definition with an empty payload for `fact_type`.
    pub fn empty(fact_type: FactType) -> Self {
        Self::new(String::new(), FactRule::empty(fact_type))
    }

    pub fn fact_type(&self) -> FactType {
        self.rule.fact_type()
    }

    /// Names of the facts this definition depends on (composite rules only).
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let conditions: &[FactCondition] = match &self.rule {
            FactRule::Composite { conditions, .. } => conditions,
            _ => &[],
        };
        conditions.iter().map(|c| c.fact.as_str())
    }

    /// Editable JSON form of this definition.
    pub fn to_draft(&self) -> Value {
        let mut draft = json!({
            "name": self.name,
            "type": self.fact_type().as_str(),
        });
        let payload = match &self.rule {
            FactRule::Exists { field } | FactRule::NotExists { field } => {
                json!({ "field": field })
            }
            FactRule::Equals { field, value } => json!({ "field": field, "value": value }),
            FactRule::AnyExists { fields } | FactRule::AllExists { fields } => {
                json!({ "fields": fields })
            }
            FactRule::Composite { logic, conditions } => json!({
                "logic": logic.as_str(),
                "conditions": conditions
                    .iter()
                    .map(|c| json!({ "fact": c.fact }))
                    .collect::<Vec<_>>(),
            }),
        };
        if let (Some(target), Value::Object(extra)) = (draft.as_object_mut(), payload) {
            target.extend(extra);
        }
        draft
    }

    /// Convert an operator draft into a typed definition.
    ///
    /// Returns the validation errors when the draft does not describe a
    /// well-formed definition of its declared type.
    pub fn from_draft(draft: &Value) -> std::result::Result<Self, Vec<String>> {
        let result = validate_definition(draft);
        if !result.valid {
            return Err(result.errors);
        }
        serde_json::from_value(draft.clone()).map_err(|e| vec![e.to_string()])
    }
}
