//! Fact type enum: the closed set of rule shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported fact rule shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactType {
    Exists,
    NotExists,
    Equals,
    AnyExists,
    AllExists,
    Composite,
}

impl FactType {
    /// All fact types, in the order they are offered to operators.
    pub const ALL: [FactType; 6] = [
        FactType::Exists,
        FactType::NotExists,
        FactType::Equals,
        FactType::AnyExists,
        FactType::AllExists,
        FactType::Composite,
    ];

    /// Wire name used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactType::Exists => "exists",
            FactType::NotExists => "not_exists",
            FactType::Equals => "equals",
            FactType::AnyExists => "any_exists",
            FactType::AllExists => "all_exists",
            FactType::Composite => "composite",
        }
    }

    /// Wire names of every type, for error messages and fuzzy suggestions.
    pub fn names() -> [&'static str; 6] {
        Self::ALL.map(|t| t.as_str())
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exists" => Ok(FactType::Exists),
            "not_exists" => Ok(FactType::NotExists),
            "equals" => Ok(FactType::Equals),
            "any_exists" => Ok(FactType::AnyExists),
            "all_exists" => Ok(FactType::AllExists),
            "composite" => Ok(FactType::Composite),
            other => Err(format!("unknown fact type: '{}'", other)),
        }
    }
}
