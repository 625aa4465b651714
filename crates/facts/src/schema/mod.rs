//! Fact definition schema types with serde (de)serialization.
//!
//! Defines the rule model:
//! - `FactType`: the closed set of six rule shapes
//! - `FactDefinition` / `FactRule`: the typed, tagged-variant form that is persisted
//! - `CORE_FACTS`: built-in facts always available to the orchestrator
//!
//! Operator drafts are plain `serde_json::Value` objects; they only become a
//! `FactDefinition` once validation accepts them.

mod core_facts;
mod definition;
mod draft;
mod kind;

pub use core_facts::*;
pub use definition::*;
pub use draft::*;
pub use kind::*;

#[cfg(test)]
mod tests;
