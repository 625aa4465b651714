//! Fact definition rule language for agent orchestration configs.
//!
//! This crate provides:
//! - Typed fact definitions (six closed rule shapes) and the built-in core fact registry
//! - Per-definition and rule-set validation with operator-facing error strings
//! - Dependency graph construction and cycle detection over composite facts
//! - Natural-language explanations of each rule
//! - Wholesale persistence of a rule set into an agent's orchestration config
//! - A draft editor that re-validates on every mutation and blocks invalid saves

pub mod editor;
pub mod explain;
pub mod graph;
pub mod schema;
pub mod store;
pub mod validation;

pub use editor::{EditorError, FactEditor};
pub use explain::{explain, explain_draft};
pub use graph::{find_cycles, DependencyGraph};
pub use schema::{core_fact, core_facts, CoreFact, FactDefinition, FactRule, FactType};
pub use validation::{validate_all, validate_definition, validate_set, ValidationResult};
