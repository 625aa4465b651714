//! Dependency graph over composite facts and cycle detection.
//!
//! Each composite fact points at the facts its conditions name. Non-composite
//! facts have no outgoing edges; they only ever appear as targets.
//!
//! Traversal is an iterative depth-first search with a "visited" set (fully
//! explored) and an "in progress" set (on the current path). It visits nodes
//! in the same pre-order a recursive DFS would, so the reported closing edge
//! is the same, without the recursion depth limit.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::schema::{draft_name, draft_references, is_composite_draft, FactDefinition, FactType};

/// Adjacency map from fact name to the facts it references, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from operator drafts. Malformed entries contribute
    /// whatever well-formed references they carry and nothing else.
    pub fn from_drafts(defs: &[Value]) -> Self {
        let mut graph = Self::new();
        for def in defs {
            if !is_composite_draft(def) {
                continue;
            }
            if let Some(name) = draft_name(def) {
                graph.add_edges(name, draft_references(def));
            }
        }
        graph
    }

    pub fn from_definitions(defs: &[FactDefinition]) -> Self {
        let mut graph = Self::new();
        for def in defs {
            if def.fact_type() == FactType::Composite {
                graph.add_edges(&def.name, def.references());
            }
        }
        graph
    }

    /// Add outgoing edges for `name`. Repeated names accumulate edges.
    pub fn add_edges<'a>(&mut self, name: &str, deps: impl IntoIterator<Item = &'a str>) {
        let entry = self.edges.entry(name.to_string()).or_default();
        entry.extend(deps.into_iter().map(str::to_string));
    }

    pub fn dependencies(&self, name: &str) -> Option<&IndexSet<String>> {
        self.edges.get(name)
    }

    /// Names that have outgoing edges, in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Report every edge that closes a cycle during traversal, as
    /// `Circular dependency detected: A → B`.
    ///
    /// At least one message per cycle reached; a densely cyclic graph may
    /// have cycles that share an edge reported only once.
    pub fn find_cycles(&self) -> Vec<String> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut in_progress: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&str, usize)> = Vec::new();

        for root in self.edges.keys() {
            let root = root.as_str();
            if visited.contains(root) {
                continue;
            }
            in_progress.insert(root);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let next = self.edges.get(node).and_then(|deps| deps.get_index(frame.1));
                match next {
                    Some(dep) => {
                        frame.1 += 1;
                        let dep = dep.as_str();
                        if in_progress.contains(dep) {
                            cycles.push(format!("Circular dependency detected: {node} → {dep}"));
                        } else if !visited.contains(dep) {
                            in_progress.insert(dep);
                            stack.push((dep, 0));
                        }
                    }
                    None => {
                        stack.pop();
                        in_progress.remove(node);
                        visited.insert(node);
                    }
                }
            }
        }

        cycles
    }
}

/// Detect circular dependencies among composite fact drafts.
pub fn find_cycles(defs: &[Value]) -> Vec<String> {
    DependencyGraph::from_drafts(defs).find_cycles()
}
