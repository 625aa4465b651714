//! Draft editing of an agent's rule set.
//!
//! The editor keeps the last persisted list next to the operator's drafts.
//! Drafts are plain JSON objects so half-filled rules can exist; the whole
//! set is re-validated after every mutation, and a save only goes through
//! when that report is clean.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::explain::explain_draft;
use crate::schema::{draft_name, FactDefinition, FactType};
use crate::store::{ConfigStore, StoreError};
use crate::validation::{validate_all, ValidationResult};

/// Errors surfaced to the operator by the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The draft set has validation errors; nothing was saved.
    #[error("rule set has {} validation error(s)", .0.len())]
    Invalid(Vec<String>),

    /// A row index that does not exist.
    #[error("no fact definition at row {0}")]
    OutOfRange(usize),

    /// The store refused or failed the save; the persisted list is unchanged.
    #[error("save failed: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EditorError>;

/// Editing session over one agent's fact definitions.
#[derive(Debug, Clone)]
pub struct FactEditor {
    agent_id: String,
    persisted: Vec<FactDefinition>,
    drafts: Vec<Value>,
    validation: ValidationResult,
}

impl FactEditor {
    /// Start editing from an already loaded list.
    pub fn new(agent_id: impl Into<String>, persisted: Vec<FactDefinition>) -> Self {
        let drafts = persisted.iter().map(FactDefinition::to_draft).collect();
        let mut editor = Self {
            agent_id: agent_id.into(),
            persisted,
            drafts,
            validation: ValidationResult::default(),
        };
        editor.revalidate();
        editor
    }

    /// Load the agent's persisted list from `store` and start editing it.
    pub async fn open(store: &dyn ConfigStore, agent_id: &str) -> Result<Self> {
        let config = store.load(agent_id).await?;
        debug!(agent_id = %agent_id, facts = config.fact_definitions.len(), "opened fact editor");
        Ok(Self::new(agent_id, config.fact_definitions))
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn drafts(&self) -> &[Value] {
        &self.drafts
    }

    pub fn persisted(&self) -> &[FactDefinition] {
        &self.persisted
    }

    /// Combined set + cycle report for the current drafts.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// Errors belonging to the row at 0-based `index`.
    pub fn errors_for(&self, index: usize) -> Vec<&str> {
        self.validation.errors_for(index + 1)
    }

    /// Append an empty rule of `fact_type`; returns its row index.
    pub fn add(&mut self, fact_type: FactType) -> usize {
        self.drafts.push(FactDefinition::empty(fact_type).to_draft());
        self.revalidate();
        self.drafts.len() - 1
    }

    /// Set one key of a draft (`name`, `field`, `value`, `fields`, ...).
    pub fn set_field(&mut self, index: usize, key: &str, value: Value) -> Result<()> {
        let draft = self.draft_mut(index)?;
        match draft.as_object_mut() {
            Some(obj) => {
                obj.insert(key.to_string(), value);
            }
            None => {
                let mut obj = Map::new();
                obj.insert(key.to_string(), value);
                *draft = Value::Object(obj);
            }
        }
        self.revalidate();
        Ok(())
    }

    /// Remove one key of a draft, returning its previous value.
    pub fn remove_field(&mut self, index: usize, key: &str) -> Result<Option<Value>> {
        let removed = self
            .draft_mut(index)?
            .as_object_mut()
            .and_then(|obj| obj.remove(key));
        self.revalidate();
        Ok(removed)
    }

    /// Switch a row to another type: the name is kept, the payload starts empty.
    pub fn change_type(&mut self, index: usize, fact_type: FactType) -> Result<()> {
        let draft = self.draft_mut(index)?;
        let name = draft.get("name").cloned();
        let mut fresh = FactDefinition::empty(fact_type).to_draft();
        if let (Some(name), Some(obj)) = (name, fresh.as_object_mut()) {
            obj.insert("name".to_string(), name);
        }
        *draft = fresh;
        self.revalidate();
        Ok(())
    }

    /// Delete a row, returning its draft.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.drafts.len() {
            return Err(EditorError::OutOfRange(index));
        }
        let removed = self.drafts.remove(index);
        self.revalidate();
        Ok(removed)
    }

    /// Replace every draft at once (e.g. an imported file).
    pub fn replace_all(&mut self, drafts: Vec<Value>) {
        self.drafts = drafts;
        self.revalidate();
    }

    /// Whether the drafts differ from the persisted list.
    ///
    /// Compared in typed form, so key order and defaulted keys (`logic`)
    /// do not count as edits.
    pub fn is_dirty(&self) -> bool {
        self.drafts.len() != self.persisted.len()
            || self
                .drafts
                .iter()
                .zip(&self.persisted)
                .any(|(draft, def)| FactDefinition::from_draft(draft).map_or(true, |d| d != *def))
    }

    /// Throw away every edit and return to the persisted list.
    pub fn discard(&mut self) {
        self.drafts = self.persisted.iter().map(FactDefinition::to_draft).collect();
        self.revalidate();
    }

    /// Explanation of the row at `index`, if it exists.
    pub fn explain(&self, index: usize) -> Option<String> {
        self.drafts.get(index).map(explain_draft)
    }

    /// Persist the drafts as the agent's complete rule set.
    ///
    /// Refuses while the validation report has errors. On a store failure the
    /// persisted list and the drafts are both left as they were.
    pub async fn save(&mut self, store: &dyn ConfigStore) -> Result<&[FactDefinition]> {
        if !self.validation.valid {
            return Err(EditorError::Invalid(self.validation.errors.clone()));
        }

        let defs = self
            .drafts
            .iter()
            .map(FactDefinition::from_draft)
            .collect::<std::result::Result<Vec<_>, Vec<String>>>()
            .map_err(EditorError::Invalid)?;

        let config = match store.replace_fact_definitions(&self.agent_id, defs).await {
            Ok(config) => config,
            Err(e) => {
                warn!(agent_id = %self.agent_id, error = %e, "saving fact definitions failed");
                return Err(e.into());
            }
        };

        info!(agent_id = %self.agent_id, facts = config.fact_definitions.len(), "saved fact definitions");
        self.persisted = config.fact_definitions;
        self.discard();
        Ok(&self.persisted)
    }

    /// Names of every named draft, in row order.
    pub fn names(&self) -> Vec<&str> {
        self.drafts.iter().filter_map(draft_name).collect()
    }

    fn draft_mut(&mut self, index: usize) -> Result<&mut Value> {
        self.drafts
            .get_mut(index)
            .ok_or(EditorError::OutOfRange(index))
    }

    fn revalidate(&mut self) {
        self.validation = validate_all(&self.drafts);
    }
}
