//! Tests for the config store.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::schema::{CompositeLogic, FactCondition, FactRule};

fn temp_store() -> (TempDir, FileConfigStore) {
    let dir = TempDir::new().expect("create tempdir");
    let store = FileConfigStore::new(dir.path().join("agents"));
    (dir, store)
}

fn lead_facts() -> Vec<FactDefinition> {
    vec![
        FactDefinition::new(
            "has_budget",
            FactRule::Exists {
                field: "presupuesto".to_string(),
            },
        ),
        FactDefinition::new(
            "urgent",
            FactRule::Equals {
                field: "urgencia".to_string(),
                value: json!("alta"),
            },
        ),
        FactDefinition::new(
            "ready",
            FactRule::Composite {
                logic: CompositeLogic::All,
                conditions: vec![FactCondition::new("has_budget"), FactCondition::new("urgent")],
            },
        ),
    ]
}

#[tokio::test]
async fn missing_agent_loads_empty_config() {
    let (_dir, store) = temp_store();
    let config = store.load("sales-bot").await.unwrap();
    assert!(config.fact_definitions.is_empty());
    assert!(config.facts_updated_at.is_none());
}

#[tokio::test]
async fn reads_leave_the_directory_alone_until_first_write() {
    let (_dir, store) = temp_store();
    store.load("sales-bot").await.unwrap();
    assert!(store.list_agents().await.unwrap().is_empty());
    assert!(!store.dir().exists());

    store
        .replace_fact_definitions("sales-bot", lead_facts())
        .await
        .unwrap();
    assert!(store.dir().is_dir());
}

#[tokio::test]
async fn replace_then_load_round_trips() {
    let (_dir, store) = temp_store();
    let stored = store
        .replace_fact_definitions("sales-bot", lead_facts())
        .await
        .unwrap();
    assert_eq!(stored.fact_definitions, lead_facts());
    assert!(stored.facts_updated_at.is_some());

    let loaded = store.load("sales-bot").await.unwrap();
    assert_eq!(loaded, stored);
}

#[tokio::test]
async fn replace_is_wholesale_and_preserves_other_keys() {
    let (_dir, store) = temp_store();
    let path = store.config_path("sales-bot").unwrap();
    fs::create_dir_all(store.dir()).unwrap();
    fs::write(
        &path,
        r#"
greeting: "Hola, soy tu asistente"
max_turns: 12
fact_definitions:
  - name: old_fact
    type: exists
    field: legacy
"#,
    )
    .unwrap();

    let stored = store
        .replace_fact_definitions("sales-bot", lead_facts())
        .await
        .unwrap();
    assert_eq!(stored.fact_definitions.len(), 3);
    assert!(stored.fact_definitions.iter().all(|d| d.name != "old_fact"));
    assert_eq!(stored.other["greeting"], json!("Hola, soy tu asistente"));
    assert_eq!(stored.other["max_turns"], json!(12));

    let loaded = store.load("sales-bot").await.unwrap();
    assert_eq!(loaded.other, stored.other);
}

#[tokio::test]
async fn invalid_set_is_rejected_and_previous_list_kept() {
    let (_dir, store) = temp_store();
    store
        .replace_fact_definitions("sales-bot", lead_facts())
        .await
        .unwrap();

    let mut bad = lead_facts();
    bad.push(FactDefinition::new(
        "loop",
        FactRule::Composite {
            logic: CompositeLogic::Any,
            conditions: vec![FactCondition::new("loop")],
        },
    ));
    let err = store
        .replace_fact_definitions("sales-bot", bad)
        .await
        .unwrap_err();
    match err {
        StoreError::Rejected(errors) => {
            assert_eq!(errors, vec!["Circular dependency detected: loop → loop".to_string()]);
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }

    let loaded = store.load("sales-bot").await.unwrap();
    assert_eq!(loaded.fact_definitions, lead_facts());
}

#[tokio::test]
async fn agent_ids_cannot_escape_the_directory() {
    let (_dir, store) = temp_store();
    for id in ["", "../etc", "a/b", ".hidden"] {
        assert!(matches!(
            store.load(id).await,
            Err(StoreError::InvalidAgentId(_))
        ));
    }
}

#[tokio::test]
async fn list_agents_skips_dotfiles_and_non_yaml() {
    let (_dir, store) = temp_store();
    store.replace_fact_definitions("b-agent", Vec::new()).await.unwrap();
    store.replace_fact_definitions("a-agent", lead_facts()).await.unwrap();
    fs::write(store.dir().join(".c-agent.tmp"), "partial").unwrap();
    fs::write(store.dir().join("notes.txt"), "not a config").unwrap();

    let agents = store.list_agents().await.unwrap();
    assert_eq!(agents, vec!["a-agent", "b-agent"]);
}

#[tokio::test]
async fn corrupt_document_is_a_parse_error() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.dir()).unwrap();
    fs::write(
        store.config_path("broken").unwrap(),
        "fact_definitions: [ { name: x, type: nope } ]",
    )
    .unwrap();
    assert!(matches!(
        store.load("broken").await,
        Err(StoreError::Parse(_))
    ));
}
