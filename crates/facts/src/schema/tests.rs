//! Tests for schema types.

use serde_json::json;

use super::*;

const LEAD_FACTS_YAML: &str = r#"
- name: has_budget
  type: exists
  field: presupuesto
- name: urgent
  type: equals
  field: urgencia
  value: alta
- name: has_contact
  type: any_exists
  fields: [email, telefono]
- name: ready
  type: composite
  logic: all
  conditions:
    - fact: has_budget
    - fact: urgent
"#;

#[test]
fn parse_fact_list_from_yaml() {
    let defs: Vec<FactDefinition> = serde_yaml::from_str(LEAD_FACTS_YAML).unwrap();
    assert_eq!(defs.len(), 4);

    assert_eq!(defs[0].name, "has_budget");
    assert_eq!(
        defs[0].rule,
        FactRule::Exists {
            field: "presupuesto".to_string()
        }
    );

    match &defs[1].rule {
        FactRule::Equals { field, value } => {
            assert_eq!(field, "urgencia");
            assert_eq!(value, &json!("alta"));
        }
        other => panic!("Expected equals rule, got {other:?}"),
    }

    assert_eq!(defs[2].fact_type(), FactType::AnyExists);

    let refs: Vec<&str> = defs[3].references().collect();
    assert_eq!(refs, vec!["has_budget", "urgent"]);
}

#[test]
fn composite_logic_defaults_to_all() {
    let def: FactDefinition = serde_json::from_value(json!({
        "name": "ready",
        "type": "composite",
        "conditions": [{"fact": "a"}]
    }))
    .unwrap();
    match def.rule {
        FactRule::Composite { logic, .. } => assert_eq!(logic, CompositeLogic::All),
        other => panic!("Expected composite rule, got {other:?}"),
    }
}

#[test]
fn serializes_flat_with_type_tag() {
    let def = FactDefinition::new(
        "urgent",
        FactRule::Equals {
            field: "urgencia".to_string(),
            value: json!(3),
        },
    );
    let value = serde_json::to_value(&def).unwrap();
    assert_eq!(
        value,
        json!({"name": "urgent", "type": "equals", "field": "urgencia", "value": 3})
    );
}

#[test]
fn unknown_type_is_rejected_by_typed_form() {
    let res = serde_json::from_value::<FactDefinition>(json!({
        "name": "x",
        "type": "greater_than",
        "field": "age"
    }));
    assert!(res.is_err());
}

#[test]
fn fact_type_round_trips_through_str() {
    for t in FactType::ALL {
        assert_eq!(t.as_str().parse::<FactType>(), Ok(t));
    }
    assert!("exist".parse::<FactType>().is_err());
}

#[test]
fn empty_constructor_matches_type() {
    for t in FactType::ALL {
        let def = FactDefinition::empty(t);
        assert_eq!(def.fact_type(), t);
        assert!(def.name.is_empty());
        assert_eq!(def.to_draft()["type"], t.as_str());
    }
}

#[test]
fn draft_matches_serde_form() {
    let defs: Vec<FactDefinition> = serde_yaml::from_str(LEAD_FACTS_YAML).unwrap();
    for def in &defs {
        assert_eq!(def.to_draft(), serde_json::to_value(def).unwrap());
    }
}

#[test]
fn from_draft_accepts_valid_and_reports_invalid() {
    let def = FactDefinition::from_draft(&json!({
        "name": "has_budget",
        "type": "exists",
        "field": "presupuesto"
    }))
    .unwrap();
    assert_eq!(def.name, "has_budget");

    let errors = FactDefinition::from_draft(&json!({"name": "x", "type": "exists"})).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("field"));
}

#[test]
fn from_draft_ignores_leftover_keys_from_type_switch() {
    let def = FactDefinition::from_draft(&json!({
        "name": "ready",
        "type": "composite",
        "field": "left_over",
        "conditions": [{"fact": "has_budget"}]
    }))
    .unwrap();
    assert_eq!(def.fact_type(), FactType::Composite);
}

#[test]
fn core_fact_lookup() {
    assert!(core_facts().len() >= 5);
    assert!(is_core_fact("has_email"));
    assert_eq!(
        core_fact("human_requested").map(|f| f.name),
        Some("human_requested")
    );
    assert!(core_fact("has_budget").is_none());
}
