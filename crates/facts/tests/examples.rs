//! Integration tests over the example rule sets in `data/facts/examples/`.

use factdef_facts::schema::parse_drafts;
use factdef_facts::{explain, explain_draft, find_cycles, validate_all, validate_set, FactDefinition};

/// Resolve the examples directory relative to the workspace root.
fn examples_dir() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.join("../../data/facts/examples")
}

fn load_drafts(filename: &str) -> Vec<serde_json::Value> {
    let path = examples_dir().join(filename);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    parse_drafts(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

// ── lead-qualification.yml ──────────────────────────────────

#[test]
fn lead_qualification_is_valid() {
    let drafts = load_drafts("lead-qualification.yml");
    assert_eq!(drafts.len(), 7);

    let result = validate_all(&drafts);
    assert!(result.valid, "errors: {:?}", result.errors);
    assert!(result.errors.is_empty());
}

#[test]
fn lead_qualification_explanations() {
    let drafts = load_drafts("lead-qualification.yml");
    let defs: Vec<FactDefinition> = drafts
        .iter()
        .map(|d| FactDefinition::from_draft(d).unwrap())
        .collect();

    let explained: Vec<String> = defs.iter().map(explain).collect();
    assert_eq!(
        explained,
        vec![
            "field \"presupuesto\" is present",
            "field \"urgencia\" equals \"alta\"",
            "ALL of these facts are true: has_budget, urgent",
            "at least one of fields: email, telefono",
            "all of fields: nombre, email, empresa",
            "field \"empresa\" is NOT present",
            "ANY of these facts are true: ready, full_profile",
        ]
    );

    for (draft, def) in drafts.iter().zip(&defs) {
        assert_eq!(explain_draft(draft), explain(def));
    }
}

// ── broken.json ─────────────────────────────────────────────

#[test]
fn broken_set_reports_every_problem() {
    let drafts = load_drafts("broken.json");

    let set = validate_set(&drafts);
    assert!(!set.valid);
    assert_eq!(
        set.errors,
        vec![
            "Duplicate fact name: \"has_budget\"".to_string(),
            "Definition 3 (urgent): value is required for type \"equals\"".to_string(),
            "Composite fact \"loop_b\" references undefined fact: \"has_email\"".to_string(),
        ]
    );
    assert!(set.warnings.iter().any(|w| w.contains("built-in core fact")));

    let cycles = find_cycles(&drafts);
    assert_eq!(cycles, vec!["Circular dependency detected: loop_b → loop_a"]);

    let all = validate_all(&drafts);
    assert_eq!(all.errors.len(), 4);
    assert_eq!(all.errors.last().map(String::as_str), Some(cycles[0].as_str()));
}

// ── end-to-end ──────────────────────────────────────────────

#[test]
fn end_to_end_ready_example() {
    let drafts = parse_drafts(
        r#"[
            {"name": "has_budget", "type": "exists", "field": "presupuesto"},
            {"name": "urgent", "type": "equals", "field": "urgencia", "value": "alta"},
            {"name": "ready", "type": "composite", "logic": "all",
             "conditions": [{"fact": "has_budget"}, {"fact": "urgent"}]}
        ]"#,
    )
    .unwrap();

    let result = validate_all(&drafts);
    assert!(result.valid);
    assert!(result.errors.is_empty());

    let ready = FactDefinition::from_draft(&drafts[2]).unwrap();
    assert_eq!(explain(&ready), "ALL of these facts are true: has_budget, urgent");
}
