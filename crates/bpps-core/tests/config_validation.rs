use std::fs;
use std::path::Path;

use bpps_core::{GenerationConfig, validate_config, validate_config_document, validate_config_json};
use serde_json::json;

fn load_json(path: &Path) -> serde_json::Value {
    let contents =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse json")
}

#[test]
fn shipped_configs_validate() {
    let configs = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");
    for name in ["default.config.json", "single_scenario.config.json"] {
        let document = load_json(&configs.join(name));
        let validated = validate_config_document(&document)
            .unwrap_or_else(|report| panic!("{name} rejected: {:?}", report.errors));
        assert!(validated.warnings.is_empty(), "unexpected warnings in {name}");
    }

    let default = load_json(&configs.join("default.config.json"));
    let validated = validate_config_document(&default).expect("default config");
    assert_eq!(validated.config, GenerationConfig::default());
}

#[test]
fn infeasible_combinations_are_warnings() {
    let configs = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");
    let document = load_json(&configs.join("infeasible.config.json"));
    let validated = validate_config_document(&document).expect("config is runnable");
    assert!(
        validated
            .warnings
            .iter()
            .any(|issue| issue.code == "infeasible_combination")
    );
}

#[test]
fn structural_errors_carry_json_pointers() {
    let document = json!({
        "capacities": [200],
        "num_items": "many",
        "num_classes": [5],
        "item_weight_ranges": [[0.05, 0.15]],
        "setup_weight_ranges": [[0.01, 0.10]],
        "setup_cost_flags": [0],
        "seeds": [0]
    });

    let report = validate_config_json(&document).expect("schema compiles");
    assert!(!report.is_ok());
    assert!(report.errors.iter().any(|issue| issue.path == "/num_items"));
}

#[test]
fn missing_key_is_rejected() {
    let document = json!({
        "capacities": [200],
        "num_classes": [5],
        "item_weight_ranges": [[0.05, 0.15]],
        "setup_weight_ranges": [[0.01, 0.10]],
        "setup_cost_flags": [0],
        "seeds": [0]
    });

    let report = validate_config_document(&document).expect_err("num_items is required");
    assert!(!report.errors.is_empty());
}

#[test]
fn semantic_errors_are_collected() {
    let mut config = GenerationConfig::default();
    config.seeds.clear();
    config.capacities.push(0);
    config.setup_cost_flags.push(2);
    config.setup_weight_ranges[0].1 = 1.5;
    config.min_items_per_class = 0;

    let report = validate_config(&config);
    let mut codes: Vec<&str> = report.errors.iter().map(|issue| issue.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(
        codes,
        vec![
            "flag_invalid",
            "list_empty",
            "min_items_zero",
            "range_out_of_bounds",
            "value_zero"
        ]
    );
    assert!(report.into_result().is_err());
}
