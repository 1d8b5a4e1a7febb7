use bpps_core::{FractionRange, GenerationConfig};

#[test]
fn serializes_config_deterministically() {
    let config = GenerationConfig {
        capacities: vec![200],
        num_items: vec![25],
        num_classes: vec![5],
        item_weight_ranges: vec![FractionRange(0.05, 0.15)],
        setup_weight_ranges: vec![FractionRange(0.01, 0.1)],
        setup_cost_flags: vec![1],
        seeds: vec![0],
        min_items_per_class: 2,
        bin_cost: 10,
        output_directory: "out".into(),
    };

    let json = serde_json::to_string_pretty(&config).expect("serialize config");
    let expected = r#"{
  "capacities": [
    200
  ],
  "num_items": [
    25
  ],
  "num_classes": [
    5
  ],
  "item_weight_ranges": [
    [
      0.05,
      0.15
    ]
  ],
  "setup_weight_ranges": [
    [
      0.01,
      0.1
    ]
  ],
  "setup_cost_flags": [
    1
  ],
  "seeds": [
    0
  ],
  "min_items_per_class": 2,
  "bin_cost": 10,
  "output_directory": "out"
}"#;
    assert_eq!(json, expected);
}

#[test]
fn optional_keys_take_defaults() {
    let json = r#"{
        "capacities": [200],
        "num_items": [25],
        "num_classes": [5],
        "item_weight_ranges": [[0.05, 0.15]],
        "setup_weight_ranges": [[0.01, 0.10]],
        "setup_cost_flags": [0],
        "seeds": [7]
    }"#;

    let config: GenerationConfig = serde_json::from_str(json).expect("parse config");
    assert_eq!(config.min_items_per_class, bpps_core::DEFAULT_MIN_ITEMS_PER_CLASS);
    assert_eq!(config.bin_cost, bpps_core::DEFAULT_BIN_COST);
    assert_eq!(
        config.output_directory,
        std::path::PathBuf::from("./generated_instances")
    );
    assert_eq!(config.job_count(), 1);
}

#[test]
fn default_sweep_has_480_jobs() {
    assert_eq!(GenerationConfig::default().job_count(), 480);
}
