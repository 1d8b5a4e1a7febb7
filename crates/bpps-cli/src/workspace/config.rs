use std::path::Path;

use bpps_core::{GenerationConfig, ValidatedConfig, validate_config_document};
use serde_json::Value;

use super::atomic::write_json_atomic;
use super::{WorkspaceError, WorkspaceResult};

/// Read and validate a JSON config file.
pub fn load_config(path: &Path) -> WorkspaceResult<ValidatedConfig> {
    let contents = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;
    validate_config_document(&document).map_err(WorkspaceError::Validation)
}

pub fn save_config(path: &Path, config: &GenerationConfig) -> WorkspaceResult<()> {
    write_json_atomic(path, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("bpps_cli_config_{}", uuid::Uuid::new_v4()));
        dir.join(name)
    }

    #[test]
    fn saved_default_loads_back() {
        let path = temp_file("default.json");
        save_config(&path, &GenerationConfig::default()).expect("save config");

        let loaded = load_config(&path).expect("load config");
        assert_eq!(loaded.config, GenerationConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn invalid_config_reports_issues() {
        let path = temp_file("broken.json");
        let mut config = GenerationConfig::default();
        config.setup_cost_flags = vec![3];
        save_config(&path, &config).expect("save config");

        match load_config(&path) {
            Err(WorkspaceError::Validation(report)) => {
                assert_eq!(report.errors[0].code, "flag_invalid");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
