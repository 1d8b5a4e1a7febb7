use std::collections::{BTreeMap, HashSet};

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::config::{FractionRange, GenerationConfig};
use crate::error::{Error, Result};
use crate::schema::config_json_schema;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint,
        }
    }

    fn error(code: &str, path: impl Into<String>, message: impl Into<String>, hint: &str) -> Self {
        Self::new(
            IssueSeverity::Error,
            code,
            path,
            message,
            Some(hint.to_string()),
        )
    }

    fn warning(code: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Warning, code, path, message, None)
    }
}

/// Aggregated validation report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert a failed report into a single configuration error.
    pub fn into_result(self) -> Result<Vec<ValidationIssue>> {
        if self.is_ok() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::InvalidConfig(message))
    }
}

/// Config accepted by validation, with accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: GenerationConfig,
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a config JSON document against the derived config JSON Schema.
pub fn validate_config_json(config_json: &Value) -> Result<ValidationReport> {
    let schema = serde_json::to_value(config_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| Error::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(config_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Check the semantic invariants of a parsed config.
///
/// Errors make the sweep impossible to run; warnings flag combinations that
/// will fail or collide at runtime.
pub fn validate_config(config: &GenerationConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_list(&config.capacities, "capacities", &mut report);
    check_list(&config.num_items, "num_items", &mut report);
    check_list(&config.num_classes, "num_classes", &mut report);
    check_list(&config.item_weight_ranges, "item_weight_ranges", &mut report);
    check_list(&config.setup_weight_ranges, "setup_weight_ranges", &mut report);
    check_list(&config.setup_cost_flags, "setup_cost_flags", &mut report);
    check_list(&config.seeds, "seeds", &mut report);

    check_positive(&config.capacities, "capacities", &mut report);
    check_positive(&config.num_items, "num_items", &mut report);
    check_positive(&config.num_classes, "num_classes", &mut report);
    check_duplicates(&config.setup_cost_flags, "setup_cost_flags", &mut report);
    check_duplicates(&config.seeds, "seeds", &mut report);

    check_ranges(&config.item_weight_ranges, "item_weight_ranges", &mut report);
    check_ranges(&config.setup_weight_ranges, "setup_weight_ranges", &mut report);

    for (idx, flag) in config.setup_cost_flags.iter().enumerate() {
        if *flag > 1 {
            report.push_error(ValidationIssue::error(
                "flag_invalid",
                format!("/setup_cost_flags/{idx}"),
                format!("setup cost flag must be 0 or 1, found {flag}"),
                "use 0 for no setup costs and 1 for negative setup costs",
            ));
        }
    }

    if config.min_items_per_class == 0 {
        report.push_error(ValidationIssue::error(
            "min_items_zero",
            "/min_items_per_class",
            "min_items_per_class must be at least 1",
            "set min_items_per_class to a positive integer",
        ));
    }

    if config.bin_cost == 0 {
        report.push_error(ValidationIssue::error(
            "bin_cost_zero",
            "/bin_cost",
            "bin_cost must be greater than zero",
            "set bin_cost to a positive integer",
        ));
    }

    check_feasibility(config, &mut report);

    report
}

/// Validate a config document end-to-end, returning structured issues on failure.
pub fn validate_config_document(
    config_json: &Value,
) -> std::result::Result<ValidatedConfig, ValidationReport> {
    let structural = match validate_config_json(config_json) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_validation_error",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    if !structural.is_ok() {
        return Err(structural);
    }

    let config: GenerationConfig = match serde_json::from_value(config_json.clone()) {
        Ok(config) => config,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "invalid_config_json",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    let semantic = validate_config(&config);
    if !semantic.is_ok() {
        return Err(semantic);
    }

    Ok(ValidatedConfig {
        config,
        warnings: semantic.warnings,
    })
}

fn check_list<T>(values: &[T], key: &str, report: &mut ValidationReport) {
    if values.is_empty() {
        report.push_error(ValidationIssue::error(
            "list_empty",
            format!("/{key}"),
            format!("{key} must contain at least one value"),
            "an empty list produces an empty sweep",
        ));
    }
}

fn check_positive<T>(values: &[T], key: &str, report: &mut ValidationReport)
where
    T: Copy + Default + std::fmt::Display + std::hash::Hash + Eq,
{
    for (idx, value) in values.iter().enumerate() {
        if *value == T::default() {
            report.push_error(ValidationIssue::error(
                "value_zero",
                format!("/{key}/{idx}"),
                format!("{key} values must be greater than zero"),
                "remove the zero entry",
            ));
        }
    }
    check_duplicates(values, key, report);
}

fn check_duplicates<T>(values: &[T], key: &str, report: &mut ValidationReport)
where
    T: Copy + std::fmt::Display + std::hash::Hash + Eq,
{
    let mut seen = HashSet::new();
    for (idx, value) in values.iter().enumerate() {
        if !seen.insert(*value) {
            report.push_warning(ValidationIssue::warning(
                "duplicate_value",
                format!("/{key}/{idx}"),
                format!("{key} lists {value} more than once; instances will be overwritten"),
            ));
        }
    }
}

fn check_ranges(ranges: &[FractionRange], key: &str, report: &mut ValidationReport) {
    let mut names: BTreeMap<(u32, u32), usize> = BTreeMap::new();

    for (idx, range) in ranges.iter().enumerate() {
        let path = format!("/{key}/{idx}");
        if range.min() > range.max() {
            report.push_error(ValidationIssue::error(
                "range_inverted",
                path.clone(),
                format!("range {range} has min greater than max"),
                "swap the bounds so that min <= max",
            ));
        }
        if !range.is_valid() && range.min() <= range.max() {
            report.push_error(ValidationIssue::error(
                "range_out_of_bounds",
                path.clone(),
                format!("range {range} must lie within (0, 1]"),
                "express bounds as fractions of the capacity",
            ));
        }

        if let Some(previous) = names.insert(range.percent_bounds(), idx) {
            report.push_warning(ValidationIssue::warning(
                "range_name_collision",
                path,
                format!(
                    "range {range} maps to the same filename percentages as /{key}/{previous}"
                ),
            ));
        }
    }
}

fn check_feasibility(config: &GenerationConfig, report: &mut ValidationReport) {
    let min = u64::from(config.min_items_per_class);
    for &classes in &config.num_classes {
        for &items in &config.num_items {
            if u64::from(items) < u64::from(classes) * min {
                report.push_warning(ValidationIssue::warning(
                    "infeasible_combination",
                    "/num_items",
                    format!(
                        "{items} items cannot give {classes} classes at least {min} items each; \
                         these jobs will fail"
                    ),
                ));
            }
        }
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let report = validate_config(&GenerationConfig::default());
        assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn inverted_range_is_reported_once() {
        let mut config = GenerationConfig::default();
        config.item_weight_ranges = vec![FractionRange(0.3, 0.1)];
        let report = validate_config(&config);
        let codes: Vec<&str> = report.errors.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["range_inverted"]);
        assert_eq!(report.errors[0].path, "/item_weight_ranges/0");
    }

    #[test]
    fn repeated_seeds_and_flags_are_flagged() {
        let mut config = GenerationConfig::default();
        config.seeds = vec![0, 1, 0];
        config.setup_cost_flags = vec![1, 1];
        let report = validate_config(&config);
        assert!(report.is_ok());
        let paths: Vec<&str> = report.warnings.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/setup_cost_flags/1", "/seeds/2"]);
        assert!(report.warnings.iter().all(|i| i.code == "duplicate_value"));
    }
}
