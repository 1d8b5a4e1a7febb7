use std::path::Path;

use bpps_core::BenchmarkInstance;
use bpps_generate::StatisticsReport;

/// Render a deterministic summary of a generation sweep.
pub fn render_report(report: &StatisticsReport, output_dir: &Path, max_failures: usize) -> String {
    let mut lines = Vec::new();

    lines.push("# BPPS Generation Report".to_string());
    lines.push(String::new());
    lines.push(format!("- output_directory: {}", output_dir.display()));
    lines.push(format!("- total_attempted: {}", report.total_attempted));
    lines.push(format!("- successful: {}", report.successful));
    lines.push(format!("- failed: {}", report.failed));
    lines.push(format!("- success_rate: {:.2}%", report.success_rate));

    if !report.failed_instances.is_empty() {
        lines.push(String::new());
        lines.push("## Failed combinations".to_string());
        lines.push("| d | n | m | v | s | f | seed | reason |".to_string());
        lines.push("| --- | --- | --- | --- | --- | --- | --- | --- |".to_string());
        for record in report.failed_instances.iter().take(max_failures) {
            let job = &record.job;
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                job.capacity,
                job.item_count,
                job.class_count,
                job.item_weight_range,
                job.setup_weight_range,
                job.setup_cost_flag,
                job.seed,
                record.reason
            ));
        }
        let hidden = report.failed_instances.len().saturating_sub(max_failures);
        if hidden > 0 {
            lines.push(format!("- {hidden} more in generation_statistics.json"));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Render a short description of a parsed instance file.
pub fn render_instance_summary(name: &str, instance: &BenchmarkInstance) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {name}"));
    lines.push(format!(
        "- items: {}, classes: {}, capacity: {}, bin_cost: {}",
        instance.item_count, instance.class_count, instance.capacity, instance.bin_cost
    ));
    lines.push(format!("- total item weight: {}", instance.total_item_weight()));
    match instance.check_structure() {
        Ok(()) => lines.push("- structure: ok".to_string()),
        Err(problem) => lines.push(format!("- structure: {problem}")),
    }
    lines.push("| class | setup_cost | setup_weight | items | min_w | max_w |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for (idx, class) in instance.classes.iter().enumerate() {
        let min = class.item_weights.iter().min().copied().unwrap_or(0);
        let max = class.item_weights.iter().max().copied().unwrap_or(0);
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            idx + 1,
            class.setup_cost,
            class.setup_weight,
            class.item_count(),
            min,
            max
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}
