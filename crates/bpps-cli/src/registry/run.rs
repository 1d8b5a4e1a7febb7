use std::fs::{OpenOptions, create_dir_all};
use std::path::PathBuf;
use std::process::Command;

use bpps_core::GenerationConfig;
use bpps_generate::StatisticsReport;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::workspace::write_json_atomic;

use super::RegistryResult;

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub config_source: Option<PathBuf>,
    pub parallel: bool,
    pub config: GenerationConfig,
}

/// JSON record written next to the generated instances.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub cli_version: &'static str,
    pub config_source: Option<&'a PathBuf>,
    pub parallel: bool,
    pub jobs: usize,
    pub config: &'a GenerationConfig,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub output_dir: PathBuf,
    pub run_path: PathBuf,
    pub logs_path: PathBuf,
    pub statistics_path: PathBuf,
}

/// Create the output directory and record how the run was configured.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let output_dir = ctx.config.output_directory.clone();
    create_dir_all(&output_dir)?;

    let run_path = output_dir.join("run.json");
    let logs_path = output_dir.join("logs.ndjson");
    let statistics_path = output_dir.join("generation_statistics.json");

    let record = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION"),
        config_source: ctx.config_source.as_ref(),
        parallel: ctx.parallel,
        jobs: ctx.config.job_count(),
        config: &ctx.config,
        git: collect_git_info(),
    };
    write_json_atomic(&run_path, &record)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        output_dir,
        run_path,
        logs_path,
        statistics_path,
    })
}

pub fn write_statistics(paths: &RunPaths, report: &StatisticsReport) -> RegistryResult<()> {
    write_json_atomic(&paths.statistics_path, report)?;
    Ok(())
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}
