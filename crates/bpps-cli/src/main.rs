mod registry;
mod report;
mod workspace;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use bpps_core::{GenerationConfig, ValidationIssue, ValidationReport, config_json_schema};
use bpps_generate::{GenerateOptions, GenerationEngine, GenerationError, read_instance, write_instance};
use clap::{Args, Parser, Subcommand};
use registry::{RunContext, init_console_logging, init_run_logging, start_run, write_statistics};
use report::{render_instance_summary, render_report};
use thiserror::Error;
use uuid::Uuid;
use workspace::{WorkspaceError, load_config, save_config};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bpps", version, about = "BPPS benchmark instance generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every instance of a parameter sweep.
    Generate(GenerateArgs),
    /// Write the default configuration to a JSON file.
    InitConfig(InitConfigArgs),
    /// Check a configuration file without generating anything.
    ValidateConfig(ValidateConfigArgs),
    /// Print the JSON Schema of configuration files.
    Schema,
    /// Parse an instance file and print a summary.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to a JSON configuration file. Defaults to the built-in sweep.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
    /// Output directory for generated instances (overrides the config file).
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,
    /// Build instances on all cores.
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Maximum number of failed combinations listed in the report.
    #[arg(long, default_value_t = 20)]
    max_failures: usize,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Destination of the configuration file.
    path: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateConfigArgs {
    /// Configuration file to check.
    path: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Instance file in the BPPS text format.
    path: PathBuf,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::InitConfig(args) => run_init_config(args),
        Command::ValidateConfig(args) => run_validate_config(args),
        Command::Schema => run_schema(),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config: config_path,
        output_dir,
        parallel,
        max_failures,
    } = args;

    // Config warnings are logged by the engine once logging is set up.
    let mut config = match &config_path {
        Some(path) => {
            let validated = load_config(path).inspect_err(print_validation_failure)?;
            eprintln!("Loaded configuration from {}", path.display());
            validated.config
        }
        None => {
            eprintln!("Using default configuration");
            GenerationConfig::default()
        }
    };

    if let Some(output_dir) = output_dir {
        eprintln!("Output directory overridden to: {}", output_dir.display());
        config.output_directory = output_dir;
    }

    let run_ctx = RunContext {
        run_id: Uuid::new_v4().to_string(),
        started_at: chrono::Utc::now(),
        config_source: config_path,
        parallel,
        config,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_ctx.run_id,
        output_dir = %run_paths.output_dir.display(),
        jobs = run_ctx.config.job_count()
    );

    let timer = Instant::now();
    let bytes_written = AtomicU64::new(0);
    let engine = GenerationEngine::new(GenerateOptions { parallel });
    let output_dir = run_paths.output_dir.as_path();

    let statistics = engine.run(&run_ctx.config, |job, instance| {
        let bytes = write_instance(output_dir, job, instance)?;
        bytes_written.fetch_add(bytes, Ordering::Relaxed);
        Ok(())
    })?;

    let report = statistics.report();
    write_statistics(&run_paths, &report)?;
    tracing::info!(
        event = "statistics_written",
        path = %run_paths.statistics_path.display()
    );

    tracing::info!(
        event = "run_finished",
        status = "success",
        instances = statistics.successful,
        bytes_written = bytes_written.load(Ordering::Relaxed),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    println!("{}", render_report(&report, &run_paths.output_dir, max_failures));
    println!("Run metadata saved to {}", run_paths.run_path.display());
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    save_config(&args.path, &GenerationConfig::default())?;
    println!("Default configuration saved to {}", args.path.display());
    Ok(())
}

fn run_validate_config(args: ValidateConfigArgs) -> Result<(), CliError> {
    init_console_logging();
    let validated = load_config(&args.path).inspect_err(print_validation_failure)?;

    for issue in &validated.warnings {
        print_issue("warning", issue);
    }
    println!(
        "{} is valid: {} jobs",
        args.path.display(),
        validated.config.job_count()
    );
    Ok(())
}

fn run_schema() -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&config_json_schema())?);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let instance = read_instance(&args.path)?;
    let name = args
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());
    println!("{}", render_instance_summary(&name, &instance));
    Ok(())
}

fn print_validation_failure(err: &WorkspaceError) {
    if let WorkspaceError::Validation(report) = err {
        print_report(report);
    }
}

fn print_report(report: &ValidationReport) {
    for issue in &report.errors {
        print_issue("error", issue);
    }
    for issue in &report.warnings {
        print_issue("warning", issue);
    }
}

fn print_issue(level: &str, issue: &ValidationIssue) {
    let hint = issue
        .hint
        .as_ref()
        .map(|hint| format!(" (hint: {hint})"))
        .unwrap_or_default();
    eprintln!(
        "{level} [{}] {}: {}{}",
        issue.code, issue.path, issue.message, hint
    );
}
