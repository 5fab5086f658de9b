//! suite-runner - Sequential trigger runner for remote test suites
//!
//! Fires a fixed, ordered list of remote test-suite endpoints one at a time,
//! waits between triggers, records whether each trigger was accepted and
//! writes the outcome to `test-results-<epoch_ms>.json`.
//!
//! A successful trigger means the remote service started the suite. The
//! suites' own verdicts are collected server-side and published with
//! `upload-report`.
//!
//! ## Usage
//!
//! ```bash
//! # Trigger every configured suite against the default service
//! suite-runner run
//!
//! # Different host, shorter pause, skip one suite
//! suite-runner run --base-url http://10.0.0.5:8000 --delay-ms 2000 --skip test-voice-type
//!
//! # Inspect the newest report
//! suite-runner results --latest
//!
//! # Publish the remote report once the suites have finished
//! suite-runner upload-report
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod results;
mod utils;

use cli::Args;
use config::{ConfigFile, EnvConfig, RunnerConfig};
use executor::SequentialRunner;
use http::HttpClient;
use output::{OutputFormat, ResultFormatter};
use results::ResultsStorage;
use utils::LogLevel;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let level = match args.log_level.as_deref().or(env.log_level.as_deref()) {
        Some(name) => LogLevel::from_str(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown log level: {name}"))?,
        None if args.verbose => LogLevel::Debug,
        None => LogLevel::Warn,
    };
    utils::init_logger(level);

    let config = resolve_config(&args, &env)?;
    let colorize = !(args.no_color || env.no_color.unwrap_or(false));

    match args.command {
        cli::Command::Run(run_args) => {
            run_tests(config, run_args, colorize).await?;
        }
        cli::Command::List(list_args) => {
            list_suites(&config, list_args)?;
        }
        cli::Command::Results(results_args) => {
            show_results(&config, results_args, colorize)?;
        }
        cli::Command::UploadReport(upload_args) => {
            upload_report(&config, upload_args).await?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config, &env, config_args)?;
        }
    }

    Ok(())
}

/// Defaults, then config file, then environment
fn resolve_config(args: &Args, env: &EnvConfig) -> Result<RunnerConfig> {
    let explicit = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(PathBuf::from));

    let file = ConfigFile::resolve(explicit.as_deref())?;
    let mut config = file.runner;
    config.apply_env(env);
    Ok(config)
}

fn formatter(colorize: bool) -> ResultFormatter {
    let formatter = ResultFormatter::default();
    if colorize {
        formatter
    } else {
        formatter.no_color()
    }
}

async fn run_tests(mut config: RunnerConfig, args: cli::RunArgs, colorize: bool) -> Result<()> {
    if let Some(url) = args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(delay) = args.delay_ms {
        config = config.with_delay_ms(delay);
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    config.skip_endpoints(&args.skip);
    config.validate().context("Invalid runner configuration")?;

    let runner = SequentialRunner::new(config)?.with_formatter(formatter(colorize));
    let outcome = runner.run_all_tests().await?;

    info!(
        "Report written to {} ({} triggers)",
        outcome.report_path.display(),
        outcome.summary.total
    );
    println!("{}", formatter(colorize).format_completed(&outcome.summary));

    Ok(())
}

fn list_suites(config: &RunnerConfig, args: cli::ListArgs) -> Result<()> {
    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;

    let formatter = ResultFormatter::new(format);
    println!("{}", formatter.format_cases(&config.endpoints, args.detailed)?);
    Ok(())
}

fn show_results(config: &RunnerConfig, args: cli::ResultsArgs, colorize: bool) -> Result<()> {
    let storage = ResultsStorage::new(args.output_dir.unwrap_or_else(|| config.output_dir.clone()));
    let formatter = formatter(colorize);

    let path = match (args.file, args.latest) {
        (Some(file), _) => Some(file),
        (None, true) => Some(
            storage
                .latest()?
                .ok_or_else(|| {
                    anyhow::anyhow!("No reports found in {}", storage.base_dir().display())
                })?
                .path,
        ),
        (None, false) => None,
    };

    match path {
        Some(path) => {
            let results = storage.load(&path)?;
            println!("Report: {}\n", path.display());
            for result in &results {
                println!("{}", formatter.format_result(result));
            }
            println!("\n{}", models::RunSummary::from_results(&results));
        }
        None => {
            let reports = storage.list_reports()?;
            if reports.is_empty() {
                println!("No reports found in {}", storage.base_dir().display());
                return Ok(());
            }
            for report in reports {
                let written = report
                    .written_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| report.epoch_ms.to_string());
                println!("{}  {}  {}", written, report.path.display(), report.summary);
            }
        }
    }

    Ok(())
}

async fn upload_report(config: &RunnerConfig, args: cli::UploadArgs) -> Result<()> {
    let base_url = args.base_url.unwrap_or_else(|| config.base_url.clone());
    let timeout = args.timeout.unwrap_or(config.timeout_secs);

    let client = HttpClient::new(&base_url, timeout)?;
    let response = http::request_report_upload(&client).await?.into_result()?;

    if let Some(message) = &response.message {
        println!("{message}");
    }
    if let Some(folder) = &response.report_folder {
        println!("Report folder: {folder}");
    }
    if let Some(url) = &response.public_url {
        println!("Public URL:    {url}");
    }
    if let Some(url) = &response.gcs_console_url {
        println!("Console URL:   {url}");
    }

    Ok(())
}

fn manage_config(config: RunnerConfig, env: &EnvConfig, args: cli::ConfigArgs) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show => {
            let file = ConfigFile {
                runner: config,
                ..ConfigFile::default()
            };
            let yaml = serde_yaml::to_string(&file).context("Failed to serialize config")?;
            println!("{yaml}");
        }
        cli::ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            ConfigFile::example().save(&path)?;
            println!("Wrote example configuration to {}", path.display());
        }
        cli::ConfigAction::Env => {
            config::print_env_help();
            if env.has_any() {
                println!();
                env.print_summary();
            }
        }
    }

    Ok(())
}
