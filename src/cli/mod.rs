//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sequential trigger runner for remote end-to-end test suites
#[derive(Parser, Debug)]
#[command(name = "suite-runner")]
#[command(version)]
#[command(about = "Trigger remote test suites one by one and record the outcome")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trigger all configured suites in order
    Run(RunArgs),

    /// List configured suites
    List(ListArgs),

    /// Inspect saved test-results reports
    Results(ResultsArgs),

    /// Ask the test service to generate and publish its report
    UploadReport(UploadArgs),

    /// Show or create configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Base URL of the test service
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Pause between triggers in milliseconds
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Directory for the test-results report
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip endpoints (comma-separated, e.g. test-login,/test-voice-type)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show categories
    #[arg(short, long)]
    pub detailed: bool,

    /// Output format (table, json, json-pretty)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Arguments for results command
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Show a specific report file
    pub file: Option<PathBuf>,

    /// Show the newest report in the output directory
    #[arg(short, long)]
    pub latest: bool,

    /// Directory containing reports
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for upload-report command
#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Base URL of the test service
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write an example configuration file
    Init {
        /// Destination path
        #[arg(default_value = "suite-runner.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Describe supported environment variables
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "suite-runner",
            "run",
            "--base-url",
            "http://10.0.0.1:8000",
            "--delay-ms",
            "100",
            "--skip",
            "test-login,/test-voice-type",
        ]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.base_url.as_deref(), Some("http://10.0.0.1:8000"));
                assert_eq!(run_args.delay_ms, Some(100));
                assert_eq!(run_args.skip, vec!["test-login", "/test-voice-type"]);
                assert!(run_args.timeout.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Args::parse_from(["suite-runner", "list", "--no-color", "-c", "x.yaml"]);
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("x.yaml")));
        assert!(matches!(args.command, Command::List(_)));
    }

    #[test]
    fn test_upload_report_subcommand() {
        let args = Args::parse_from(["suite-runner", "upload-report", "-t", "120"]);
        match args.command {
            Command::UploadReport(upload) => assert_eq!(upload.timeout, Some(120)),
            _ => panic!("Expected UploadReport command"),
        }
    }

    #[test]
    fn test_config_init_default_path() {
        let args = Args::parse_from(["suite-runner", "config", "init"]);
        match args.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { path, force },
            }) => {
                assert_eq!(path, PathBuf::from("suite-runner.yaml"));
                assert!(!force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
