//! Command-line interface for chatpad.
//!
//! Without a subcommand the GUI starts. `detect` and `run` work on a file
//! headlessly through the same detection and execution pipeline.

use anyhow::{Context, Result};
use chatpad_config::Config;
use chatpad_exec::{HttpExecutor, JsEvaluator, Language, OutputStatus, RemoteRunner, RunReport};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// chatpad - a multi-tab code snippet editor
#[derive(Parser)]
#[command(name = "chatpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the remote execution endpoint
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Language argument for the `run` subcommand
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LanguageArg {
    Auto,
    Javascript,
    Python,
    Java,
    Php,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Auto => Language::Auto,
            LanguageArg::Javascript => Language::JavaScript,
            LanguageArg::Python => Language::Python,
            LanguageArg::Java => Language::Java,
            LanguageArg::Php => Language::Php,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the language detected for a file
    Detect {
        file: PathBuf,
    },

    /// Run a file and print the output panel text
    Run {
        file: PathBuf,

        /// Language to run as (detected from the content by default)
        #[arg(long, value_enum, default_value = "auto")]
        language: LanguageArg,
    },
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Remote execution endpoint override
    pub endpoint: Option<String>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Load the config this run should use.
    ///
    /// A missing or broken file falls back to defaults so the editor still
    /// starts. The endpoint override is applied last and is dropped with a
    /// warning if the result no longer validates.
    pub fn load_config(&self) -> Config {
        let loaded = match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        let mut config = loaded.unwrap_or_else(|e| {
            log::warn!("Using default configuration: {:#}", e);
            Config::default()
        });

        if let Some(endpoint) = &self.endpoint {
            let configured = std::mem::replace(&mut config.execution.endpoint, endpoint.clone());
            if let Err(e) = config.validate() {
                log::warn!("Ignoring --endpoint override: {e}");
                config.execution.endpoint = configured;
            }
        }
        config
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Parse process arguments and handle subcommands
pub fn process_cli() -> CliResult {
    process(Cli::parse())
}

/// Handle already-parsed arguments
pub fn process(cli: Cli) -> CliResult {
    let options = RuntimeOptions {
        config_path: cli.config,
        endpoint: cli.endpoint,
        log_level: cli.log_level.map(LogLevelArg::to_level_filter),
    };

    match cli.command {
        Some(Commands::Detect { file }) => exit_code(detect_cli(&file)),
        Some(Commands::Run { file, language }) => {
            exit_code(run_cli(&file, language.into(), &options))
        }
        None => CliResult::Continue(options),
    }
}

fn exit_code(result: Result<i32>) -> CliResult {
    match result {
        Ok(code) => CliResult::Exit(code),
        Err(e) => {
            eprintln!("chatpad: error: {e:#}");
            CliResult::Exit(1)
        }
    }
}

fn read_snippet(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn detect_cli(file: &Path) -> Result<i32> {
    let code = read_snippet(file)?;
    println!("{}", Language::detect(&code));
    Ok(0)
}

/// Run `code` the way the Run button does, minus the surface.
pub fn run_snippet(code: &str, language: Language, config: &Config) -> RunReport {
    let code = code.trim();
    if code.is_empty() {
        return RunReport::warning("Please enter some code first.");
    }

    let language = language.effective(code);
    if language.runs_remotely() {
        let execution = &config.execution;
        let executor = HttpExecutor::new(
            execution.endpoint.clone(),
            Duration::from_secs(execution.timeout_secs),
        );
        RemoteRunner::new(Arc::new(executor), &execution.endpoint).run(code, language)
    } else {
        JsEvaluator::new(config.execution.max_loop_iterations).run(code)
    }
}

fn run_cli(file: &Path, language: Language, options: &RuntimeOptions) -> Result<i32> {
    let code = read_snippet(file)?;
    let config = options.load_config();
    let report = run_snippet(&code, language, &config);

    println!("{}", report.text);
    Ok(match report.status {
        OutputStatus::Error => 1,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gui_flags() {
        let cli = Cli::parse_from([
            "chatpad",
            "--log-level",
            "debug",
            "--endpoint",
            "http://127.0.0.1:9000/run",
        ]);
        assert!(cli.command.is_none());
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000/run"));

        match process(cli) {
            CliResult::Continue(options) => {
                assert_eq!(options.log_level, Some(log::LevelFilter::Debug));
            }
            CliResult::Exit(_) => panic!("expected the GUI to start"),
        }
    }

    #[test]
    fn test_parse_run_subcommand() {
        let cli = Cli::parse_from(["chatpad", "run", "snippet.py", "--language", "python"]);
        match cli.command {
            Some(Commands::Run { file, language }) => {
                assert_eq!(file, PathBuf::from("snippet.py"));
                assert_eq!(Language::from(language), Language::Python);
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_run_snippet_locally() {
        let report = run_snippet("  2 + 2  ", Language::Auto, &Config::default());
        assert_eq!(report.text, "Result: 4");

        let report = run_snippet("   ", Language::Auto, &Config::default());
        assert_eq!(report.status, OutputStatus::Warning);
    }

    #[test]
    fn test_load_config_applies_endpoint_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = RuntimeOptions {
            config_path: Some(dir.path().join("config.yaml")),
            endpoint: Some("https://exec.example.com/api".to_string()),
            log_level: None,
        };
        let config = options.load_config();
        assert_eq!(config.execution.endpoint, "https://exec.example.com/api");
        assert!(dir.path().join("config.yaml").exists());
    }

    #[test]
    fn test_invalid_endpoint_override_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        for endpoint in ["ftp://exec.example.com/api", "not a url"] {
            let options = RuntimeOptions {
                config_path: Some(dir.path().join("config.yaml")),
                endpoint: Some(endpoint.to_string()),
                log_level: None,
            };
            let config = options.load_config();
            assert_eq!(
                config.execution.endpoint,
                Config::default().execution.endpoint
            );
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_missing_file_is_an_error_exit() {
        let cli = Cli::parse_from(["chatpad", "detect", "/nonexistent/snippet.txt"]);
        assert!(matches!(process(cli), CliResult::Exit(1)));
    }
}
