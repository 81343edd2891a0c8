use crate::config::{Config, DEFAULT_API_BASE};
use crate::score::ScoreMode;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "commitscore")]
#[command(about = "Daily commit statistics for a GitHub user's public activity")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "COMMITSCORE_API_BASE", default_value = DEFAULT_API_BASE, help = "Base URL of the GitHub REST API")]
    pub api_base: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn, help = "Log verbosity (RUST_LOG overrides)")]
    pub log_level: LogLevel,

    #[arg(long, help = "Hide the commit fetch progress bar", default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a user's pushed commits and chart lines changed per day
    Score {
        #[arg(help = "GitHub username")]
        username: String,

        #[arg(long, help = "Output as JSON", conflicts_with_all = ["ndjson", "interactive"])]
        json: bool,

        #[arg(long, help = "Output as NDJSON, one line per day", conflicts_with = "interactive")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// Dump the per-commit records behind a score
    Export {
        #[arg(help = "GitHub username")]
        username: String,

        #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn execute(self) -> Result<ExitCode> {
        init_logging(self.common.log_level);
        let config = Config::from_args(&self.common).context("Invalid configuration")?;

        match self.command {
            Commands::Score { username, json, ndjson, interactive } => {
                let mode = if json {
                    ScoreMode::Json
                } else if ndjson {
                    ScoreMode::Ndjson
                } else if interactive {
                    ScoreMode::Interactive
                } else {
                    ScoreMode::Console
                };
                let config = if mode == ScoreMode::Console {
                    config
                } else {
                    config.with_progress(false)
                };
                crate::score::exec(&config, &username, mode).await
            }
            Commands::Export { username, json, ndjson } => {
                let show_progress = config.show_progress && !(json || ndjson);
                let config = config.with_progress(show_progress);
                crate::export::exec(&config, &username, json, ndjson).await
            }
        }
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A second init in the same process (tests) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
