/*
[INPUT]:  CLI arguments, optional YAML configuration file
[OUTPUT]: Location-gated field form in TUI, prompt or one-shot submit mode
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or front-end selection
*/

mod cli;
mod tui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use fieldform_app::AppConfig;
use fieldform_app::logging::{LOG_BUFFER_CAPACITY, LogBuffer, LogTarget, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "fieldform", version, about = "Location-gated field data collection")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[arg(long = "dry-run", global = true, help = "Validate configuration and exit")]
    dry_run: bool,
    #[arg(
        long = "payload",
        value_name = "JSON",
        global = true,
        help = "Use a fixed location payload instead of the configured provider"
    )]
    payload: Option<String>,
    #[arg(
        long = "store",
        value_name = "PATH",
        global = true,
        help = "Write accepted submissions to this JSON file"
    )]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full-screen terminal form (default)
    Tui,
    /// Step-by-step prompts
    Prompt,
    /// Submit one record without interaction
    Submit(cli::submit::SubmitArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Cli::parse();
    let command = args.command.unwrap_or(Commands::Tui);

    let mut config = load_config(args.config_path.as_deref())?;
    if let Some(payload) = args.payload {
        config = config.with_static_payload(payload);
    }
    if let Some(store) = args.store {
        config.storage.path = Some(store);
    }

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let target = match (&config.logging.directory, &command) {
        (Some(dir), _) => LogTarget::Directory(dir.clone()),
        (None, Commands::Tui) if !args.dry_run => LogTarget::Buffer(log_buffer.clone()),
        (None, _) => LogTarget::Stderr,
    };
    let _log_guard = init_tracing(&args.log_level, target)?;

    info!(
        config_path = ?args.config_path,
        dry_run = args.dry_run,
        "starting fieldform"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(ExitCode::SUCCESS);
    }

    match command {
        Commands::Tui => {
            tui::run_tui_with_log(&config, log_buffer).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Prompt => {
            cli::prompt::run_prompt(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submit(submit_args) => cli::submit::run_submit(&config, submit_args).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    AppConfig::from_file(path_str).context("load config")
}
