/*
[INPUT]:  CLI arguments, optional YAML configuration file, persisted session
[OUTPUT]: Task list operations against the task server
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use taskboard_adapter::TaskboardClient;
use taskboard_sync::{FileTokenStore, MemoryTokenStore, SyncConfig, TaskSyncController, TokenStore};

use cli::{Command, Session, run_command};

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Command-line client for the task scheduler")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Overrides `server_url` from the config file
    #[arg(long, env = "TASKBOARD_SERVER", value_name = "URL", global = true)]
    server: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    /// Keep the session in memory only
    #[arg(long = "no-persist", global = true)]
    no_persist: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<bool> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut config = load_config(args.config_path.as_ref())?;
    if let Some(server) = args.server {
        config.server_url = server;
    }
    info!(server = %config.server_url, "starting taskboard");

    let client = TaskboardClient::with_config_and_base_url(config.client_config(), &config.server_url)
        .context("build task server client")?;
    let store = token_store(&config, args.no_persist)?;

    let mut controller = TaskSyncController::new(client.clone(), store)
        .with_search_debounce(config.search_debounce())
        .with_notice_dismiss(config.notice_dismiss());
    let restored = controller.restore_session().await;
    debug!(restored, "session restore finished");

    let mut session = Session { controller, client };
    run_command(&mut session, args.command).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// Explicit `--config` must exist; the default location is optional.
fn load_config(path: Option<&PathBuf>) -> Result<SyncConfig> {
    if let Some(path) = path {
        return SyncConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()));
    }
    match SyncConfig::default_path() {
        Some(path) if path.exists() => {
            SyncConfig::from_file(&path).with_context(|| format!("load config {}", path.display()))
        }
        _ => Ok(SyncConfig::default()),
    }
}

fn token_store(config: &SyncConfig, no_persist: bool) -> Result<Box<dyn TokenStore>> {
    if no_persist {
        return Ok(Box::new(MemoryTokenStore::new()));
    }
    let store = match &config.token_path {
        Some(path) => FileTokenStore::new(path),
        None => FileTokenStore::in_data_dir().context("locate session file")?,
    };
    debug!(path = %store.path().display(), "using session file");
    Ok(Box::new(store))
}
