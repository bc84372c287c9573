use std::path::PathBuf;

use anyhow::Result;
use chatlist_core::constants::{APP_DIR_NAME, DB_FILE_NAME, DB_PATH_ENV};
use chatlist_core::env_config::env_path;
use chatlist_storage::Storage;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::export::ExportFormat;
use commands::model::ModelCommands;
use commands::prompt::PromptCommands;
use commands::result::ResultCommands;
use commands::setting::SettingCommands;

#[derive(Parser)]
#[command(name = "chatlist")]
#[command(about = "Store prompts, models and their answers for side-by-side comparison", long_about = None)]
struct Cli {
    /// Database file (overrides CHATLIST_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Saved prompts
    #[command(subcommand)]
    Prompt(PromptCommands),
    /// Model registry
    #[command(subcommand)]
    Model(ModelCommands),
    /// Recorded answers
    #[command(subcommand)]
    Result(ResultCommands),
    /// Application settings
    #[command(subcommand)]
    Setting(SettingCommands),
    /// Row counts across the store
    Stats,
    /// Dump prompts with their answers
    Export {
        /// Destination file; defaults to the export_path setting, then stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

fn app_data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

pub(crate) fn get_db_path(cli_db: Option<PathBuf>) -> PathBuf {
    cli_db.or_else(|| env_path(DB_PATH_ENV)).unwrap_or_else(|| app_data_dir().join(DB_FILE_NAME))
}

/// `.env` in the app data dir wins over one in the working directory.
fn load_env_file() {
    let candidates = [app_data_dir().join(".env"), PathBuf::from(".env")];
    for path in candidates.iter().filter(|p| p.is_file()) {
        match dotenvy::from_path_override(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Loaded environment file");
                return;
            },
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to load environment file"),
        }
    }
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    load_env_file();

    let cli = Cli::parse();
    let db_path = get_db_path(cli.db);
    let storage = Storage::new(&db_path)?;

    match cli.command {
        Commands::Prompt(cmd) => commands::prompt::run(&storage, cmd).await?,
        Commands::Model(cmd) => commands::model::run(&storage, cmd).await?,
        Commands::Result(cmd) => commands::result::run(&storage, cmd).await?,
        Commands::Setting(cmd) => commands::setting::run(&storage, cmd).await?,
        Commands::Stats => commands::stats::run(&storage).await?,
        Commands::Export { output, format } => commands::export::run(&storage, output, format).await?,
    }

    Ok(())
}
