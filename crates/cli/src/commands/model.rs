use anyhow::{Result, bail};
use chatlist_core::{CredentialResolver, EnvCredentialResolver, ModelId, ModelInput};
use chatlist_storage::{ModelStore, Storage};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::json;

use crate::print_json;

#[derive(Args)]
pub struct ModelArgs {
    /// Unique display name
    #[arg(long)]
    name: String,
    /// Chat-completion endpoint
    #[arg(long)]
    api_url: String,
    /// Name of the environment variable holding the API key
    #[arg(long)]
    api_id: String,
    /// Register the model as inactive
    #[arg(long)]
    inactive: bool,
}

impl ModelArgs {
    fn to_input(&self) -> ModelInput {
        ModelInput::new(self.name.as_str(), self.api_url.as_str(), self.api_id.as_str(), !self.inactive)
    }
}

#[derive(Subcommand)]
pub enum ModelCommands {
    /// Register a model
    Add(ModelArgs),
    /// Replace every field of an existing model
    Update {
        id: ModelId,
        #[command(flatten)]
        args: ModelArgs,
    },
    /// List models ordered by name
    List {
        /// Only models included in fan-out
        #[arg(short, long)]
        active: bool,
        /// Substring of the model name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Include a model in fan-out
    Activate { id: ModelId },
    /// Exclude a model from fan-out
    Deactivate { id: ModelId },
    /// Delete a model; its recorded answers are kept without a model reference
    Delete { id: ModelId },
    /// Report which active models have a resolvable API key
    Check,
}

#[derive(Serialize)]
struct CredentialStatus {
    id: ModelId,
    name: String,
    api_id: String,
    available: bool,
}

pub(crate) async fn run(storage: &Storage, cmd: ModelCommands) -> Result<()> {
    match cmd {
        ModelCommands::Add(args) => print_json(&ModelStore::upsert_model(storage, None, &args.to_input()).await?),
        ModelCommands::Update { id, args } => {
            print_json(&ModelStore::upsert_model(storage, Some(id), &args.to_input()).await?)
        },
        ModelCommands::List { active, search } => {
            if active && search.is_some() {
                bail!("--active cannot be combined with --search");
            }
            let models = if active {
                ModelStore::list_active_models(storage).await?
            } else {
                ModelStore::list_models(storage, search.as_deref()).await?
            };
            print_json(&models)
        },
        ModelCommands::Activate { id } => set_active(storage, id, true).await,
        ModelCommands::Deactivate { id } => set_active(storage, id, false).await,
        ModelCommands::Delete { id } => {
            let orphaned = ModelStore::delete_model(storage, id).await?;
            print_json(&json!({ "deleted": id, "results_orphaned": orphaned }))
        },
        ModelCommands::Check => {
            let resolver = EnvCredentialResolver;
            let statuses: Vec<CredentialStatus> = ModelStore::list_active_models(storage)
                .await?
                .into_iter()
                .map(|m| {
                    let available = resolver.is_available(&m.api_id);
                    if !available {
                        tracing::warn!(model = %m.name, api_id = %m.api_id, "API key not configured");
                    }
                    CredentialStatus { id: m.id, name: m.name, api_id: m.api_id, available }
                })
                .collect();
            print_json(&statuses)
        },
    }
}

async fn set_active(storage: &Storage, id: ModelId, active: bool) -> Result<()> {
    ModelStore::set_model_active(storage, id, active).await?;
    print_json(&json!({ "id": id, "is_active": active }))
}
