use anyhow::Result;
use chatlist_core::{ModelId, NewResult, PromptId, ResultId};
use chatlist_storage::{ResultFilter, ResultStore, Storage};
use clap::Subcommand;
use serde_json::json;

use crate::print_json;

#[derive(Subcommand)]
pub enum ResultCommands {
    /// Record a model's answer to a prompt
    Record {
        #[arg(long)]
        prompt: PromptId,
        /// Omit when the answer has no known source model
        #[arg(long)]
        model: Option<ModelId>,
        #[arg(long)]
        response: String,
        /// Mark the answer as preferred right away
        #[arg(long)]
        selected: bool,
    },
    /// List answers, newest first
    List {
        #[arg(long)]
        prompt: Option<PromptId>,
        #[arg(long)]
        model: Option<ModelId>,
        /// Only preferred answers
        #[arg(long)]
        selected: bool,
    },
    /// Mark an answer as preferred
    Select { id: ResultId },
    /// Clear the preferred mark
    Unselect { id: ResultId },
}

pub(crate) async fn run(storage: &Storage, cmd: ResultCommands) -> Result<()> {
    match cmd {
        ResultCommands::Record { prompt, model, response, selected } => {
            let new = NewResult::new(prompt, model, response).selected(selected);
            print_json(&ResultStore::record_result(storage, &new).await?)
        },
        ResultCommands::List { prompt, model, selected } => {
            let filter = ResultFilter { prompt_id: prompt, model_id: model, selected_only: selected };
            print_json(&ResultStore::list_results(storage, &filter).await?)
        },
        ResultCommands::Select { id } => mark(storage, id, true).await,
        ResultCommands::Unselect { id } => mark(storage, id, false).await,
    }
}

async fn mark(storage: &Storage, id: ResultId, selected: bool) -> Result<()> {
    ResultStore::set_selected(storage, id, selected).await?;
    print_json(&json!({ "id": id, "selected": selected }))
}
