use anyhow::{Result, bail};
use chatlist_core::PromptId;
use chatlist_core::constants::DEFAULT_QUERY_LIMIT;
use chatlist_storage::{PromptFilter, PromptStore, ResultStore, Storage};
use clap::Subcommand;
use serde_json::json;

use crate::print_json;

#[derive(Subcommand)]
pub enum PromptCommands {
    /// Save a new prompt
    Add {
        text: String,
        /// Comma-separated labels
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// List prompts, newest first
    List {
        /// Substring of the prompt text
        #[arg(short, long)]
        search: Option<String>,
        /// Only prompts carrying this label
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(long)]
        offset: Option<usize>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a prompt with its recorded answers
    Show { id: PromptId },
    /// Delete a prompt and every answer recorded for it
    Delete { id: PromptId },
}

pub(crate) async fn run(storage: &Storage, cmd: PromptCommands) -> Result<()> {
    match cmd {
        PromptCommands::Add { text, tags } => {
            let prompt = PromptStore::create_prompt(storage, &text, tags.as_deref()).await?;
            print_json(&prompt)
        },
        PromptCommands::List { search, tag, offset, limit } => {
            if search.is_some() || tag.is_some() {
                if offset.is_some() || limit.is_some() {
                    bail!("--offset/--limit cannot be combined with --search/--tag");
                }
                let filter = PromptFilter { text: search, tag };
                return print_json(&PromptStore::search_prompts(storage, &filter).await?);
            }
            match (offset, limit) {
                (None, None) => print_json(&PromptStore::list_prompts_by_date_desc(storage).await?),
                (offset, limit) => {
                    let page = PromptStore::list_prompts_paginated(
                        storage,
                        offset.unwrap_or(0),
                        limit.unwrap_or(DEFAULT_QUERY_LIMIT),
                    )
                    .await?;
                    print_json(&page)
                },
            }
        },
        PromptCommands::Show { id } => {
            let Some(prompt) = PromptStore::get_prompt(storage, id).await? else {
                bail!("prompt {id} not found");
            };
            let results = ResultStore::list_results_for_prompt(storage, id).await?;
            print_json(&json!({ "prompt": prompt, "results": results }))
        },
        PromptCommands::Delete { id } => {
            let removed = PromptStore::delete_prompt(storage, id).await?;
            print_json(&json!({ "deleted": id, "results_removed": removed }))
        },
    }
}
