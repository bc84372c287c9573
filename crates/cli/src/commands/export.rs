//! Prompt/answer dump in JSON or Markdown.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chatlist_core::{ModelId, Prompt, PromptResult, format_timestamp};
use chatlist_storage::{AppSettings, ModelStore, PromptStore, ResultStore, Storage};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::print_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

#[derive(Serialize)]
struct ExportedResult {
    #[serde(flatten)]
    result: PromptResult,
    /// `None` once the generating model has been deleted.
    model_name: Option<String>,
}

#[derive(Serialize)]
struct ExportedPrompt {
    #[serde(flatten)]
    prompt: Prompt,
    results: Vec<ExportedResult>,
}

pub(crate) async fn run(storage: &Storage, output: Option<PathBuf>, format: ExportFormat) -> Result<()> {
    let entries = collect(storage).await?;
    let document = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&entries)?,
        ExportFormat::Markdown => render_markdown(&entries),
    };

    let target = match output {
        Some(path) => Some(path),
        None => AppSettings::new(storage).export_path().await?,
    };
    let Some(mut path) = target else {
        println!("{document}");
        return Ok(());
    };

    if path.is_dir() {
        path.push(format!("chatlist-export.{}", format.extension()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&path, document).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), prompts = entries.len(), "Export written");
    print_json(&json!({ "path": path, "prompts": entries.len() }))
}

async fn collect(storage: &Storage) -> Result<Vec<ExportedPrompt>> {
    let model_names: HashMap<ModelId, String> =
        ModelStore::list_models(storage, None).await?.into_iter().map(|m| (m.id, m.name)).collect();

    let mut entries = Vec::new();
    for prompt in PromptStore::list_prompts_by_date_desc(storage).await? {
        let results = ResultStore::list_results_for_prompt(storage, prompt.id)
            .await?
            .into_iter()
            .map(|result| {
                let model_name = result.model_id.and_then(|id| model_names.get(&id).cloned());
                ExportedResult { result, model_name }
            })
            .collect();
        entries.push(ExportedPrompt { prompt, results });
    }
    Ok(entries)
}

fn render_markdown(entries: &[ExportedPrompt]) -> String {
    let mut out = String::from("# ChatList export\n");
    for entry in entries {
        let prompt = &entry.prompt;
        let _ = write!(out, "\n## Prompt {} ({})\n\n", prompt.id, format_timestamp(&prompt.date));
        if let Some(tags) = &prompt.tags {
            let _ = write!(out, "Tags: {tags}\n\n");
        }
        for line in prompt.prompt.lines() {
            let _ = writeln!(out, "> {line}");
        }
        for exported in &entry.results {
            let name = exported.model_name.as_deref().unwrap_or("(deleted model)");
            let marker = if exported.result.selected { " [selected]" } else { "" };
            let _ = write!(out, "\n### {name}{marker}\n\n{}\n", exported.result.response.trim_end());
        }
    }
    out
}
