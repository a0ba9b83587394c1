use super::page::{read_page, write_artifact};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use styletrend_dom::Document;
use styletrend_editor::{CannedPrompt, EditModeController, EditorEvent, EventResponse};
use thiserror::Error;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Page to edit
    pub input: PathBuf,

    /// JSON list of steps to run against the page
    pub script: PathBuf,

    /// Output file (defaults to the configured export filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// One scripted user interaction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStep {
    /// Selector for the event target
    pub target: String,

    /// Which match of `target` to use
    #[serde(default)]
    pub index: usize,

    pub event: EditorEvent,

    /// Answer to any prompt the event opens; absent means cancel
    #[serde(default)]
    pub prompt_response: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("step {step}: `{target}` matched nothing")]
    NoMatch { step: usize, target: String },

    #[error("step {step}: `{target}` has {count} matches, index {index} is out of range")]
    IndexOutOfRange {
        step: usize,
        target: String,
        index: usize,
        count: usize,
    },
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut doc = read_page(&args.input)?;

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;
    let steps: Vec<ReplayStep> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid replay script {}", args.script.display()))?;

    let mut editor = EditModeController::new(config.editor)?;
    editor.install(&mut doc)?;

    eprintln!("{}", "🎬 Replaying edits...".bright_blue().bold());
    let responses = run_steps(&mut editor, &mut doc, &steps)?;

    for (i, (step, response)) in steps.iter().zip(&responses).enumerate() {
        let mark = if response.handled { "✓".green() } else { "·".dimmed() };
        eprintln!("  {} {:>3} {} {}", mark, i + 1, event_name(&step.event), step.target);

        if let Some(artifact) = &response.export {
            eprintln!("      {} {}", "export requested:".dimmed(), artifact.filename);
        }
    }

    eprintln!(
        "{} {} steps, {} undo entries",
        "✅".green(),
        steps.len(),
        editor.history().len()
    );

    let artifact = editor.export_page(&doc)?;
    write_artifact(&artifact, args.stdout, args.output, cwd)
}

/// Dispatch every step in order, stopping at the first unresolved target
pub fn run_steps(
    editor: &mut EditModeController,
    doc: &mut Document,
    steps: &[ReplayStep],
) -> Result<Vec<EventResponse>> {
    let mut responses = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        let matches = doc.query_selector_all(doc.root(), &step.target)?;
        let target = match matches.get(step.index) {
            Some(target) => *target,
            None if matches.is_empty() => {
                return Err(ReplayError::NoMatch {
                    step: i + 1,
                    target: step.target.clone(),
                }
                .into())
            }
            None => {
                return Err(ReplayError::IndexOutOfRange {
                    step: i + 1,
                    target: step.target.clone(),
                    index: step.index,
                    count: matches.len(),
                }
                .into())
            }
        };

        let mut prompt = CannedPrompt(step.prompt_response.clone());
        responses.push(editor.dispatch(doc, target, step.event.clone(), &mut prompt));
    }

    Ok(responses)
}

fn event_name(event: &EditorEvent) -> String {
    serde_json::to_value(event)
        .ok()
        .and_then(|v| v.get("type").and_then(|t| t.as_str()).map(String::from))
        .unwrap_or_default()
}
