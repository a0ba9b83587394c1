use super::page::{read_page, write_artifact};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use styletrend_editor::EditModeController;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page to export
    pub input: PathBuf,

    /// Output file (defaults to the configured export filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// Load the page into the editor and write its static export
pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut doc = read_page(&args.input)?;

    let mut editor = EditModeController::new(config.editor)?;
    editor.install(&mut doc)?;

    eprintln!("{} {}", "📦 Exporting".bright_blue().bold(), args.input.display());
    let artifact = editor.export_page(&doc)?;
    write_artifact(&artifact, args.stdout, args.output, cwd)
}
