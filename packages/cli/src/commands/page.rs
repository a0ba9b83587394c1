//! Reading input pages and writing results.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use styletrend_dom::{parse_html, Document};
use styletrend_editor::ExportArtifact;

pub fn read_page(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = parse_html(&source)?;
    tracing::debug!(path = %path.display(), nodes = doc.len(), "parsed page");
    Ok(doc)
}

/// Where an output should go
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `--stdout` wins, then `-o`, then `fallback` inside `cwd`
    pub fn resolve(stdout: bool, output: Option<PathBuf>, cwd: &str, fallback: Option<&str>) -> Self {
        if stdout {
            return Destination::Stdout;
        }
        match (output, fallback) {
            (Some(path), _) => Destination::File(path),
            (None, Some(name)) => Destination::File(PathBuf::from(cwd).join(name)),
            (None, None) => Destination::Stdout,
        }
    }

    pub fn write(&self, contents: &str) -> Result<()> {
        match self {
            Destination::Stdout => print!("{}", contents),
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("  {} {}", "✓".green(), path.display());
            }
        }
        Ok(())
    }
}

pub fn write_artifact(
    artifact: &ExportArtifact,
    stdout: bool,
    output: Option<PathBuf>,
    cwd: &str,
) -> Result<()> {
    Destination::resolve(stdout, output, cwd, Some(&artifact.filename)).write(&artifact.contents)
}
