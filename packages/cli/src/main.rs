mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, regen, replay, ExportArgs, RegenArgs, ReplayArgs};

/// Style Trend CLI - edit, export and regenerate trend report pages
#[derive(Parser, Debug)]
#[command(name = "styletrend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a clean static copy of a page
    Export(ExportArgs),

    /// Apply a scripted list of edits, then export
    Replay(ReplayArgs),

    /// Run one image regeneration in real time
    Regen(RegenArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Export(args) => export(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
        Command::Regen(args) => regen(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
