use super::page::{read_page, Destination};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use styletrend_dom::serialize_document;
use styletrend_regen::runtime::RegenDriver;
use styletrend_regen::{RegenerationSimulator, SystemClock};
use tokio::sync::mpsc;

#[derive(Debug, Args)]
pub struct RegenArgs {
    /// Page containing regeneration wrappers
    pub input: PathBuf,

    /// Which wrapper's button to click
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Report the new image as loaded this many ms after the swap
    #[arg(long)]
    pub load_after_ms: Option<u64>,

    /// Output file for the resulting page (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Click one regeneration button and wait, in real time, until it settles
pub fn regen(args: RegenArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut doc = read_page(&args.input)?;
    let mut sim = RegenerationSimulator::discover(&doc, config.regen)?;

    if sim.groups().is_empty() {
        eprintln!("{}", "⚠️  No regeneration wrappers found".yellow());
        return Ok(());
    }
    if args.index >= sim.groups().len() {
        return Err(anyhow!(
            "Wrapper index {} out of range ({} found)",
            args.index,
            sim.groups().len()
        ));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let driver = RegenDriver::new();
        let (tx, mut loads) = mpsc::channel(1);

        eprintln!("{}", "🎨 Regenerating image...".bright_blue().bold());
        driver.click(&mut sim, &mut doc, args.index)?;

        if let Some(load_after) = args.load_after_ms {
            let image = sim.groups()[args.index].image;
            let delay = sim.options().processing_delay_ms + load_after;
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                let _ = tx.send(image).await;
            });
        }

        driver
            .run_until_idle(&mut sim, &mut doc, &SystemClock, &mut loads)
            .await?;
        anyhow::Ok(())
    })?;

    let group = &sim.groups()[args.index];
    eprintln!(
        "{} src → {} (overlay cleared at {}ms)",
        "✅".green(),
        doc.get_attribute(group.image, "src").unwrap_or_default(),
        group.cleared_at().unwrap_or_default()
    );

    Destination::resolve(false, args.output, cwd, None).write(&serialize_document(&doc))
}
