use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vismirror::mirror::MirrorOutcome;
use vismirror::{filter, locate, mirror, trace};

#[derive(Parser, Debug)]
#[command(
    name = "vismirror",
    about = "Save an AtCoder AHC visualizer and its sibling assets to disk"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the visualizer URL for a contest id (e.g. ahc020)
    Locate { contest_id: String },
    /// Render a visualizer page and mirror its same-directory assets
    Mirror {
        /// URL of the visualizer page, e.g. https://img.atcoder.jp/ahc020/db611066.html
        url: String,
        /// Directory the mirrored tree is written under
        #[arg(long, default_value = ".")]
        dest: PathBuf,
        /// Write a JSON summary of the run
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    origin_url: &'a str,
    assets: usize,
    saved: usize,
    failed: usize,
    outcomes: &'a [MirrorOutcome],
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = vismirror::http_client().context("failed to build HTTP client")?;

    match cli.command {
        Command::Locate { contest_id } => {
            let url = locate::locate(&client, &contest_id).await?;
            println!("{url}");
        }
        Command::Mirror { url, dest, report } => {
            let events = trace::capture(&url).context("headless-chrome render failed")?;
            let urls = trace::extract_urls(&events);
            let assets = filter::filter_same_location(&url, &urls);
            info!(
                "trace mentions {} URLs, {} share the page's location",
                urls.len(),
                assets.len()
            );

            let outcomes = mirror::mirror(&client, &assets, &dest).await;

            if let Some(path) = report {
                let saved = outcomes
                    .iter()
                    .filter(|o| matches!(o, MirrorOutcome::Saved { .. }))
                    .count();
                let summary = RunReport {
                    origin_url: &url,
                    assets: assets.len(),
                    saved,
                    failed: outcomes.len() - saved,
                    outcomes: &outcomes,
                };
                std::fs::write(&path, serde_json::to_vec_pretty(&summary)?)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
            }
        }
    }

    Ok(())
}
