use anyhow::{Context, Result};
use bakecast_common::{LogConfig, init_logging};
use bakecast_config::{BakecastConfig, BakecastConfigLoader};
use clap::Parser;
use std::path::PathBuf;
use wiring::build_poster;
mod wiring;

const DEFAULT_CONFIG: &str = "bakecast.yaml";

/// Post a random recipe from a WordPress blog to Twitter/X.
#[derive(Debug, Parser)]
#[command(name = "bakecast", version, about)]
struct Cli {
    /// Config file (YAML/TOML/JSON). Defaults to ./bakecast.yaml when present.
    #[arg(short, long, env = "BAKECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Pick and download, but do not publish.
    #[arg(long)]
    dry_run: bool,

    /// Seed the post picker for a reproducible choice.
    #[arg(long)]
    seed: Option<u64>,

    /// Override `source.site`.
    #[arg(long)]
    site: Option<String>,
}

fn load_config(cli: &Cli) -> Result<BakecastConfig> {
    let loader = BakecastConfigLoader::new().require_credentials(!cli.dry_run);
    let mut loader = match &cli.config {
        Some(path) => loader.with_file(path),
        None => loader.with_optional_file(DEFAULT_CONFIG),
    };
    if let Some(site) = &cli.site {
        loader = loader.with_override("source.site", site);
    }
    loader.load().context("failed to load configuration")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (CLI > env > file)
    let cfg = load_config(&cli)?;

    // 2) Logging as configured; RUST_LOG still wins
    let log_path = init_logging(LogConfig {
        log_dir: cfg.logging.dir.clone(),
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
        ..LogConfig::default()
    })?;
    tracing::debug!(log_path = %log_path.display(), "logging initialised");
    tracing::debug!(
        site = %cfg.source.site,
        endpoint = %cfg.source.endpoint,
        post_type = %cfg.source.post_type,
        number = cfg.source.number,
        dry_run = cli.dry_run,
        "config.loaded"
    );

    let mut poster = build_poster(&cfg, cli.seed)?.dry_run(cli.dry_run);
    let report = poster.run().await?;

    match &report.status_id {
        Some(id) => println!("published {id}: {}", report.status_text),
        None => println!("dry run: {}", report.status_text),
    }
    Ok(())
}
