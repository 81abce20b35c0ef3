//! `npcchat` — replay a batch of player chat through an LLM-driven NPC.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use npcchat_sim::app;

#[derive(Debug, Parser)]
#[command(name = "npcchat", version, about = "Replay player chat through an LLM-driven NPC")]
struct Cli {
    /// Path to npcchat.toml (defaults to ./npcchat.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Batch of player messages; overrides `output.input_path`.
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // A missing .env is fine; the key may come from the real environment.
    dotenvy::dotenv().ok();

    let mut config = app::load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(input) = cli.input {
        config.output.input_path = input;
    }
    app::init_tracing(&config.general.log_level);

    let api_key = std::env::var(&config.llm.api_key_env).ok();
    let summary = app::run(&config, api_key).await?;

    info!(
        messages = summary.messages,
        players = summary.players,
        log = %config.output.log_path.display(),
        transcript = %config.output.transcript_path.display(),
        "Done"
    );
    Ok(())
}
