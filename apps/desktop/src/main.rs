use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use oracle_core::{
    load_settings, ControllerEvent, HttpReasonClient, InteractionController, Settings,
};
use tracing_subscriber::EnvFilter;

/// The transcript owns the terminal; logs stay quiet unless `RUST_LOG` asks for more.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "oracle", about = "Ask Andy anything. The answer is always no.")]
struct Args {
    /// Settings file (defaults to ./oracle.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    interval_ms: Option<u64>,
    /// How many times to ask in a row
    #[arg(long, default_value_t = 1)]
    rounds: u32,
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(endpoint) = &args.endpoint {
        settings.reason_endpoint = endpoint.clone();
    }
    if let Some(interval_ms) = args.interval_ms {
        settings.status_interval_ms = interval_ms;
    }
}

fn render_event(event: &ControllerEvent) -> Option<String> {
    match event {
        ControllerEvent::Idle { prompt } => {
            Some(format!("\n  Ask Again (spoiler: still no)\n\n> {prompt}"))
        }
        ControllerEvent::Status {
            step, total, text, ..
        } => Some(format!("  [{step}/{total}] {text}...")),
        ControllerEvent::Result { reason, .. } => Some(format!("\n  NO\n\n  \"{reason}\"")),
        ControllerEvent::Loading { .. } | ControllerEvent::FetchingReason { .. } => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load oracle settings")?;
    apply_overrides(&mut settings, &args);
    settings.validate().context("invalid command line override")?;

    let catalog = Arc::new(
        settings
            .load_catalog()
            .context("failed to load phrase lists")?,
    );
    let client = HttpReasonClient::new(settings.endpoint_url()?, settings.request_timeout())
        .context("failed to build reason client")?;
    let mut controller =
        InteractionController::new(catalog, Arc::new(client), settings.cycle_settings());

    let mut events = controller.subscribe_events();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Some(line) = render_event(&event) {
                println!("{line}");
            }
        }
    });

    println!("Andy Says - The Oracle of Rejection");
    println!("\n> {}", controller.prompt_text());

    for round in 1..=args.rounds.max(1) {
        if round > 1 {
            controller.reset()?;
        }
        controller.start().await?;
    }

    drop(controller);
    printer.await.context("event printer stopped unexpectedly")?;
    Ok(())
}
