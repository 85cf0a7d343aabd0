use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

#[derive(Parser, Debug)]
#[command(name = "oracle-gui", about = "Ask Andy anything. The answer is always no.")]
struct Args {
    /// Settings file (defaults to ./oracle.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = oracle_core::load_settings(args.config.as_deref())
        .context("failed to load oracle settings")?;
    let endpoint = settings.reason_endpoint.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Andy Says - The Oracle of Rejection")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Andy Says",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::OracleApp::new(cmd_tx, ui_rx, endpoint)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
