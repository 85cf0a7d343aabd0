//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use oracle_core::{HttpReasonClient, InteractionController, Settings};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(serve(settings, cmd_rx, ui_tx));
    });
}

fn build_controller(settings: &Settings) -> Result<InteractionController> {
    let catalog = Arc::new(
        settings
            .load_catalog()
            .context("failed to load phrase lists")?,
    );
    let client = HttpReasonClient::new(settings.endpoint_url()?, settings.request_timeout())
        .context("failed to build reason client")?;
    Ok(InteractionController::new(
        catalog,
        Arc::new(client),
        settings.cycle_settings(),
    ))
}

async fn serve(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let mut controller = match build_controller(&settings) {
        Ok(controller) => controller,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("{err:#}"),
            )));
            tracing::error!("backend worker startup failure: {err:#}");
            return;
        }
    };

    let mut events = controller.subscribe_events();
    let event_tx = ui_tx.clone();
    let forwarder = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if event_tx.try_send(UiEvent::Controller(event)).is_err() {
                        tracing::warn!("ui event queue unavailable; dropping controller event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "ui forwarder lagged behind controller events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let _ = ui_tx.try_send(UiEvent::BackendReady {
        prompt: controller.prompt_text().to_string(),
    });
    tracing::info!(endpoint = %settings.reason_endpoint, "backend worker ready");

    // Commands are served one at a time, so a reset can never interleave with a running cycle.
    while let Ok(cmd) = cmd_rx.recv() {
        let result = match cmd {
            BackendCommand::Ask => controller.start().await.map(|_| ()),
            BackendCommand::Reset => controller.reset(),
        };
        if let Err(err) = result {
            let context = match cmd {
                BackendCommand::Ask => UiErrorContext::Ask,
                BackendCommand::Reset => UiErrorContext::Reset,
            };
            tracing::warn!(command = cmd.name(), "rejected command: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                context,
                err.to_string(),
            )));
        }
    }

    drop(controller);
    let _ = forwarder.await;
    tracing::info!("backend worker stopped");
}
