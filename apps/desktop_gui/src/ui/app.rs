use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui::{self, RichText};
use shared::domain::SessionState;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiEvent,
        orchestration::dispatch_backend_command,
        reducer::{reduce, ViewModel},
    },
    ui::{theme, widgets},
};

pub struct OracleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewModel,
    endpoint: String,
    visuals_applied: bool,
}

impl OracleApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, endpoint: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewModel::default(),
            endpoint,
            visuals_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if !reduce(&mut self.view, event) {
                tracing::debug!(cycle = self.view.cycle.0, "dropped stale controller event");
            }
        }
    }

    fn queue(&mut self, cmd: BackendCommand) {
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.view.status_line) {
            self.view.awaiting = Some(cmd.action());
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space));
        if !pressed {
            return;
        }
        if self.view.can_ask() {
            self.queue(BackendCommand::Ask);
        } else if self.view.can_reset() {
            self.queue(BackendCommand::Reset);
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Andy Says")
                .size(64.0)
                .strong()
                .color(theme::TITLE),
        );
        ui.label(
            RichText::new("THE ORACLE OF REJECTION")
                .size(16.0)
                .color(theme::SUBTITLE),
        );
    }

    fn show_idle(&mut self, ui: &mut egui::Ui) {
        let enabled = self.view.can_ask();
        let label = if self.view.backend_ready {
            self.view.prompt.clone()
        } else {
            "Waking Andy up...".to_string()
        };
        if widgets::prompt_button(ui, &label, enabled).clicked() {
            self.queue(BackendCommand::Ask);
        }
    }

    fn show_loading(&self, ui: &mut egui::Ui) {
        widgets::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(36.0).color(theme::ACCENT));
                ui.add_space(12.0);
                ui.label(
                    RichText::new(self.view.status_display())
                        .size(24.0)
                        .strong()
                        .color(theme::REASON_TEXT),
                );
            });
        });
    }

    fn show_result(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("NO")
                .size(180.0)
                .strong()
                .color(theme::NO_RED),
        );
        ui.add_space(12.0);

        let reason = self.view.reason.clone().unwrap_or_default();
        widgets::card(ui, |ui| {
            ui.label(
                RichText::new(format!("\"{reason}\""))
                    .size(24.0)
                    .italics()
                    .color(theme::REASON_TEXT),
            );
        });
        ui.add_space(28.0);

        if widgets::secondary_button(ui, "Ask Again (spoiler: still no)", self.view.can_reset())
            .clicked()
        {
            self.queue(BackendCommand::Reset);
        }
    }

    fn show_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Powered by").color(theme::MUTED));
            ui.hyperlink_to("No-as-a-Service", &self.endpoint);
        });
        if !self.view.status_line.is_empty() {
            ui.label(RichText::new(&self.view.status_line).small().color(theme::MUTED));
        }
    }
}

impl eframe::App for OracleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_applied {
            ctx.set_visuals(theme::visuals());
            self.visuals_applied = true;
        }

        self.process_ui_events();
        self.handle_keyboard(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let top_space = (ui.available_height() * 0.12).clamp(16.0, 96.0);
            ui.add_space(top_space);

            ui.vertical_centered(|ui| {
                ui.set_max_width(720.0);
                self.show_header(ui);
                ui.add_space(48.0);

                match self.view.state {
                    SessionState::Idle => self.show_idle(ui),
                    SessionState::Loading => self.show_loading(ui),
                    SessionState::Result => self.show_result(ui),
                }

                ui.add_space(64.0);
                self.show_footer(ui);
            });
        });

        if self.view.state == SessionState::Loading || self.view.awaiting.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
