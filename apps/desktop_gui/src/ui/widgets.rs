use eframe::egui::{self, RichText};

use crate::ui::theme;

pub fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
        .corner_radius(20)
        .inner_margin(egui::Margin::symmetric(32, 24))
        .show(ui, add_contents)
        .inner
}

/// The oversized call-to-action shown while idle.
pub fn prompt_button(ui: &mut egui::Ui, prompt: &str, enabled: bool) -> egui::Response {
    let width = ui.available_width().min(560.0);
    let button = egui::Button::new(
        RichText::new(prompt)
            .size(30.0)
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(theme::ACCENT)
    .corner_radius(24)
    .min_size(egui::vec2(width, 96.0));
    ui.add_enabled(enabled, button)
}

pub fn secondary_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> egui::Response {
    let button = egui::Button::new(RichText::new(label).size(18.0).strong().color(theme::TITLE))
        .fill(theme::SECONDARY_FILL)
        .corner_radius(32)
        .min_size(egui::vec2(280.0, 48.0));
    ui.add_enabled(enabled, button)
}
