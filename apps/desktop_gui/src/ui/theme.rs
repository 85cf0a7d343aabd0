use eframe::egui::{self, Color32};

pub const BACKGROUND: Color32 = Color32::from_rgb(0xff, 0xf7, 0xed);
pub const CARD_FILL: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
pub const CARD_STROKE: Color32 = Color32::from_rgb(0xfe, 0xf3, 0xc7);
pub const TITLE: Color32 = Color32::from_rgb(0xb4, 0x53, 0x09);
pub const SUBTITLE: Color32 = Color32::from_rgb(0x92, 0x40, 0x0e);
pub const ACCENT: Color32 = Color32::from_rgb(0xf9, 0x73, 0x16);
pub const NO_RED: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
pub const REASON_TEXT: Color32 = Color32::from_rgb(0x78, 0x35, 0x0f);
pub const SECONDARY_FILL: Color32 = Color32::from_rgb(0xfe, 0xf3, 0xc7);
pub const MUTED: Color32 = Color32::from_rgb(0xb4, 0x83, 0x4b);

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.hyperlink_color = TITLE;
    visuals
}
