//! UI helper components

use egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(168, 85, 247);
pub const BRAND: Color32 = Color32::WHITE;
pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const INFO: Color32 = Color32::from_rgb(37, 99, 235);
pub const WARNING: Color32 = Color32::from_rgb(234, 88, 12);
pub const WALLET_IDLE: Color32 = Color32::from_rgb(147, 51, 234);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).strong().color(BRAND));
}

/// Muted body text
pub fn muted(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).color(MUTED));
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!(error = %e, "failed to copy to clipboard");
            }
        }
        Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
    }
}

/// Text with a copy button
pub fn copyable(ui: &mut egui::Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).monospace());
        if ui
            .small_button("📋")
            .on_hover_text("Copy to clipboard")
            .clicked()
        {
            copy_to_clipboard(text);
        }
    });
}

/// Filled action button with enabled state
pub fn filled_button(
    ui: &mut egui::Ui,
    text: &str,
    fill: Color32,
    enabled: bool,
) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(Color32::WHITE))
        .min_size(egui::vec2(110.0, 34.0))
        .fill(fill);
    ui.add_enabled(enabled, btn)
}

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(1.0, ACCENT.linear_multiply(0.25)))
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, add_contents);
}
