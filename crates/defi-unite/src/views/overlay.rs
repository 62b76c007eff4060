//! Modal overlay drawn from the loading wrapper's snapshot.

use defi_unite_adapters::OverlaySnapshot;
use defi_unite_core::DisplayRequest;

use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    Close,
}

pub fn render(ctx: &egui::Context, snapshot: &OverlaySnapshot) -> OverlayAction {
    let Some(request) = &snapshot.visible else {
        return OverlayAction::None;
    };
    let mut action = OverlayAction::None;

    // Backdrop swallows clicks aimed at the page underneath.
    egui::Area::new(egui::Id::new("overlay_backdrop"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let rect = ctx.screen_rect();
            ui.allocate_rect(rect, egui::Sense::click());
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(170));
        });

    egui::Area::new(egui::Id::new("overlay_dialog"))
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(24.0)
                .rounding(10.0)
                .show(ui, |ui| {
                    ui.set_width(360.0);
                    ui.vertical_centered(|ui| match request {
                        DisplayRequest::Loading { title, message } => {
                            ui.add(egui::Spinner::new().size(36.0));
                            ui.add_space(12.0);
                            heading(ui, title, ui::ACCENT);
                            ui::muted(ui, message);
                        }
                        DisplayRequest::Success {
                            title,
                            message,
                            transaction_id,
                        } => {
                            heading(ui, &format!("✅ {title}"), ui::SUCCESS);
                            ui.label(message);
                            if let Some(id) = transaction_id {
                                ui.add_space(8.0);
                                ui::muted(ui, "Transaction ID");
                                ui::copyable(ui, id);
                            }
                            action = close_button(ui);
                        }
                        DisplayRequest::Error { title, message } => {
                            heading(ui, &format!("❌ {title}"), ui::ERROR);
                            ui.label(message);
                            action = close_button(ui);
                        }
                    });
                });
        });

    action
}

fn heading(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    ui.label(egui::RichText::new(text).size(18.0).strong().color(color));
    ui.add_space(6.0);
}

fn close_button(ui: &mut egui::Ui) -> OverlayAction {
    ui.add_space(16.0);
    if ui.button("Close").clicked() {
        OverlayAction::Close
    } else {
        OverlayAction::None
    }
}
