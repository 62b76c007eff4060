//! Top navigation bar: brand, links and the Stellar wallet button.
//!
//! Wide windows show the links inline next to the wallet button. Narrow ones
//! get an icon-only wallet button and a hamburger menu.

use defi_unite_core::WalletStatus;

use crate::state::{NavState, NAV_LINKS};
use crate::ui;

/// Navigation action returned after rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Connect,
    Disconnect,
    CopyPublicKey,
}

pub fn render(ctx: &egui::Context, nav: &mut NavState, wallet: &WalletStatus) -> NavAction {
    let mut action = NavAction::None;
    let compact = NavState::is_compact(ctx.screen_rect().width());

    egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let brand = ui.add(
                egui::Label::new(
                    egui::RichText::new("DeFi Unite")
                        .size(20.0)
                        .strong()
                        .color(ui::BRAND),
                )
                .sense(egui::Sense::click()),
            );
            if brand.clicked() {
                nav.select(&NAV_LINKS[0]);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if compact {
                    let toggle = if nav.mobile_menu_open { "✕" } else { "☰" };
                    if ui
                        .add(egui::Button::new(egui::RichText::new(toggle).size(18.0)).frame(false))
                        .on_hover_text("Toggle menu")
                        .clicked()
                    {
                        nav.toggle_menu();
                    }
                    action = wallet_button(ui, wallet, "👛".to_owned());
                } else {
                    action = wallet_button(ui, wallet, format!("👛 XLM {}", wallet.button_label()));
                    ui.add_space(16.0);
                    for link in NAV_LINKS.iter().rev() {
                        if ui
                            .selectable_label(nav.active_href == link.href, link.label)
                            .clicked()
                        {
                            nav.select(link);
                        }
                    }
                }
            });
        });

        if compact && nav.mobile_menu_open {
            ui.add_space(6.0);
            ui::card(ui, |ui| {
                ui.set_width(ui.available_width());
                for link in NAV_LINKS {
                    if ui
                        .selectable_label(
                            nav.active_href == link.href,
                            egui::RichText::new(link.label).size(16.0),
                        )
                        .clicked()
                    {
                        nav.select(link);
                    }
                }
            });
        }
        ui.add_space(6.0);
    });

    action
}

fn wallet_button(ui: &mut egui::Ui, wallet: &WalletStatus, text: String) -> NavAction {
    let fill = if wallet.is_connected() {
        ui::SUCCESS
    } else {
        ui::WALLET_IDLE
    };
    let response = ui
        .add_enabled(
            !wallet.is_connecting,
            egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE)).fill(fill),
        )
        .on_hover_text(wallet.button_hint());

    let mut action = NavAction::None;
    if let Some(public_key) = &wallet.public_key {
        response.context_menu(|ui| {
            ui.label(egui::RichText::new(public_key).monospace().small());
            if ui.button("Copy address").clicked() {
                action = NavAction::CopyPublicKey;
                ui.close_menu();
            }
        });
    }

    if response.clicked() {
        action = if wallet.is_connected() {
            NavAction::Disconnect
        } else {
            NavAction::Connect
        };
    }
    action
}
