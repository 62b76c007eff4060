use egui::{Color32, RichText, Ui};

use crate::ui;

pub fn render(ui: &mut Ui, greeting: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(
            RichText::new(greeting)
                .size(48.0)
                .strong()
                .color(ui::BRAND),
        );
        ui.add_space(16.0);
        ui.label(
            RichText::new(
                "Welcome to DeFi Unite - Your gateway to decentralized finance on Stellar",
            )
            .size(18.0)
            .color(Color32::from_rgb(209, 213, 219)),
        );
        ui.add_space(6.0);
        ui::muted(ui, "Connect your wallet and start exploring the world of DeFi");
        ui.add_space(48.0);
    });
}
