//! Smart contract counter card

use defi_unite_core::CounterAction;

use crate::state::CounterUiState;
use crate::ui;

/// Render the counter card. Returns the action the user clicked, if any.
pub fn render(ui: &mut egui::Ui, state: &CounterUiState) -> Option<CounterAction> {
    let mut clicked = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(640.0);
        ui::card(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui::styled_heading(ui, "Smart Contract Counter");
                ui.horizontal(|ui| {
                    ui::muted(ui, "Current value:");
                    ui.label(egui::RichText::new(&state.current_value).size(18.0).strong());
                });
            });
            ui.add_space(12.0);

            ui.horizontal_wrapped(|ui| {
                for action in CounterAction::ALL {
                    let response = ui::filled_button(
                        ui,
                        state.button_label(action),
                        fill(action),
                        !state.is_busy(action),
                    );
                    if response.clicked() {
                        clicked = Some(action);
                    }
                }
            });
        });
    });

    clicked
}

fn fill(action: CounterAction) -> egui::Color32 {
    match action {
        CounterAction::GetValue => ui::SUCCESS,
        CounterAction::Increment => ui::INFO,
        CounterAction::Decrement => ui::WARNING,
        CounterAction::Reset => ui::ERROR,
    }
}
