use crate::pot::events::{ReloadConfigEvent, ResetSimulationEvent, TogglePauseEvent};
use crate::pot::resources::BoilingSimulation;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

pub fn render_info_panel(
    mut contexts: EguiContexts,
    simulation: Res<BoilingSimulation>,
    mut reset_events: MessageWriter<ResetSimulationEvent>,
    mut pause_events: MessageWriter<TogglePauseEvent>,
    mut reload_events: MessageWriter<ReloadConfigEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("info_panel")
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Boiling Pot");
            ui.add_space(10.0);

            egui::Grid::new("readout").num_columns(2).striped(true).show(ui, |ui| {
                for (label, value) in info_rows(&simulation) {
                    ui.label(label);
                    ui.label(value);
                    ui.end_row();
                }
            });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let pause_label = if simulation.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    pause_events.write(TogglePauseEvent);
                }
                if ui.button("Reset").clicked() {
                    reset_events.write(ResetSimulationEvent);
                }
                if ui.button("Reload config").clicked() {
                    reload_events.write(ReloadConfigEvent);
                }
            });
        });
}

/// Label / value pairs shown in the info panel
pub fn info_rows(simulation: &BoilingSimulation) -> Vec<(&'static str, String)> {
    let sim = &simulation.inner;
    let thermal = sim.thermal();
    let targets = sim.targets();
    let respawned = simulation
        .last_report
        .map_or_else(|| "-".to_string(), |report| report.respawned.to_string());

    vec![
        ("Temperature", format!("{:.2} °C", thermal.temperature)),
        ("Mass", format!("{:.3} kg", thermal.mass)),
        ("State", sim.phase().to_string()),
        ("Bubbles", sim.bubbles().capacity().to_string()),
        ("Steam opacity", format!("{:.2}", targets.steam_opacity)),
        ("Tick", sim.tick().to_string()),
        ("Respawned", respawned),
        ("Seed", sim.seed().to_string()),
    ]
}
