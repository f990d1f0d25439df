//! Controls panel: scale sliders, pause, reload and load status.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::colors;
use crate::animation::AnimationClock;
use crate::registry::{LoadStatus, NeoRegistry, ReloadRequest};
use crate::types::{DISTANCE_SCALE_RANGE, ScaleSettings, TIME_SPEED_RANGE};

/// One-line summary of the last load.
pub fn status_text(status: &LoadStatus, live_count: usize) -> String {
    match status {
        LoadStatus::Idle => "Waiting for data".to_string(),
        LoadStatus::Loading { .. } => "Loading NEOs...".to_string(),
        LoadStatus::Loaded { .. } => match live_count {
            1 => "1 NEO loaded".to_string(),
            n => format!("{n} NEOs loaded"),
        },
        LoadStatus::Failed(_) => "Load failed".to_string(),
    }
}

/// Label for the pause toggle.
pub fn pause_label(running: bool) -> &'static str {
    if running { "Pause" } else { "Resume" }
}

/// System that renders the controls panel.
pub fn controls_panel(
    mut contexts: EguiContexts,
    mut scale: ResMut<ScaleSettings>,
    mut clock: ResMut<AnimationClock>,
    mut reloads: MessageWriter<ReloadRequest>,
    status: Res<LoadStatus>,
    registry: Res<NeoRegistry>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(240.0)
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::symmetric(14, 12)),
        )
        .show(ctx, |ui| {
            ui.heading(egui::RichText::new("NEO Flyby").color(colors::TEXT));
            ui.add_space(8.0);

            ui.label("Distance scale");
            let mut distance_scale = scale.distance_scale;
            if ui
                .add(
                    egui::Slider::new(&mut distance_scale, DISTANCE_SCALE_RANGE)
                        .logarithmic(true)
                        .suffix(" km/unit"),
                )
                .on_hover_text("Kilometres per render unit. Affects Earth now, asteroids on reload.")
                .changed()
            {
                scale.set_distance_scale(distance_scale);
                info!("Distance scale: {} km/unit", scale.distance_scale);
            }

            ui.add_space(4.0);
            ui.label("Time speed");
            let mut time_speed = scale.time_speed;
            if ui
                .add(
                    egui::Slider::new(&mut time_speed, TIME_SPEED_RANGE)
                        .logarithmic(true)
                        .smallest_positive(0.01)
                        .suffix("x"),
                )
                .on_hover_text("Pause / speed up ([ and ])")
                .changed()
            {
                scale.set_time_speed(time_speed);
                info!("Time speed: {}x", scale.time_speed);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(pause_label(clock.is_running()))
                    .on_hover_text("Space")
                    .clicked()
                {
                    clock.toggle();
                }
                if ui.button("Reload").on_hover_text("R").clicked() {
                    reloads.write(ReloadRequest);
                }
            });

            ui.separator();
            ui.label(
                egui::RichText::new(status_text(&status, registry.len()))
                    .color(colors::TEXT)
                    .small(),
            );
            ui.label(
                egui::RichText::new("Click an asteroid for details")
                    .weak()
                    .small(),
            );
        });
}
