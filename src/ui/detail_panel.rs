//! Detail card for the selected asteroid.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::colors;
use crate::registry::{NeoBody, SelectedNeo};

/// System that renders the detail card.
pub fn detail_panel(
    mut contexts: EguiContexts,
    mut selected: ResMut<SelectedNeo>,
    bodies: Query<&NeoBody>,
) {
    let Some(entity) = selected.entity else {
        return;
    };
    let Ok(body) = bodies.get(entity) else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let detail = body.asteroid.detail();
    let accent = if detail.is_hazardous {
        colors::HAZARD
    } else {
        colors::SAFE
    };
    let mut close = false;

    egui::Window::new("neo_detail")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(colors::PANEL_BG)
                .stroke(egui::Stroke::new(1.0, accent)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&detail.title)
                        .strong()
                        .size(16.0)
                        .color(accent),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("\u{2715}").on_hover_text("Close (Esc)").clicked() {
                        close = true;
                    }
                });
            });
            ui.label(egui::RichText::new(format!("ID {}", detail.id)).weak().small());
            ui.add_space(6.0);

            egui::Grid::new("neo_detail_rows")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (label, value) in detail.rows() {
                        ui.label(egui::RichText::new(label).color(colors::TEXT));
                        ui.label(egui::RichText::new(value).monospace());
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.hyperlink_to("Open in JPL Small-Body Database", detail.jpl_url());
        });

    if close {
        selected.entity = None;
    }
}
