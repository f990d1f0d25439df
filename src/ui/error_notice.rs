//! Blocking notice shown when loading fails.
//!
//! The notice stays up until dismissed or until the load status changes,
//! for example because a retry started.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::colors;
use crate::registry::{LoadStatus, ReloadRequest};

/// Message to show for `status`, if any.
pub fn failure_message(status: &LoadStatus) -> Option<&str> {
    match status {
        LoadStatus::Failed(message) => Some(message),
        _ => None,
    }
}

/// System that renders the failure notice.
pub fn error_notice(
    mut contexts: EguiContexts,
    status: Res<LoadStatus>,
    mut reloads: MessageWriter<ReloadRequest>,
    mut dismissed: Local<bool>,
) {
    if status.is_changed() {
        *dismissed = false;
    }
    if *dismissed {
        return;
    }
    let Some(message) = failure_message(&status) else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut close = false;
    let modal = egui::Modal::new(egui::Id::new("load_failed"))
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(colors::ERROR_BG)
                .stroke(egui::Stroke::new(2.0, colors::ERROR_STROKE)),
        )
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Failed to load NEOs")
                        .strong()
                        .size(18.0),
                );
                ui.add_space(8.0);
                ui.label(message);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Retry").clicked() {
                        reloads.write(ReloadRequest);
                        close = true;
                    }
                    if ui.button("Dismiss").clicked() {
                        close = true;
                    }
                });
            });
        });

    if close || modal.should_close() {
        *dismissed = true;
    }
}
