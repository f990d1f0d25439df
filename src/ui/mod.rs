//! UI module providing the egui interface.
//!
//! A controls panel on the left, a detail card for the selected asteroid
//! and a blocking notice when a load fails. Pointer capture is published
//! through [`PointerCapture`] so picking and the camera can stay out of
//! egui's way without depending on it.

pub mod controls;
pub mod detail_panel;
pub mod error_notice;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::camera::PointerCapture;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (
                controls::controls_panel,
                detail_panel::detail_panel,
                error_notice::error_notice,
                update_pointer_capture,
            )
                .chain(),
        );
    }
}

/// Colours shared by the panels.
pub(crate) mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(10, 16, 36, 230);
    pub const TEXT: Color32 = Color32::from_rgb(220, 226, 240);
    pub const HAZARD: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
    pub const SAFE: Color32 = Color32::from_rgb(0x7b, 0xe0, 0xff);
    pub const ERROR_BG: Color32 = Color32::from_rgba_premultiplied(40, 20, 20, 240);
    pub const ERROR_STROKE: Color32 = Color32::from_rgb(255, 100, 100);
}

/// Record whether egui is using the pointer, after all panels have run.
fn update_pointer_capture(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let wants = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    if capture.egui_wants_pointer != wants {
        capture.egui_wants_pointer = wants;
    }
}
