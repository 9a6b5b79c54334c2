//! Colors and metrics for the login card.

use eframe::egui::{self, Color32};

use crate::ui::view::BannerKind;

pub const APP_BACKGROUND: Color32 = Color32::from_rgb(248, 250, 252);
pub const CARD_FILL: Color32 = Color32::WHITE;
pub const CARD_STROKE: Color32 = Color32::from_rgb(241, 245, 249);
pub const FIELD_FILL: Color32 = Color32::from_rgb(248, 250, 252);
pub const FIELD_STROKE: Color32 = Color32::from_rgb(226, 232, 240);
pub const FIELD_STROKE_ERROR: Color32 = Color32::from_rgb(252, 165, 165);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(239, 68, 68);
pub const HEADING_TEXT: Color32 = Color32::from_rgb(15, 23, 42);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(100, 116, 139);
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
pub const ACCENT_DISABLED: Color32 = Color32::from_rgb(96, 165, 250);

pub const CARD_WIDTH: f32 = 400.0;
pub const FIELD_HEIGHT: f32 = 40.0;

pub struct BannerColors {
    pub fill: Color32,
    pub stroke: Color32,
    pub text: Color32,
    pub icon: &'static str,
}

pub fn banner_colors(kind: BannerKind) -> BannerColors {
    match kind {
        BannerKind::Success => BannerColors {
            fill: Color32::from_rgb(236, 253, 245),
            stroke: Color32::from_rgb(209, 250, 229),
            text: Color32::from_rgb(4, 120, 87),
            icon: "✔",
        },
        BannerKind::Error => BannerColors {
            fill: Color32::from_rgb(254, 242, 242),
            stroke: Color32::from_rgb(254, 226, 226),
            text: Color32::from_rgb(185, 28, 28),
            icon: "⚠",
        },
    }
}

pub fn field_stroke(has_error: bool) -> egui::Stroke {
    let color = if has_error {
        FIELD_STROKE_ERROR
    } else {
        FIELD_STROKE
    };
    egui::Stroke::new(1.0, color)
}

pub fn light_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = APP_BACKGROUND;
    visuals.extreme_bg_color = FIELD_FILL;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals
}
