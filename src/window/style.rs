// Theme and styling for the control window
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppTheme {
    Light,
    Dark,
}

impl AppTheme {
    /// Follow whatever egui picked up from the system.
    pub fn from_context(ctx: &egui::Context) -> Self {
        if ctx.style().visuals.dark_mode {
            AppTheme::Dark
        } else {
            AppTheme::Light
        }
    }
}

pub struct ColorPalette {
    pub accent: egui::Color32,

    pub background: egui::Color32,
    pub surface: egui::Color32,

    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    pub border: egui::Color32,
}

impl ColorPalette {
    pub fn light() -> Self {
        Self {
            accent: egui::Color32::from_rgb(40, 110, 200),
            background: egui::Color32::from_rgb(255, 255, 255),
            surface: egui::Color32::from_rgb(248, 249, 250),
            text_primary: egui::Color32::from_rgb(26, 26, 26),
            text_secondary: egui::Color32::from_rgb(108, 117, 125),
            border: egui::Color32::from_rgb(233, 236, 239),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: egui::Color32::from_rgb(70, 140, 230),
            background: egui::Color32::from_rgb(26, 26, 26),
            surface: egui::Color32::from_rgb(45, 45, 45),
            text_primary: egui::Color32::from_rgb(248, 249, 250),
            text_secondary: egui::Color32::from_rgb(173, 181, 189),
            border: egui::Color32::from_rgb(64, 64, 64),
        }
    }

    pub fn for_theme(theme: AppTheme) -> Self {
        match theme {
            AppTheme::Light => Self::light(),
            AppTheme::Dark => Self::dark(),
        }
    }
}

// Spacing constants (8-point grid)
pub mod spacing {
    pub const MICRO: f32 = 4.0;
    pub const SMALL: f32 = 8.0;
    pub const MEDIUM: f32 = 16.0;
}

pub mod typography {
    pub const BODY_LARGE_SIZE: f32 = 16.0;
    pub const BODY_REGULAR_SIZE: f32 = 14.0;
}

pub mod sizing {
    pub const WINDOW_SIZE: [f32; 2] = [380.0, 260.0];
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const WIDE_BUTTON_WIDTH: f32 = 170.0;
    pub const BUTTON_PADDING_H: f32 = 12.0;
    pub const BUTTON_PADDING_V: f32 = 8.0;
    pub const BUTTON_ROUNDING: f32 = 6.0;
    pub const COMBO_WIDTH: f32 = 120.0;
}

/// Apply spacing, rounding and colors for `theme`.
pub fn configure_style(ctx: &egui::Context, theme: AppTheme) {
    let mut style = (*ctx.style()).clone();
    let palette = ColorPalette::for_theme(theme);

    style.visuals.window_fill = palette.background;
    style.visuals.panel_fill = palette.background;

    style.spacing.button_padding = egui::vec2(sizing::BUTTON_PADDING_H, sizing::BUTTON_PADDING_V);
    style.spacing.item_spacing = egui::vec2(spacing::SMALL, spacing::SMALL);

    style.visuals.widgets.noninteractive.rounding = egui::Rounding::same(sizing::BUTTON_ROUNDING);
    style.visuals.widgets.inactive.rounding = egui::Rounding::same(sizing::BUTTON_ROUNDING);
    style.visuals.widgets.hovered.rounding = egui::Rounding::same(sizing::BUTTON_ROUNDING);
    style.visuals.widgets.active.rounding = egui::Rounding::same(sizing::BUTTON_ROUNDING);

    style.visuals.override_text_color = Some(palette.text_primary);

    ctx.set_style(style);
}

/// Full-width accent button for the two read actions.
pub fn primary_button(ui: &mut egui::Ui, label: &str, palette: &ColorPalette) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(typography::BODY_LARGE_SIZE)
            .color(egui::Color32::WHITE),
    )
    .fill(palette.accent)
    .min_size(egui::vec2(sizing::WIDE_BUTTON_WIDTH, sizing::BUTTON_HEIGHT))
    .rounding(sizing::BUTTON_ROUNDING);

    ui.add(button)
}

/// Outlined button for playback controls.
pub fn secondary_button(ui: &mut egui::Ui, label: &str, palette: &ColorPalette) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(typography::BODY_REGULAR_SIZE)
            .color(palette.text_primary),
    )
    .fill(egui::Color32::TRANSPARENT)
    .stroke(egui::Stroke::new(1.5, palette.border))
    .min_size(egui::vec2(0.0, sizing::BUTTON_HEIGHT))
    .rounding(sizing::BUTTON_ROUNDING);

    ui.add(button)
}

pub fn card_frame(palette: &ColorPalette) -> egui::Frame {
    egui::Frame::none()
        .fill(palette.surface)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .rounding(sizing::BUTTON_ROUNDING)
        .inner_margin(egui::Margin::same(spacing::MEDIUM))
}
