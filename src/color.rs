use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::TrendClass;

// ---------------------------------------------------------------------------
// Trend colours
// ---------------------------------------------------------------------------

pub const PICKING_UP: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
pub const STABLE: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const NO_DATA: Color32 = Color32::from_rgb(0xf3, 0x9c, 0x12);

/// Line colour for a state's chart.
pub fn trend_color(class: TrendClass) -> Color32 {
    match class {
        TrendClass::PickingUp => PICKING_UP,
        TrendClass::StableOrDeclining => STABLE,
        TrendClass::NoData => NO_DATA,
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Same hue, lighter, for the rolling-average overlay.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    to_color32(hsl.into_color())
}

// ---------------------------------------------------------------------------
// Region accents
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.55, 0.65).into_color())
        })
        .collect()
}
