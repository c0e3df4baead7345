use eframe::egui::Color32;
use palette::{named, Hsl, IntoColor, Srgb};

use crate::data::passenger::{PassengerClass, FEMALE, MALE};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

fn from_named(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Bronze has no CSS name.
const BRONZE: Color32 = Color32::from_rgb(0xCD, 0x7F, 0x32);

pub fn reference_line() -> Color32 {
    from_named(named::RED)
}

/// Colour of a sex category. Unknown categories fall back to `fallback`.
pub fn sex_color(sex: &str, fallback: Color32) -> Color32 {
    match sex {
        FEMALE => from_named(named::LIGHTCORAL),
        MALE => from_named(named::LIGHTBLUE),
        _ => fallback,
    }
}

/// Gold, silver and bronze for first, second and third class.
pub fn class_color(class: PassengerClass) -> Color32 {
    match class {
        PassengerClass::First => from_named(named::GOLD),
        PassengerClass::Second => from_named(named::SILVER),
        PassengerClass::Third => BRONZE,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One colour per category: the fixed sex colours where they apply, distinct
/// generated hues for anything else.
pub fn sex_colors<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<Color32> {
    let categories: Vec<&str> = categories.into_iter().collect();
    let generated = generate_palette(categories.len());
    categories
        .iter()
        .zip(generated)
        .map(|(sex, fallback)| sex_color(sex, fallback))
        .collect()
}
