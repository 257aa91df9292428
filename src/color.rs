use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Value;

/// Hue step between consecutive slice colours. Stepping by the golden angle
/// keeps neighbouring destinations far apart on the colour wheel however many
/// there are.
const GOLDEN_ANGLE: f32 = 137.507_76;

/// `n` slice colours. Hues advance by the golden angle from orange, and
/// lightness alternates so adjacent slices stay apart even when hues meet.
pub fn slice_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (30.0 + i as f32 * GOLDEN_ANGLE) % 360.0;
            let lightness = if i % 2 == 0 { 0.55 } else { 0.42 };
            let rgb: Srgb = Hsl::new(hue, 0.70, lightness).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

/// Slice colour per destination, assigned once over the whole table so a
/// destination keeps its colour while filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<Value, Color32>,
}

impl ColorMap {
    pub fn new(destinations: &BTreeSet<Value>) -> Self {
        let mapping = destinations
            .iter()
            .cloned()
            .zip(slice_palette(destinations.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Unknown values fall back to grey.
    pub fn color_for(&self, value: &Value) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}
