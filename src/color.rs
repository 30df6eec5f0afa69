use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::HourKind;
use crate::data::model::{Categorical, Year};

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
            let hue = (i as f32 / n as f32) * 360.0 + 210.0;
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

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Maps the categories of one column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap<C: Ord> {
    mapping: BTreeMap<C, Color32>,
    default_color: Color32,
}

impl<C: Categorical> ColorMap<C> {
    /// One colour per category, stable regardless of which categories are visible.
    pub fn for_categories() -> Self {
        let categories = C::categories();
        let palette = generate_palette(categories.len());
        ColorMap {
            mapping: categories.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &C) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Colours shared by every chart.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    pub years: ColorMap<Year>,
    pub casual: Color32,
    pub registered: Color32,
    pub peak: Color32,
    pub normal: Color32,
}

impl Default for ChartPalette {
    fn default() -> Self {
        let pair = generate_palette(2);
        ChartPalette {
            years: ColorMap::for_categories(),
            casual: pair[0],
            registered: pair[1],
            peak: Color32::from_rgb(230, 85, 60),
            normal: Color32::from_rgb(120, 160, 210),
        }
    }
}

impl ChartPalette {
    pub fn hour_kind(&self, kind: HourKind) -> Color32 {
        match kind {
            HourKind::Peak => self.peak,
            HourKind::Normal => self.normal,
        }
    }
}
