use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::CellValue;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Soft qualitative palette for the marital-status donut.
pub const PASTEL: [[u8; 3]; 11] = [
    [102, 197, 204],
    [246, 207, 113],
    [248, 156, 116],
    [220, 176, 242],
    [135, 197, 95],
    [158, 185, 243],
    [254, 136, 177],
    [201, 219, 116],
    [139, 224, 164],
    [180, 151, 231],
    [179, 179, 179],
];

/// `n` pastel colours, cycling when there are more categories than entries.
pub fn pastel(n: usize) -> Vec<Color32> {
    PASTEL
        .iter()
        .cycle()
        .take(n)
        .map(|&[r, g, b]| Color32::from_rgb(r, g, b))
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// A piecewise-linear colour scale over evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [[u8; 3]],
}

pub const BLUES: ColorScale = ColorScale {
    stops: &[
        [247, 251, 255],
        [222, 235, 247],
        [198, 219, 239],
        [158, 202, 225],
        [107, 174, 214],
        [66, 146, 198],
        [33, 113, 181],
        [8, 81, 156],
        [8, 48, 107],
    ],
};

pub const VIRIDIS: ColorScale = ColorScale {
    stops: &[
        [68, 1, 84],
        [72, 40, 120],
        [62, 73, 137],
        [49, 104, 142],
        [38, 130, 142],
        [31, 158, 137],
        [53, 183, 121],
        [110, 206, 88],
        [181, 222, 43],
        [253, 231, 37],
    ],
};

impl ColorScale {
    /// Colour at `t` in `[0, 1]`; values outside are clamped. Interpolates in
    /// linear RGB.
    pub fn sample(&self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let last = self.stops.len() - 1;
        let pos = t * last as f32;
        let i = (pos.floor() as usize).min(last.saturating_sub(1));
        let frac = pos - i as f32;

        let a = to_linear(self.stops[i]);
        let b = to_linear(self.stops[(i + 1).min(last)]);
        let mixed: Srgb<u8> = Srgb::<f32>::from_linear(a.mix(b, frac)).into_format();
        Color32::from_rgb(mixed.red, mixed.green, mixed.blue)
    }

    /// Colour for `value` on a `[min, max]` domain. A degenerate domain maps
    /// to the top of the scale.
    pub fn sample_range(&self, value: f64, min: f64, max: f64) -> Color32 {
        if max <= min {
            return self.sample(1.0);
        }
        self.sample((value - min) / (max - min))
    }
}

fn to_linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_for(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one chart to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Assign `palette` colours to `categories` in the given order.
    pub fn new<'a>(
        categories: impl IntoIterator<Item = &'a CellValue>,
        palette: Vec<Color32>,
    ) -> Self {
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints_match_stops() {
        assert_eq!(VIRIDIS.sample(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(VIRIDIS.sample(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(BLUES.sample(-3.0), Color32::from_rgb(247, 251, 255));
        assert_eq!(BLUES.sample(7.0), Color32::from_rgb(8, 48, 107));
    }

    #[test]
    fn degenerate_range_uses_top_of_scale() {
        assert_eq!(BLUES.sample_range(4.0, 4.0, 4.0), BLUES.sample(1.0));
    }

    #[test]
    fn palettes_have_requested_length() {
        assert_eq!(generate_palette(0).len(), 0);
        assert_eq!(generate_palette(5).len(), 5);
        assert_eq!(pastel(13).len(), 13);
        assert_eq!(pastel(12)[11], pastel(1)[0]);
    }

    #[test]
    fn category_colors_fall_back_to_gray() {
        let cats = [CellValue::from("EN"), CellValue::from("HI")];
        let colors = CategoryColors::new(&cats, generate_palette(2));
        assert_ne!(colors.color_for(&cats[0]), colors.color_for(&cats[1]));
        assert_eq!(colors.color_for(&CellValue::from("FR")), Color32::GRAY);
    }

    #[test]
    fn text_contrast() {
        assert_eq!(text_color_for(Color32::WHITE), Color32::BLACK);
        assert_eq!(text_color_for(Color32::from_rgb(8, 48, 107)), Color32::WHITE);
    }
}
