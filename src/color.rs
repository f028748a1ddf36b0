use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

// ---------------------------------------------------------------------------
// Color mapping: comparison self-coupling → Color32
// ---------------------------------------------------------------------------

/// Assigns a distinct colour to each self-coupling of the comparison plot,
/// in the order the curves are drawn.
#[derive(Debug, Clone)]
pub struct CouplingColors {
    mapping: Vec<(f64, Color32)>,
    default_color: Color32,
}

impl CouplingColors {
    pub fn new(couplings: &[f64]) -> Self {
        let palette = generate_palette(couplings.len());
        CouplingColors {
            mapping: couplings.iter().copied().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Colour of the curve drawn with self-coupling `r`.
    pub fn color_for(&self, r: f64) -> Color32 {
        self.mapping
            .iter()
            .find(|(value, _)| *value == r)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(r, c)| (format!("r = {r}"), *c))
            .collect()
    }
}
