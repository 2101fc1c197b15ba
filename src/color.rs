use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Pastel palette for the bar chart
// ---------------------------------------------------------------------------

/// Generates `n` soft pastel colours using evenly spaced hues, one per
/// individual in the chart.
pub fn pastel_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.78);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_one_colour_per_bar() {
        assert!(pastel_palette(0).is_empty());
        assert_eq!(pastel_palette(5).len(), 5);
    }

    #[test]
    fn adjacent_hues_are_distinct() {
        let palette = pastel_palette(8);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
