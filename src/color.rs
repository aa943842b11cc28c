use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale
// ---------------------------------------------------------------------------

/// Colour at position `t` (clamped to 0..=1) of a purple → pink → amber ramp.
pub fn ramp_color(t: f64) -> Color32 {
    let t = (if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 }) as f32;
    let hue = 270.0 + t * 130.0;
    let lightness = 0.35 + t * 0.25;
    let hsl = Hsl::new(hue, 0.8, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Maps a numeric range (e.g. total slopes of the visible resorts) onto
/// [`ramp_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// `None` when `values` is empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(ColorScale { min: v, max: v }),
            Some(s) => Some(ColorScale {
                min: s.min.min(v),
                max: s.max.max(v),
            }),
        })
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return ramp_color(1.0);
        }
        ramp_color((value - self.min) / range)
    }

    /// `steps` evenly spaced legend entries from min to max.
    pub fn legend_entries(&self, steps: usize) -> Vec<(String, Color32)> {
        if steps < 2 {
            return vec![(format!("{:.0}", self.max), self.color_for(self.max))];
        }
        (0..steps)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (steps - 1) as f64;
                (format!("{v:.0}"), self.color_for(v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_spans_observed_values() {
        let scale = ColorScale::from_values([40.0, 10.0, 239.0]).unwrap();
        assert_eq!(scale.color_for(10.0), ramp_color(0.0));
        assert_eq!(scale.color_for(239.0), ramp_color(1.0));
        assert_eq!(scale.color_for(1000.0), ramp_color(1.0));
    }

    #[test]
    fn empty_values_have_no_scale() {
        assert_eq!(ColorScale::from_values(std::iter::empty()), None);
    }

    #[test]
    fn flat_scale_does_not_divide_by_zero() {
        let scale = ColorScale::from_values([5.0, 5.0]).unwrap();
        assert_eq!(scale.color_for(5.0), ramp_color(1.0));
    }

    #[test]
    fn legend_runs_low_to_high() {
        let scale = ColorScale::from_values([0.0, 100.0]).unwrap();
        let entries = scale.legend_entries(3);
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["0", "50", "100"]);
    }
}
