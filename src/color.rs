use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour scale: coefficient in [-1, 1] → Color32
// ---------------------------------------------------------------------------

/// Cool-warm diverging scale: blue at -1, near-white at 0, red at +1.
/// Interpolation happens in linear RGB so the midpoint does not go muddy.
#[derive(Debug, Clone)]
pub struct DivergingScale {
    cold: LinSrgb,
    neutral: LinSrgb,
    warm: LinSrgb,
    missing: Color32,
}

impl DivergingScale {
    /// The end points of matplotlib's `coolwarm` map.
    pub fn coolwarm() -> Self {
        DivergingScale {
            cold: Srgb::new(0.230f32, 0.299, 0.754).into_linear(),
            neutral: Srgb::new(0.865f32, 0.865, 0.865).into_linear(),
            warm: Srgb::new(0.706f32, 0.016, 0.150).into_linear(),
            missing: Color32::GRAY,
        }
    }

    /// Background colour for a coefficient. NaN maps to grey; values outside
    /// [-1, 1] are clamped.
    ///
    /// The range is the fixed coefficient range, not each column's own
    /// min..max, so one colour means the same strength anywhere in the matrix.
    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return self.missing;
        }
        let t = value.clamp(-1.0, 1.0) as f32;
        let lin = if t < 0.0 {
            self.neutral.mix(self.cold, -t)
        } else {
            self.neutral.mix(self.warm, t)
        };
        to_color32(Srgb::from_linear(lin))
    }

    /// Dark or light text, whichever reads better on `background`.
    pub fn text_color_on(background: Color32) -> Color32 {
        let luma = 0.299 * background.r() as f32
            + 0.587 * background.g() as f32
            + 0.114 * background.b() as f32;
        if luma > 140.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_are_cold_and_warm() {
        let scale = DivergingScale::coolwarm();
        let neg = scale.color_for(-1.0);
        let pos = scale.color_for(1.0);
        assert!(neg.b() > neg.r(), "{neg:?}");
        assert!(pos.r() > pos.b(), "{pos:?}");
        assert_eq!(neg, Color32::from_rgb(59, 76, 192));
        assert_eq!(pos, Color32::from_rgb(180, 4, 38));
    }

    #[test]
    fn midpoint_is_neutral_grey() {
        let mid = DivergingScale::coolwarm().color_for(0.0);
        assert_eq!(mid.r(), mid.g());
        assert_eq!(mid.g(), mid.b());
        assert!(mid.r() > 200);
    }

    #[test]
    fn nan_is_missing_and_out_of_range_is_clamped() {
        let scale = DivergingScale::coolwarm();
        assert_eq!(scale.color_for(f64::NAN), Color32::GRAY);
        assert_eq!(scale.color_for(3.0), scale.color_for(1.0));
    }

    #[test]
    fn text_contrasts_with_background() {
        let scale = DivergingScale::coolwarm();
        assert_eq!(
            DivergingScale::text_color_on(scale.color_for(0.0)),
            Color32::BLACK
        );
        assert_eq!(
            DivergingScale::text_color_on(scale.color_for(1.0)),
            Color32::WHITE
        );
    }
}
