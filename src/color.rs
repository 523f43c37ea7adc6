use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Price gradient
// ---------------------------------------------------------------------------

/// Hue at the cheapest end of the scale (blue) and at the dearest (red).
const HUE_LOW: f32 = 220.0;
const HUE_HIGH: f32 = 0.0;

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Maps prices onto a blue → red gradient so histogram bars and map markers
/// for the same price band share a colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    min: f64,
    max: f64,
}

impl PriceScale {
    /// Scale spanning `prices`.  Empty input gives a degenerate scale that
    /// maps everything to the low colour.
    pub fn from_prices(prices: &[f64]) -> Self {
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            PriceScale { min, max }
        } else {
            PriceScale { min: 0.0, max: 0.0 }
        }
    }

    /// Position of `price` on the scale, in `[0, 1]`.
    pub fn fraction(&self, price: f64) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        ((price - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, price: f64) -> Color32 {
        let t = self.fraction(price);
        hsl_to_color32(HUE_LOW + (HUE_HIGH - HUE_LOW) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_the_scale() {
        let scale = PriceScale::from_prices(&[1000.0, 3000.0, 2000.0]);
        assert_eq!(scale.fraction(1000.0), 0.0);
        assert_eq!(scale.fraction(3000.0), 1.0);
        assert_eq!(scale.fraction(2000.0), 0.5);
        assert_eq!(scale.fraction(9000.0), 1.0);
        assert_ne!(scale.color_for(1000.0), scale.color_for(3000.0));
    }

    #[test]
    fn empty_scale_is_flat() {
        let scale = PriceScale::from_prices(&[]);
        assert_eq!(scale.fraction(42.0), 0.0);
    }
}
