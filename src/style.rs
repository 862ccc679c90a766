//! Visual constants for the banner
//!
//! Every field has a default matching the stock look, so a style file
//! only needs to name the values it changes:
//!
//! ```json
//! { "glow_font_size": 90.0, "sharp_color": [255, 255, 255, 255] }
//! ```
use serde::{Deserialize, Serialize};

/// RGBA colour, straight (not premultiplied) alpha
pub type Rgba = [u8; 4];

const GOLD: Rgba = [218, 165, 32, 255];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BannerStyle {
    /// Height of the dark strip behind the text, in pixels
    pub strip_height: f32,
    /// Colour of the opaque middle band of the strip
    pub strip_color: Rgba,
    /// Horizontal positions (0..1) where the strip reaches full and leaves full opacity
    pub strip_fade_in: f32,
    pub strip_fade_out: f32,

    pub glow_font_size: f32,
    pub glow_color: Rgba,
    pub glow_blur_radius: f32,
    pub glow_scale_from: f32,
    pub glow_scale_to: f32,

    pub sharp_font_size: f32,
    pub sharp_color: Rgba,
    pub shadow_color: Rgba,
    pub shadow_blur_radius: f32,
    pub sharp_scale_from: f32,
    pub sharp_scale_to: f32,

    /// Family used when no bundled font is available
    pub fallback_font: String,
}

impl Default for BannerStyle {
    fn default() -> Self {
        BannerStyle {
            strip_height: 120.0,
            strip_color: [0, 0, 0, 180],
            strip_fade_in: 0.15,
            strip_fade_out: 0.85,

            glow_font_size: 78.0,
            glow_color: [GOLD[0], GOLD[1], GOLD[2], 100],
            glow_blur_radius: 15.0,
            glow_scale_from: 0.9,
            glow_scale_to: 1.2,

            sharp_font_size: 72.0,
            sharp_color: GOLD,
            shadow_color: [0, 0, 0, 255],
            shadow_blur_radius: 8.0,
            sharp_scale_from: 0.85,
            sharp_scale_to: 1.0,

            fallback_font: "Times New Roman".to_string(),
        }
    }
}

impl BannerStyle {
    /// Gradient stops across the strip as (position, colour) pairs
    pub fn strip_stops(&self) -> [(f32, Rgba); 4] {
        let [r, g, b, _] = self.strip_color;
        let clear = [r, g, b, 0];
        [
            (0.0, clear),
            (self.strip_fade_in, self.strip_color),
            (self.strip_fade_out, self.strip_color),
            (1.0, clear),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strip_stops() {
        let stops = BannerStyle::default().strip_stops();
        assert_eq!(stops[0], (0.0, [0, 0, 0, 0]));
        assert_eq!(stops[1], (0.15, [0, 0, 0, 180]));
        assert_eq!(stops[2], (0.85, [0, 0, 0, 180]));
        assert_eq!(stops[3], (1.0, [0, 0, 0, 0]));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let style: BannerStyle =
            serde_json::from_str(r#"{ "glow_font_size": 90.0 }"#).unwrap();
        assert_eq!(style.glow_font_size, 90.0);
        assert_eq!(style.sharp_font_size, 72.0);
        assert_eq!(style.fallback_font, "Times New Roman");
    }
}
