//! Pixel to glyph mapping.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use super::ramp::{Ramp, BUCKET_WIDTH, RAMP_LEN};

/// Red channel weight.
pub const RED_WEIGHT: f64 = 0.330;
/// Green channel weight.
pub const GREEN_WEIGHT: f64 = 0.587;
/// Blue channel weight.
///
/// These weights differ from BT.601 (0.299/0.587/0.114). Each channel is
/// bucketed on its own, so changing them changes every rendered file.
pub const BLUE_WEIGHT: f64 = 0.083;

/// One sample read from the resampled image grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSample {
    /// Single intensity value (grayscale images).
    Grayscale(u8),
    /// Red, green and blue channel values.
    Color { r: u8, g: u8, b: u8 },
}

/// What to do with a [`PixelSample::Grayscale`] sample.
///
/// Spelled `skip`, `placeholder` or `expand` on the command line and in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScalarPolicy {
    /// Emit nothing for the pixel. Later glyphs in the row shift left.
    #[default]
    Skip,
    /// Emit three spaces so the grid stays aligned.
    Placeholder,
    /// Treat the intensity as a color with all three channels equal.
    Expand,
}

impl ScalarPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarPolicy::Skip => "skip",
            ScalarPolicy::Placeholder => "placeholder",
            ScalarPolicy::Expand => "expand",
        }
    }
}

/// Three glyphs rendered for a single pixel, in (red, green, blue) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTriplet(pub [char; 3]);

impl GlyphTriplet {
    /// Token emitted for scalar samples under [`ScalarPolicy::Placeholder`].
    pub const BLANK: GlyphTriplet = GlyphTriplet([' '; 3]);
}

impl fmt::Display for GlyphTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{}{}{}", r, g, b)
    }
}

/// Ramp position for a weighted channel intensity.
///
/// Computed as `floor(weighted / BUCKET_WIDTH) - 1` and wrapped into the ramp,
/// so anything below one bucket (including zero) lands on the last glyph.
pub fn ramp_index(weighted: f64) -> usize {
    let len = RAMP_LEN as i64;
    let raw = (weighted / BUCKET_WIDTH as f64).floor() as i64 - 1;
    (((raw % len) + len) % len) as usize
}

/// Map one color pixel to its glyph triplet.
pub fn map_color(r: u8, g: u8, b: u8, ramp: Ramp) -> GlyphTriplet {
    let glyphs = ramp.glyphs();
    GlyphTriplet([
        glyphs[ramp_index(RED_WEIGHT * r as f64)],
        glyphs[ramp_index(GREEN_WEIGHT * g as f64)],
        glyphs[ramp_index(BLUE_WEIGHT * b as f64)],
    ])
}

/// Map a pixel sample to a glyph triplet.
///
/// Returns `None` when the sample is grayscale and the policy is
/// [`ScalarPolicy::Skip`].
pub fn map_pixel(sample: PixelSample, ramp: Ramp, policy: ScalarPolicy) -> Option<GlyphTriplet> {
    match sample {
        PixelSample::Color { r, g, b } => Some(map_color(r, g, b, ramp)),
        PixelSample::Grayscale(v) => match policy {
            ScalarPolicy::Skip => None,
            ScalarPolicy::Placeholder => Some(GlyphTriplet::BLANK),
            ScalarPolicy::Expand => Some(map_color(v, v, v, ramp)),
        },
    }
}
