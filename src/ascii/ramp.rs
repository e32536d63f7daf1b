//! Glyph ramp definitions for ASCII rendering.

/// Number of glyphs in every ramp.
pub const RAMP_LEN: usize = 10;

/// Normal glyph ramp, dense blocks at the ends and `$` in the middle.
pub const NORMAL_RAMP: [char; RAMP_LEN] = ['█', '▓', '▒', '░', '$', '$', '░', '▒', '▓', '█'];

/// Inverted glyph ramp: the exact reversal of [`NORMAL_RAMP`].
pub const INVERTED_RAMP: [char; RAMP_LEN] = reversed(NORMAL_RAMP);

/// Intensity range covered by a single glyph (integer floor of 255 / ramp length).
pub const BUCKET_WIDTH: u32 = 255 / RAMP_LEN as u32;

const fn reversed(ramp: [char; RAMP_LEN]) -> [char; RAMP_LEN] {
    let mut out = ramp;
    let mut i = 0;
    while i < RAMP_LEN {
        out[i] = ramp[RAMP_LEN - 1 - i];
        i += 1;
    }
    out
}

/// Which glyph ramp to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ramp {
    #[default]
    Normal,
    Inverted,
}

impl Ramp {
    /// Get the glyphs for this ramp.
    pub fn glyphs(&self) -> &'static [char; RAMP_LEN] {
        match self {
            Ramp::Normal => &NORMAL_RAMP,
            Ramp::Inverted => &INVERTED_RAMP,
        }
    }

    /// Pick the ramp from an "invert" switch.
    pub fn from_invert(invert: bool) -> Self {
        if invert {
            Ramp::Inverted
        } else {
            Ramp::Normal
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ramp::Normal => "normal",
            Ramp::Inverted => "inverted",
        }
    }
}
