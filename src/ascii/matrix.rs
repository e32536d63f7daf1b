//! Lazy row-major glyph stream over a resampled image.

use std::fmt;
use std::path::Path;

use super::pixel::{map_pixel, GlyphTriplet, ScalarPolicy};
use super::ramp::Ramp;
use super::raster::{RasterError, Rasterizer};

/// One unit of rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Glyphs for one pixel.
    Glyphs(GlyphTriplet),
    /// End of a row.
    Newline,
}

impl Token {
    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Glyphs(triplet) => fmt::Display::fmt(triplet, f),
            Token::Newline => f.write_str("\n"),
        }
    }
}

/// Open `path`, resample it to `width` columns and stream its glyphs.
///
/// Grayscale and palette samples are skipped; use [`AsciiMatrix::new`] to pick another
/// [`ScalarPolicy`].
pub fn ascii_matrix_of(path: &Path, ramp: Ramp, width: u32) -> Result<AsciiMatrix, RasterError> {
    let raster = Rasterizer::open(path, width)?;
    Ok(AsciiMatrix::new(raster, ramp, ScalarPolicy::default()))
}

/// Pull-based token stream over a [`Rasterizer`].
///
/// Yields one [`Token::Glyphs`] per mapped pixel, left to right, and a
/// [`Token::Newline`] after every row, top to bottom. The rasterizer is closed
/// once the last newline is produced, on [`AsciiMatrix::close`], or on drop.
#[derive(Debug)]
pub struct AsciiMatrix {
    raster: Rasterizer,
    ramp: Ramp,
    policy: ScalarPolicy,
    row: u32,
    column: u32,
}

impl AsciiMatrix {
    pub fn new(raster: Rasterizer, ramp: Ramp, policy: ScalarPolicy) -> Self {
        Self {
            raster,
            ramp,
            policy,
            row: 0,
            column: 0,
        }
    }

    /// Columns in the underlying grid.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Rows in the underlying grid.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Whether the underlying image has been released.
    pub fn is_closed(&self) -> bool {
        !self.raster.is_open()
    }

    /// Stop early and release the image. `next()` returns `None` afterwards.
    pub fn close(&mut self) {
        self.row = self.raster.height();
        self.raster.close();
    }
}

impl Iterator for AsciiMatrix {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.row < self.raster.height() {
            if self.column == self.raster.width() {
                self.column = 0;
                self.row += 1;
                if self.row == self.raster.height() {
                    self.raster.close();
                }
                return Some(Token::Newline);
            }

            let sample = self.raster.pixel(self.column, self.row)?;
            self.column += 1;
            if let Some(triplet) = map_pixel(sample, self.ramp, self.policy) {
                return Some(Token::Glyphs(triplet));
            }
        }
        None
    }
}
