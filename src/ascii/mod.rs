//! Image to ASCII rendering.
//!
//! The pipeline has four stages:
//!
//! 1. **Ramp** - fixed 10-glyph ramps, normal and inverted
//! 2. **Rasterizer** - decode an image and resample it to the target width
//! 3. **Pixel mapping** - per-channel weighted intensity to ramp glyphs
//! 4. **Matrix** - lazy row-major token stream with row newlines
//!
//! [`ascii_matrix_of`] ties them together for a file on disk.

mod matrix;
mod pixel;
mod ramp;
mod raster;

pub use matrix::{ascii_matrix_of, AsciiMatrix, Token};
pub use pixel::{
    map_color, map_pixel, ramp_index, GlyphTriplet, PixelSample, ScalarPolicy, BLUE_WEIGHT,
    GREEN_WEIGHT, RED_WEIGHT,
};
pub use ramp::{Ramp, BUCKET_WIDTH, INVERTED_RAMP, NORMAL_RAMP, RAMP_LEN};
pub use raster::{
    bmp_header_is_indexed, is_indexed_file, target_height, RasterError, Rasterizer, SourceKind,
    INDEXED_FILTER, RESAMPLE_FILTER,
};
