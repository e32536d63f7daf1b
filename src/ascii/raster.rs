//! Image decoding and proportional resampling.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage};

use super::pixel::PixelSample;

/// Filter used when resampling to the target grid.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Filter used for palette sources, where blending indices is meaningless.
pub const INDEXED_FILTER: FilterType = FilterType::Nearest;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Errors raised while opening an image.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Failed to open image '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Height that keeps the source aspect ratio at `target_width` columns.
///
/// `floor(src_height * (target_width / src_width))`. Zero-width sources give 0.
pub fn target_height(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    if src_width == 0 {
        return 0;
    }
    let ratio = target_width as f64 / src_width as f64;
    (src_height as f64 * ratio) as u32
}

/// How the source file stores its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Red, green and blue channels (alpha ignored).
    Color,
    /// Single intensity channel.
    Grayscale,
    /// Palette indices. Read back as scalar samples, like grayscale.
    Indexed,
}

impl SourceKind {
    /// Kind of a decoded image. Decoders expand palettes, so this never
    /// reports [`SourceKind::Indexed`]; see [`is_indexed_file`].
    pub fn of_image(image: &DynamicImage) -> Self {
        if image.color().has_color() {
            SourceKind::Color
        } else {
            SourceKind::Grayscale
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, SourceKind::Color)
    }

    fn filter(&self) -> FilterType {
        match self {
            SourceKind::Indexed => INDEXED_FILTER,
            _ => RESAMPLE_FILTER,
        }
    }
}

/// Whether the file at `path` stores palette indices.
///
/// Recognises indexed PNGs and BMPs with 8 or fewer bits per pixel. Any other
/// content reports `false`.
pub fn is_indexed_file(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(32);
    File::open(path)?.take(32).read_to_end(&mut header)?;

    if header.starts_with(PNG_SIGNATURE) {
        let decoder = png::Decoder::new(File::open(path)?);
        return Ok(match decoder.read_info() {
            Ok(reader) => reader.info().color_type == png::ColorType::Indexed,
            Err(_) => false,
        });
    }
    Ok(bmp_header_is_indexed(&header))
}

/// Whether a BMP file header declares 1, 2, 4 or 8 bits per pixel.
pub fn bmp_header_is_indexed(header: &[u8]) -> bool {
    if header.len() < 18 || !header.starts_with(b"BM") {
        return false;
    }
    let dib_size = u32::from_le_bytes([header[14], header[15], header[16], header[17]]);
    // BITMAPCOREHEADER keeps 16-bit dimensions, so the bit count sits earlier.
    let offset = if dib_size == 12 { 24 } else { 28 };
    match header.get(offset..offset + 2) {
        Some(&[lo, hi]) => {
            let bits = u16::from_le_bytes([lo, hi]);
            (1..=8).contains(&bits)
        }
        _ => false,
    }
}

#[cfg(test)]
thread_local! {
    /// Number of rasterizers released on this thread.
    pub(crate) static RELEASES: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[derive(Debug)]
enum Grid {
    Gray(GrayImage),
    Color(RgbImage),
}

/// A decoded image resampled to the output grid.
///
/// The pixel data is held until [`Rasterizer::close`] is called or the
/// rasterizer is dropped, whichever comes first.
#[derive(Debug)]
pub struct Rasterizer {
    grid: Option<Grid>,
    width: u32,
    height: u32,
}

impl Rasterizer {
    /// Decode the image at `path` and resample it to `target_width` columns.
    ///
    /// Palette images are read back as scalar samples.
    pub fn open(path: &Path, target_width: u32) -> Result<Self, RasterError> {
        let image = image::open(path).map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "Opened {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );

        let kind = match is_indexed_file(path) {
            Ok(true) => SourceKind::Indexed,
            Ok(false) => SourceKind::of_image(&image),
            Err(e) => {
                log::warn!("Could not inspect {}: {}", path.display(), e);
                SourceKind::of_image(&image)
            }
        };
        Ok(Self::from_image_as(image, target_width, kind))
    }

    /// Resample an already decoded image to `target_width` columns.
    pub fn from_image(image: DynamicImage, target_width: u32) -> Self {
        let kind = SourceKind::of_image(&image);
        Self::from_image_as(image, target_width, kind)
    }

    /// Resample `image` to `target_width` columns, reading it back as `kind`.
    pub fn from_image_as(image: DynamicImage, target_width: u32, kind: SourceKind) -> Self {
        let width = target_width;
        let height = target_height(image.width(), image.height(), target_width);

        // Resampling to a zero-sized grid has nothing to read back.
        if width == 0 || height == 0 {
            log::debug!("Empty target grid {}x{}", width, height);
            return Self {
                grid: None,
                width,
                height: 0,
            };
        }

        let resized = image.resize_exact(width, height, kind.filter());
        let grid = if kind.is_scalar() {
            Grid::Gray(resized.to_luma8())
        } else {
            Grid::Color(resized.to_rgb8())
        };
        log::debug!("Resampled to {}x{} as {:?}", width, height, kind);

        Self {
            grid: Some(grid),
            width,
            height,
        }
    }

    /// Number of columns in the resampled grid.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the resampled grid.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel data is still held.
    pub fn is_open(&self) -> bool {
        self.grid.is_some()
    }

    /// Read the sample at (`column`, `row`).
    ///
    /// Returns `None` outside the grid or after the rasterizer was closed.
    pub fn pixel(&self, column: u32, row: u32) -> Option<PixelSample> {
        match self.grid.as_ref()? {
            Grid::Gray(img) => img
                .get_pixel_checked(column, row)
                .map(|p| PixelSample::Grayscale(p.0[0])),
            Grid::Color(img) => img.get_pixel_checked(column, row).map(|p| {
                let [r, g, b] = p.0;
                PixelSample::Color { r, g, b }
            }),
        }
    }

    /// Release the pixel data. Later calls are no-ops.
    pub fn close(&mut self) {
        if self.grid.take().is_some() {
            #[cfg(test)]
            RELEASES.with(|r| r.set(r.get() + 1));
            log::debug!("Released {}x{} image", self.width, self.height);
        }
    }
}

impl Drop for Rasterizer {
    fn drop(&mut self) {
        self.close();
    }
}
