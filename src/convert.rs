//! Batch conversion of an image directory into `<name>_ascii.txt` files.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ascii::{AsciiMatrix, RasterError, Ramp, Rasterizer, ScalarPolicy};

/// File extensions accepted in the input directory (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "png", "bmp"];

/// Errors that can occur during batch conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read image directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unsupported files in image directory (only .jpg, .png, .bmp are accepted): {}", list_paths(.0))]
    UnsupportedFiles(Vec<PathBuf>),
    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Settings shared by every image in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub width: u32,
    pub ramp: Ramp,
    pub policy: ScalarPolicy,
    pub output_dir: PathBuf,
}

/// Result of converting a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All tokens were written to this file.
    Written(PathBuf),
    /// Cancellation was requested mid-image; the partial file was removed.
    Cancelled,
}

/// Summary of a batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub cancelled: bool,
}

/// Whether `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Output file name for an image: everything before the first `.`, plus `_ascii.txt`.
pub fn output_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    format!("{}_ascii.txt", stem)
}

/// List the images in `dir`, sorted by file name.
///
/// Fails if any regular file in `dir` has an unsupported extension.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let read_dir_err = |source| ConvertError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    let mut rejected = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !entry.file_type().map_err(read_dir_err)?.is_file() {
            continue;
        }
        if is_supported(&path) {
            images.push(path);
        } else {
            rejected.push(path);
        }
    }

    if !rejected.is_empty() {
        rejected.sort();
        return Err(ConvertError::UnsupportedFiles(rejected));
    }
    images.sort();
    Ok(images)
}

/// Drain `matrix` into `out`, one write per token.
///
/// Returns `Ok(false)` if `cancel` was raised before the stream ended; the
/// matrix is closed in that case.
pub fn write_tokens<W: Write>(
    matrix: &mut AsciiMatrix,
    out: &mut W,
    cancel: &AtomicBool,
) -> io::Result<bool> {
    #[allow(clippy::while_let_on_iterator)]
    while let Some(token) = matrix.next() {
        if cancel.load(Ordering::SeqCst) {
            matrix.close();
            return Ok(false);
        }
        write!(out, "{}", token)?;
    }
    Ok(true)
}

/// Output file that is deleted on drop unless [`PartialFile::keep`] is called.
///
/// Covers both cancellation and write errors, so a truncated file never stays
/// behind.
#[derive(Debug)]
pub struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file and hand back its path.
    pub fn keep(mut self) -> PathBuf {
        self.keep = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.keep || !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed partial output {}", self.path.display()),
            Err(e) => log::warn!(
                "Failed to remove partial output {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Convert one image into its text file under `settings.output_dir`.
pub fn convert_image(
    image: &Path,
    settings: &ConvertSettings,
    cancel: &AtomicBool,
) -> Result<Outcome, ConvertError> {
    let raster = Rasterizer::open(image, settings.width)?;
    let mut matrix = AsciiMatrix::new(raster, settings.ramp, settings.policy);

    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = settings.output_dir.join(output_name(&file_name));
    let write_err = |source| ConvertError::Write {
        path: target.clone(),
        source,
    };

    let file = File::create(&target).map_err(write_err)?;
    let partial = PartialFile::new(target.clone());
    let mut out = BufWriter::new(file);
    let finished = write_tokens(&mut matrix, &mut out, cancel).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    drop(out);

    if !finished {
        log::warn!("Cancelled while converting {}", image.display());
        return Ok(Outcome::Cancelled);
    }

    partial.keep();
    log::info!(
        "Converted {} to {} ({}x{})",
        image.display(),
        target.display(),
        matrix.width(),
        matrix.height()
    );
    Ok(Outcome::Written(target))
}

/// Print the numbered image listing and banner shown before any prompt.
pub fn announce_images<W: Write>(images: &[PathBuf], status: &mut W) -> io::Result<()> {
    for (i, image) in images.iter().enumerate() {
        writeln!(status, "Image {}: {}", i, display_name(image))?;
    }
    writeln!(status, "Image to ASCII: Convert images into ASCII characters!")
}

/// Convert `images` one at a time, reporting progress to `status`.
///
/// A failing image is logged and recorded in the report; the batch carries on
/// with the next one. Cancellation stops the batch after the current token.
pub fn convert_all<W: Write>(
    images: &[PathBuf],
    settings: &ConvertSettings,
    cancel: &AtomicBool,
    status: &mut W,
) -> Result<BatchReport, ConvertError> {
    if !settings.output_dir.exists() {
        fs::create_dir_all(&settings.output_dir).map_err(|source| {
            ConvertError::CreateOutputDir {
                path: settings.output_dir.clone(),
                source,
            }
        })?;
    }

    let mut report = BatchReport::default();
    for image in images {
        if cancel.load(Ordering::SeqCst) {
            report.cancelled = true;
            break;
        }
        match convert_image(image, settings, cancel) {
            Ok(Outcome::Written(target)) => {
                writeln!(
                    status,
                    "Success! '{}' converted to '{}'!",
                    display_name(image),
                    display_name(&target)
                )?;
                report.converted.push(target);
            }
            Ok(Outcome::Cancelled) => {
                report.cancelled = true;
                break;
            }
            Err(e) => {
                log::error!("{}", e);
                writeln!(status, "Failed to convert '{}': {}", display_name(image), e)?;
                report.failed.push(image.clone());
            }
        }
    }
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Install a Ctrl+C handler that raises `flag`.
///
/// Install it only once settings are known: while it is active, Ctrl+C no
/// longer interrupts a blocking prompt.
pub fn setup_ctrlc_handler(flag: Arc<AtomicBool>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        eprintln!("\nReceived Ctrl+C, stopping...");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a.jpg")));
        assert!(is_supported(Path::new("a.PNG")));
        assert!(is_supported(Path::new("dir/a.Bmp")));
        assert!(!is_supported(Path::new("a.gif")));
        assert!(!is_supported(Path::new("a.jpeg")));
        assert!(!is_supported(Path::new("README")));
    }

    #[test]
    fn test_output_name_uses_first_dot() {
        assert_eq!(output_name("cat.png"), "cat_ascii.txt");
        assert_eq!(output_name("my.holiday.jpg"), "my_ascii.txt");
    }

    #[test]
    fn test_partial_file_removed_unless_kept() {
        let dir = tempfile::tempdir().unwrap();
        let dropped = dir.path().join("dropped_ascii.txt");
        let kept = dir.path().join("kept_ascii.txt");
        fs::write(&dropped, "half").unwrap();
        fs::write(&kept, "all").unwrap();

        drop(PartialFile::new(dropped.clone()));
        assert!(!dropped.exists());

        assert_eq!(PartialFile::new(kept.clone()).keep(), kept);
        assert!(kept.exists());
    }

    #[test]
    fn test_partial_file_missing_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        drop(PartialFile::new(dir.path().join("never_created.txt")));
    }

    #[test]
    fn test_announce_images_lists_then_banner() {
        let images = vec![PathBuf::from("in/a.png"), PathBuf::from("in/b.jpg")];
        let mut out = Vec::new();
        announce_images(&images, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Image 0: a.png\nImage 1: b.jpg\nImage to ASCII: Convert images into ASCII characters!\n"
        );
    }

    #[test]
    fn test_unsupported_error_lists_files() {
        let err = ConvertError::UnsupportedFiles(vec![
            PathBuf::from("a.gif"),
            PathBuf::from("b.txt"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("a.gif, b.txt"));
    }
}
