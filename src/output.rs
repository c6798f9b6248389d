//! PNG output and output directory housekeeping

use glob::glob;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Output directory path is not valid UTF-8 and cannot be globbed
    #[error("output directory is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// Output directory path could not be turned into a glob pattern
    #[error("invalid output directory {}: {source}", path.display())]
    Pattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },
}

/// Save an RGBA image to a PNG file.
///
/// Parent directories are created if they don't exist.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Path of the PNG for a codepoint identifier.
pub fn sprite_path(dir: &Path, codepoint: &str) -> PathBuf {
    dir.join(format!("{}.png", codepoint))
}

/// Delete every `*.png` directly inside `dir`.
///
/// Other files and subdirectories are left alone. A missing directory has
/// nothing to clear. Returns the number of files removed.
/// A path that is not valid UTF-8 is an error, not an empty match.
pub fn clear_png_outputs(dir: &Path) -> Result<usize, OutputError> {
    let dir_str = dir.to_str().ok_or_else(|| OutputError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern_dir = glob::Pattern::escape(dir_str);
    let pattern = format!("{}/*.png", pattern_dir);
    let paths = glob(&pattern).map_err(|source| OutputError::Pattern { path: dir.to_path_buf(), source })?;

    let mut removed = 0;
    for entry in paths {
        let path = entry.map_err(io::Error::from)?;
        if path.is_file() {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
