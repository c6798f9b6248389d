//! Sprite sheet loading and grid indexing
//!
//! Telegram Desktop packs its emoji into up to eight sheets of 72x72 cells,
//! 32 columns wide. A *global position* addresses one cell across all sheets
//! laid end to end; sheets may be shorter than the nominal 16 rows, so the
//! last sheet is usually only partially filled.

use image::{GenericImageView, ImageError, RgbaImage, SubImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading sprite sheets
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// None of the expected sheet files exist
    #[error("no sprite sheets found in {}", .0.display())]
    NoSheets(PathBuf),
    /// A sheet exists but could not be opened
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A sheet exists but could not be decoded
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Cell geometry shared by every sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Width and height of one square cell, in pixels
    pub cell_size: u32,
    /// Cells per row
    pub columns: u32,
    /// Rows in a full sheet
    pub rows_per_sheet: u32,
}

impl GridLayout {
    /// Telegram Desktop's emoji sheet geometry: 72px cells, 32x16 per sheet.
    pub const TDESKTOP: GridLayout = GridLayout { cell_size: 72, columns: 32, rows_per_sheet: 16 };

    /// Number of cells in a full sheet.
    pub fn sheet_capacity(&self) -> usize {
        (self.columns * self.rows_per_sheet) as usize
    }

    /// Split a global position into sheet, row and column.
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_extract::sheets::{CellAddress, GridLayout};
    ///
    /// let grid = GridLayout::TDESKTOP;
    /// assert_eq!(grid.locate(32), CellAddress { sheet: 0, row: 1, col: 0 });
    /// assert_eq!(grid.locate(512), CellAddress { sheet: 1, row: 0, col: 0 });
    /// ```
    pub fn locate(&self, position: usize) -> CellAddress {
        let capacity = self.sheet_capacity();
        let columns = self.columns as usize;
        let in_sheet = position % capacity;
        CellAddress {
            sheet: position / capacity,
            row: (in_sheet / columns) as u32,
            col: (in_sheet % columns) as u32,
        }
    }

    /// Number of complete rows in a sheet of the given pixel height.
    pub fn rows_in(&self, sheet: &RgbaImage) -> u32 {
        sheet.height() / self.cell_size
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::TDESKTOP
    }
}

/// Location of one cell within the sheet set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    /// Zero-based sheet index (`emoji_1` is sheet 0)
    pub sheet: usize,
    pub row: u32,
    pub col: u32,
}

/// Where to look for sheet files and how they are named.
///
/// Sheets are `{dir}/{prefix}{n}.{extension}` for `n` in `1..=max_sheets`.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
    pub max_sheets: usize,
}

impl SheetSource {
    /// Telegram Desktop naming: `emoji_1.webp` through `emoji_8.webp`.
    pub fn tdesktop(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "emoji_".to_string(),
            extension: "webp".to_string(),
            max_sheets: 8,
        }
    }

    /// Path of the sheet with the given one-based number.
    pub fn sheet_path(&self, number: usize) -> PathBuf {
        self.dir.join(format!("{}{}.{}", self.prefix, number, self.extension))
    }
}

/// Decoded sprite sheets, in sheet order.
#[derive(Debug, Clone)]
pub struct SpriteSheets {
    layout: GridLayout,
    sheets: Vec<RgbaImage>,
}

impl SpriteSheets {
    /// Wrap already-decoded sheets.
    pub fn from_images(layout: GridLayout, sheets: Vec<RgbaImage>) -> Self {
        Self { layout, sheets }
    }

    /// Load every sheet the source names, skipping absent files.
    ///
    /// Fails if no sheet could be found, or if a sheet that exists does
    /// not decode.
    pub fn load(source: &SheetSource, layout: GridLayout) -> Result<Self, SheetError> {
        let mut sheets = Vec::new();
        for number in 1..=source.max_sheets {
            let path = source.sheet_path(number);
            if !path.exists() {
                log::debug!("Sheet {} absent, skipping", path.display());
                continue;
            }
            let sheet = decode_sheet(&path)?;
            log::info!("Loaded {} ({}x{})", path.display(), sheet.width(), sheet.height());
            sheets.push(sheet);
        }

        if sheets.is_empty() {
            return Err(SheetError::NoSheets(source.dir.clone()));
        }
        Ok(Self { layout, sheets })
    }

    /// Number of loaded sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Cells available across all sheets, counting only complete rows.
    pub fn total_sprites(&self) -> usize {
        self.sheets
            .iter()
            .map(|s| (self.layout.columns * self.layout.rows_in(s)) as usize)
            .sum()
    }

    /// View of the cell at a global position.
    ///
    /// Returns `None` when the position falls past the loaded sheets, past
    /// the rows its sheet actually has, or past a narrow sheet's width.
    pub fn cell(&self, position: usize) -> Option<SubImage<&RgbaImage>> {
        let addr = self.layout.locate(position);
        let sheet = self.sheets.get(addr.sheet)?;
        if addr.row >= self.layout.rows_in(sheet) {
            return None;
        }

        let size = self.layout.cell_size;
        let x = addr.col * size;
        let y = addr.row * size;
        if x + size > sheet.width() {
            return None;
        }
        Some(sheet.view(x, y, size, size))
    }
}

/// Decode a sheet, sniffing the format from its content.
fn decode_sheet(path: &Path) -> Result<RgbaImage, SheetError> {
    let reader = image::io::Reader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| SheetError::Io { path: path.to_path_buf(), source })?;
    let image = reader.decode().map_err(|source| SheetError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use tempfile::TempDir;

    /// Small grid so test sheets stay tiny: 2px cells, 4 columns, 2 rows.
    const TINY: GridLayout = GridLayout { cell_size: 2, columns: 4, rows_per_sheet: 2 };

    /// Sheet whose cell `i` (row-major) is filled with red = `base + i`.
    fn numbered_sheet(layout: GridLayout, rows: u32, base: u8) -> RgbaImage {
        let size = layout.cell_size;
        RgbaImage::from_fn(layout.columns * size, rows * size, |x, y| {
            let index = (y / size) * layout.columns + x / size;
            Rgba([base + index as u8, 0, 0, 255])
        })
    }

    fn red_at(view: &SubImage<&RgbaImage>) -> u8 {
        view.get_pixel(0, 0).0[0]
    }

    #[test]
    fn test_locate_origin() {
        let grid = GridLayout::TDESKTOP;
        assert_eq!(grid.locate(0), CellAddress { sheet: 0, row: 0, col: 0 });
    }

    #[test]
    fn test_locate_row_wrap() {
        let grid = GridLayout::TDESKTOP;
        assert_eq!(grid.locate(31), CellAddress { sheet: 0, row: 0, col: 31 });
        assert_eq!(grid.locate(32), CellAddress { sheet: 0, row: 1, col: 0 });
    }

    #[test]
    fn test_locate_sheet_wrap() {
        let grid = GridLayout::TDESKTOP;
        assert_eq!(grid.sheet_capacity(), 512);
        assert_eq!(grid.locate(511), CellAddress { sheet: 0, row: 15, col: 31 });
        assert_eq!(grid.locate(512), CellAddress { sheet: 1, row: 0, col: 0 });
        assert_eq!(grid.locate(3142), CellAddress { sheet: 6, row: 2, col: 6 });
    }

    #[test]
    fn test_total_sprites_counts_full_rows_only() {
        let full = numbered_sheet(TINY, 2, 0);
        // One complete row plus a stray pixel row
        let partial = RgbaImage::new(TINY.columns * TINY.cell_size, TINY.cell_size + 1);
        let sheets = SpriteSheets::from_images(TINY, vec![full, partial]);
        assert_eq!(sheets.total_sprites(), 8 + 4);
    }

    #[test]
    fn test_cell_crops_expected_region() {
        let sheets = SpriteSheets::from_images(TINY, vec![numbered_sheet(TINY, 2, 0)]);
        let view = sheets.cell(5).unwrap();
        assert_eq!(view.dimensions(), (2, 2));
        assert_eq!(red_at(&view), 5);
        // Whole cell belongs to the same source cell
        assert_eq!(view.get_pixel(1, 1).0[0], 5);
    }

    #[test]
    fn test_cell_on_second_sheet() {
        let sheets = SpriteSheets::from_images(
            TINY,
            vec![numbered_sheet(TINY, 2, 0), numbered_sheet(TINY, 2, 100)],
        );
        assert_eq!(red_at(&sheets.cell(8).unwrap()), 100);
        assert_eq!(red_at(&sheets.cell(13).unwrap()), 105);
    }

    #[test]
    fn test_cell_past_last_sheet() {
        let sheets = SpriteSheets::from_images(TINY, vec![numbered_sheet(TINY, 2, 0)]);
        assert!(sheets.cell(8).is_none());
        assert!(sheets.cell(10_000).is_none());
    }

    #[test]
    fn test_cell_past_short_sheet_rows() {
        // First sheet full, second has a single row
        let sheets = SpriteSheets::from_images(
            TINY,
            vec![numbered_sheet(TINY, 2, 0), numbered_sheet(TINY, 1, 100)],
        );
        assert!(sheets.cell(11).is_some());
        assert!(sheets.cell(12).is_none());
        assert_eq!(sheets.total_sprites(), 12);
    }

    #[test]
    fn test_cell_narrow_sheet() {
        let narrow = RgbaImage::new(3 * TINY.cell_size, 2 * TINY.cell_size);
        let sheets = SpriteSheets::from_images(TINY, vec![narrow]);
        assert!(sheets.cell(2).is_some());
        assert!(sheets.cell(3).is_none());
    }

    #[test]
    fn test_sheet_path_naming() {
        let source = SheetSource::tdesktop("/sprites");
        assert_eq!(source.sheet_path(1), PathBuf::from("/sprites/emoji_1.webp"));
        assert_eq!(source.sheet_path(8), PathBuf::from("/sprites/emoji_8.webp"));
    }

    #[test]
    fn test_load_skips_missing_sheets() {
        let dir = TempDir::new().unwrap();
        let source = SheetSource::tdesktop(dir.path());
        // Sheets 2 and 5 only; PNG content under the conventional name
        numbered_sheet(TINY, 2, 0)
            .save_with_format(source.sheet_path(2), ImageFormat::Png)
            .unwrap();
        numbered_sheet(TINY, 1, 100)
            .save_with_format(source.sheet_path(5), ImageFormat::Png)
            .unwrap();

        let sheets = SpriteSheets::load(&source, TINY).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets.total_sprites(), 12);
        // Sheet order is preserved: sheet 5 follows sheet 2
        assert_eq!(red_at(&sheets.cell(8).unwrap()), 100);
    }

    #[test]
    fn test_load_no_sheets() {
        let dir = TempDir::new().unwrap();
        let source = SheetSource::tdesktop(dir.path());
        let err = SpriteSheets::load(&source, TINY).unwrap_err();
        assert!(matches!(err, SheetError::NoSheets(_)));
    }

    #[test]
    fn test_load_corrupt_sheet() {
        let dir = TempDir::new().unwrap();
        let source = SheetSource::tdesktop(dir.path());
        std::fs::write(source.sheet_path(1), b"not an image").unwrap();
        let err = SpriteSheets::load(&source, TINY).unwrap_err();
        assert!(matches!(err, SheetError::Decode { .. }));
    }
}
