//! Three-pass export of emoji sprites
//!
//! The listing and the sheets line up one to one until list position
//! 2724. After that the sheets run two cells behind the listing, except
//! for the hearts, whose cells are pinned by [`MANUAL_SPRITE_POSITIONS`].
//!
//! Passes run in order and share one set of identifiers already claimed:
//!
//! 1. **direct**: list index == sprite position, below the cutoff
//! 2. **manual**: pinned positions from the override table
//! 3. **offset**: list index - offset == sprite position, from the cutoff on
//!
//! An identifier claimed by an earlier pass is never written again.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codepoint::emoji_to_codepoint;
use crate::emoji_list::{read_emoji_list, ListError};
use crate::output::{clear_png_outputs, save_png, sprite_path, OutputError};
use crate::overrides::MANUAL_SPRITE_POSITIONS;
use crate::sheets::{GridLayout, SheetError, SheetSource, SpriteSheets};

/// Any error that aborts an extraction run
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error(transparent)]
    List(#[from] ListError),
    #[error(transparent)]
    Sheets(#[from] SheetError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Boundary constants of the drifted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTuning {
    /// First list index that no longer maps directly onto a sprite
    pub cutoff: usize,
    /// How far the sprites lag behind the listing from the cutoff on
    pub offset: usize,
}

impl Default for PassTuning {
    fn default() -> Self {
        Self { cutoff: 2724, offset: 2 }
    }
}

/// Destination for extracted cells: one PNG per identifier in `dir`.
struct PngSink<'a> {
    dir: &'a Path,
}

impl PngSink<'_> {
    /// Write the cell at `position`, if the sheets have one there.
    fn export(&self, sheets: &SpriteSheets, position: usize, codepoint: &str) -> Result<bool, OutputError> {
        match sheets.cell(position) {
            Some(view) => {
                save_png(&view.to_image(), &sprite_path(self.dir, codepoint))?;
                Ok(true)
            }
            None => {
                log::debug!("No cell at position {} for {}", position, codepoint);
                Ok(false)
            }
        }
    }
}

/// Pass 1: list positions below the cutoff map straight onto sprites.
pub fn direct_pass(
    emojis: &[String],
    sheets: &SpriteSheets,
    tuning: PassTuning,
    seen: &mut HashSet<String>,
    out_dir: &Path,
) -> Result<usize, OutputError> {
    let sink = PngSink { dir: out_dir };
    let end = tuning.cutoff.min(sheets.total_sprites());
    let mut extracted = 0;

    for (index, emoji) in emojis.iter().enumerate().take(end) {
        let codepoint = emoji_to_codepoint(emoji);
        if codepoint.is_empty() || !seen.insert(codepoint.clone()) {
            continue;
        }
        if sink.export(sheets, index, &codepoint)? {
            extracted += 1;
        }
    }

    log::info!("Extracted {} emojis from auto-mapping (positions 0-{})", extracted, end.saturating_sub(1));
    Ok(extracted)
}

/// Pass 2: identifiers with a pinned sprite position.
pub fn manual_pass(
    sheets: &SpriteSheets,
    seen: &mut HashSet<String>,
    out_dir: &Path,
) -> Result<usize, OutputError> {
    let sink = PngSink { dir: out_dir };
    let mut extracted = 0;

    for &(codepoint, position) in MANUAL_SPRITE_POSITIONS {
        if !seen.insert(codepoint.to_string()) {
            log::debug!("{} already extracted, ignoring pinned position", codepoint);
            continue;
        }
        if sink.export(sheets, position, codepoint)? {
            extracted += 1;
        }
    }

    log::info!("Extracted {} emojis from manual mapping", extracted);
    Ok(extracted)
}

/// Pass 3: the remaining tail, shifted back by the offset.
pub fn offset_pass(
    emojis: &[String],
    sheets: &SpriteSheets,
    tuning: PassTuning,
    seen: &mut HashSet<String>,
    out_dir: &Path,
) -> Result<usize, OutputError> {
    let sink = PngSink { dir: out_dir };
    let total = sheets.total_sprites();
    let end = emojis.len().min(total + tuning.offset);
    let mut extracted = 0;

    for index in tuning.cutoff..end {
        let codepoint = emoji_to_codepoint(&emojis[index]);
        if codepoint.is_empty() || seen.contains(&codepoint) {
            continue;
        }
        let position = match index.checked_sub(tuning.offset) {
            Some(p) if p < total => p,
            _ => continue,
        };
        seen.insert(codepoint.clone());
        if sink.export(sheets, position, &codepoint)? {
            extracted += 1;
        }
    }

    log::info!("Extracted {} emojis with offset correction", extracted);
    Ok(extracted)
}

/// Counts from one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Entries parsed from the listing's first section
    pub parsed: usize,
    /// Sheets that were found and decoded
    pub sheets: usize,
    /// Cells available across all sheets
    pub total_sprites: usize,
    pub direct: usize,
    pub manual: usize,
    pub offset: usize,
    pub total: usize,
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct ExtractPlan {
    pub emoji_txt: PathBuf,
    pub sheets: SheetSource,
    pub layout: GridLayout,
    pub out_dir: PathBuf,
    pub tuning: PassTuning,
}

impl ExtractPlan {
    /// Plan with Telegram Desktop's sheet naming, grid and drift constants.
    pub fn tdesktop(emoji_txt: impl Into<PathBuf>, sprite_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            emoji_txt: emoji_txt.into(),
            sheets: SheetSource::tdesktop(sprite_dir),
            layout: GridLayout::TDESKTOP,
            out_dir: out_dir.into(),
            tuning: PassTuning::default(),
        }
    }
}

/// Parse the listing, load the sheets, clear old output and run all passes.
pub fn run(plan: &ExtractPlan) -> Result<ExtractReport, ExtractError> {
    let emojis = read_emoji_list(&plan.emoji_txt)?;
    log::info!("Parsed {} emojis from {}", emojis.len(), plan.emoji_txt.display());

    let sheets = SpriteSheets::load(&plan.sheets, plan.layout)?;
    let total_sprites = sheets.total_sprites();
    log::info!("Total sprites available: {}", total_sprites);

    std::fs::create_dir_all(&plan.out_dir).map_err(OutputError::from)?;
    let cleared = clear_png_outputs(&plan.out_dir)?;
    log::debug!("Removed {} old PNGs from {}", cleared, plan.out_dir.display());

    let mut seen = HashSet::new();
    let direct = direct_pass(&emojis, &sheets, plan.tuning, &mut seen, &plan.out_dir)?;
    let manual = manual_pass(&sheets, &mut seen, &plan.out_dir)?;
    let offset = offset_pass(&emojis, &sheets, plan.tuning, &mut seen, &plan.out_dir)?;

    let total = direct + manual + offset;
    log::info!("Total: {} emojis", total);

    Ok(ExtractReport {
        parsed: emojis.len(),
        sheets: sheets.len(),
        total_sprites,
        direct,
        manual,
        offset,
        total,
    })
}
