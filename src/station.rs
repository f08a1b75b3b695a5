use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::codec::{PaletteCodec, render_preview};
use crate::error::{DropRejection, PaletteError, Result};
use crate::grid::PaletteGrid;
use crate::normalize::Normalization;

/// Extensions accepted for a drop, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Something files can be dropped onto.
pub trait DropTarget {
    /// Decide whether a drop of `files` would be accepted, without touching any state.
    fn is_interested(&self, files: &[PathBuf]) -> std::result::Result<(), DropRejection>;

    fn files_dropped(&self, files: &[PathBuf]) -> DropOutcome;
}

/// Something that offers files for dragging out to another application.
pub trait DragSource {
    fn drag_files(&self) -> Vec<PathBuf>;
}

/// Result of a single drop transaction.
#[derive(Debug)]
pub enum DropOutcome {
    Saved { path: PathBuf, palette: PaletteGrid },
    /// The drop was refused before any processing.
    Rejected(DropRejection),
    /// Another drop is still being processed.
    Busy,
    /// Processing failed; the previous palette and file are untouched.
    Failed(PaletteError),
}

impl DropOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DropOutcome::Saved { .. })
    }
}

/// Check the extension after the last `.` of the file name.
pub fn is_image_file(path: &Path) -> std::result::Result<(), DropRejection> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let Some((_, ext)) = name.rsplit_once('.') else {
        return Err(DropRejection::MissingExtension(path.to_path_buf()));
    };

    if IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        Ok(())
    } else {
        Err(DropRejection::UnsupportedExtension(ext.to_string()))
    }
}

/// Accept exactly one file with a known image extension.
pub fn validate_drop(files: &[PathBuf]) -> std::result::Result<&Path, DropRejection> {
    match files {
        [single] => {
            is_image_file(single)?;
            Ok(single.as_path())
        }
        _ => Err(DropRejection::FileCount(files.len())),
    }
}

pub fn load_source(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| PaletteError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Turns dropped images into the palette file and keeps the latest palette for display.
///
/// Only one drop is processed at a time; a drop that arrives while another is in
/// flight is answered with [`DropOutcome::Busy`].
#[derive(Debug)]
pub struct PaletteStation {
    codec: PaletteCodec,
    mode: Normalization,
    palette: RwLock<PaletteGrid>,
    transaction: Mutex<()>,
}

impl PaletteStation {
    pub fn new(codec: PaletteCodec) -> Self {
        Self::with_normalization(codec, Normalization::default())
    }

    pub fn with_normalization(codec: PaletteCodec, mode: Normalization) -> Self {
        Self {
            codec,
            mode,
            palette: RwLock::new(PaletteGrid::default()),
            transaction: Mutex::new(()),
        }
    }

    pub fn codec(&self) -> &PaletteCodec {
        &self.codec
    }

    /// Copy of the palette currently on display.
    pub fn palette(&self) -> PaletteGrid {
        *self.palette.read()
    }

    pub fn preview(&self, scale: u32) -> RgbImage {
        render_preview(&self.palette(), scale)
    }

    /// Load → build → normalize → sort → save, then publish the new palette.
    ///
    /// Nothing is published unless the file was written. Fails with
    /// [`PaletteError::Busy`] while another transaction holds the station.
    pub fn process(&self, path: &Path) -> Result<(PathBuf, PaletteGrid)> {
        let Some(_guard) = self.transaction.try_lock() else {
            return Err(PaletteError::Busy);
        };

        let src = load_source(path)?;
        debug!("decoded {} ({}x{})", path.display(), src.width(), src.height());

        let grid = crate::generate_palette(&src, self.mode)?;
        let saved = self.codec.save(&grid)?;
        *self.palette.write() = grid;
        Ok((saved, grid))
    }
}

impl DropTarget for PaletteStation {
    fn is_interested(&self, files: &[PathBuf]) -> std::result::Result<(), DropRejection> {
        validate_drop(files).map(|_| ())
    }

    fn files_dropped(&self, files: &[PathBuf]) -> DropOutcome {
        let path = match validate_drop(files) {
            Ok(path) => path,
            Err(reason) => {
                debug!("drop rejected: {reason}");
                return DropOutcome::Rejected(reason);
            }
        };

        match self.process(path) {
            Ok((path, palette)) => {
                info!("palette ready: {}", palette.to_hex().join(","));
                DropOutcome::Saved { path, palette }
            }
            Err(PaletteError::Busy) => {
                warn!("drop of {} ignored: another palette is being built", path.display());
                DropOutcome::Busy
            }
            Err(e) => {
                warn!("drop of {} failed: {e}", path.display());
                DropOutcome::Failed(e)
            }
        }
    }
}

impl DragSource for PaletteStation {
    /// The palette file, once one has been written.
    fn drag_files(&self) -> Vec<PathBuf> {
        let path = self.codec.path();
        if path.is_file() { vec![path] } else { Vec::new() }
    }
}
