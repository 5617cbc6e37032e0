//! Level data and management module.
//!
//! This module contains the `Level` struct and related functionality for handling level grids,
//! including the dimension check and the built-in level set.

use color_eyre::eyre::{Result, WrapErr as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file_loader;

/// Row-major grid of raw cell values.
pub(crate) type Grid = Vec<Vec<i32>>;

/// Built-in level set, stored in the same GDScript layout accepted from files.
static DEFAULT_LEVELS: &str = include_str!("../assets/default_levels.gd");

/// A single puzzle level.
///
/// This structure holds the two same-shaped layers of a level. Its serialized form matches the
/// JSON export of the level editor, so level sets can be exchanged in both directions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Level {
    /// Opaque identifier assigned by the level editor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,
    /// Human-readable level name.
    ///
    /// This field is empty when the source file did not carry a name.
    #[serde(default)]
    pub(crate) name: String,
    /// Base layer holding the static geometry of the level.
    #[serde(rename = "levelLayout")]
    pub(crate) terrain: Grid,
    /// Overlay layer marking points of interest on top of the terrain.
    #[serde(rename = "maskLayout")]
    pub(crate) mask: Grid,
}

/// Ways in which the two layers of a level can disagree in shape.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub(crate) enum DimensionError {
    /// The layers have a different number of rows.
    #[error("terrain has {terrain} rows but mask has {mask}")]
    RowCount {
        /// Row count of the terrain layer.
        terrain: usize,
        /// Row count of the mask layer.
        mask: usize,
    },
    /// One row has a different width in each layer.
    #[error("row {row}: terrain has {terrain} columns but mask has {mask}")]
    RowWidth {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the terrain row.
        terrain: usize,
        /// Width of the mask row.
        mask: usize,
    },
    /// The terrain layer is not rectangular.
    #[error("row {row}: terrain has {found} columns but row 0 has {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first terrain row.
        expected: usize,
        /// Width of the offending terrain row.
        found: usize,
    },
}

impl Level {
    /// Builds a level without an editor identifier.
    pub(crate) const fn new(name: String, terrain: Grid, mask: Grid) -> Self {
        Self {
            id: None,
            name,
            terrain,
            mask,
        }
    }

    /// Returns the number of columns of the level, taken from its first terrain row.
    pub(crate) fn columns(&self) -> usize {
        self.terrain.first().map_or(0, Vec::len)
    }

    /// Checks that both layers form rectangles of the same shape.
    ///
    /// This function compares the row counts of both layers first, then walks the rows in order
    /// and reports the first row that is either narrower or wider than the first terrain row, or
    /// whose mask row differs in width from its terrain row.
    ///
    /// # Errors
    ///
    /// This function returns the first [`DimensionError`] found, scanning top to bottom.
    pub(crate) fn validate(&self) -> Result<(), DimensionError> {
        if self.terrain.len() != self.mask.len() {
            return Err(DimensionError::RowCount {
                terrain: self.terrain.len(),
                mask: self.mask.len(),
            });
        }

        let expected = self.columns();
        for (row, (terrain_row, mask_row)) in self.terrain.iter().zip(&self.mask).enumerate() {
            if terrain_row.len() != expected {
                return Err(DimensionError::Ragged {
                    row,
                    expected,
                    found: terrain_row.len(),
                });
            }
            if mask_row.len() != terrain_row.len() {
                return Err(DimensionError::RowWidth {
                    row,
                    terrain: terrain_row.len(),
                    mask: mask_row.len(),
                });
            }
        }

        Ok(())
    }
}

/// Returns the built-in level set.
///
/// # Errors
///
/// This function only fails if the bundled level source is broken.
pub(crate) fn default_levels() -> Result<Vec<Level>> {
    file_loader::parse_gdscript(DEFAULT_LEVELS).wrap_err("failed to parse the built-in level set")
}
