//! Cell enumerations for the two level layers and their glyph lookup tables.

use ratatui::style::Color;

/// Two blank columns, shared by empty terrain and by the unrecognized-mask entry.
pub(crate) const BLANK_SYMBOL: &str = "  ";

/// Solid block pair used for walls.
pub(crate) const WALL_SYMBOL: &str = "\u{2588}\u{2588}";

/// Wave pattern used for water.
pub(crate) const WATER_SYMBOL: &str = "~~";

/// Medium-shade block pair used for crumbled walls.
pub(crate) const CRUMBLED_SYMBOL: &str = "\u{2592}\u{2592}";

/// Star glyph padded to two columns, used for the winner mask.
pub(crate) const WINNER_SYMBOL: &str = "\u{2605} ";

/// Visual representation of a single grid cell.
///
/// This structure pairs the fixed-width, two-column symbol of a cell with its optional foreground
/// color. The color is decoration only: the renderer may drop it entirely without affecting the
/// alignment of the output, which is what makes glyph-only comparisons possible in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Glyph {
    /// Two visible characters drawn for the cell.
    pub(crate) symbol: &'static str,
    /// Foreground color, or `None` for no color emphasis.
    pub(crate) color: Option<Color>,
}

impl Glyph {
    /// Glyph of a cell with nothing to show on its layer.
    pub(crate) const BLANK: Self = Self {
        symbol: BLANK_SYMBOL,
        color: None,
    };

    /// Builds a colored glyph.
    const fn colored(symbol: &'static str, color: Color) -> Self {
        Self {
            symbol,
            color: Some(color),
        }
    }
}

/// Base layer cell kinds.
///
/// This enumeration holds the static geometry a level cell can have. Grid files store these as
/// small integers, which are mapped through [`Terrain::from_value`]; every integer outside the
/// known range resolves to [`Terrain::Empty`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Terrain {
    /// Open floor, stored as `0`.
    Empty,
    /// Solid wall, stored as `1`.
    Wall,
    /// Water tile, stored as `2`.
    Water,
    /// Weakened wall that can be smashed, stored as `3`.
    Crumbled,
}

impl Terrain {
    /// Maps a stored cell value onto its terrain kind.
    ///
    /// This function is the value half of the terrain lookup table. The wildcard arm is the single
    /// default entry of the table: any value without a dedicated meaning is treated as open floor.
    pub(crate) const fn from_value(value: i32) -> Self {
        match value {
            1 => Self::Wall,
            2 => Self::Water,
            3 => Self::Crumbled,
            _ => Self::Empty,
        }
    }

    /// Returns the glyph drawn for this terrain kind.
    pub(crate) const fn glyph(self) -> Glyph {
        match self {
            Self::Empty => Glyph::BLANK,
            Self::Wall => Glyph::colored(WALL_SYMBOL, Color::DarkGray),
            Self::Water => Glyph::colored(WATER_SYMBOL, Color::LightBlue),
            Self::Crumbled => Glyph::colored(CRUMBLED_SYMBOL, Color::Yellow),
        }
    }
}

/// Overlay layer cell kinds.
///
/// This enumeration holds the points of interest a mask cell can mark. A stored `0` means there is
/// no overlay at all and is represented by the absence of a [`Mask`], while every other value is
/// present and takes precedence over the terrain below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mask {
    /// Walk-on-water mask, stored as `1`.
    Water,
    /// Dimension-shifting mask, stored as `2`.
    Dimension,
    /// Level goal, stored as `3`.
    Winner,
    /// Ram mask for smashing crumbled walls, stored as `4`.
    Ram,
    /// Golem mask, stored as `5`.
    Golem,
    /// Any other non-zero value.
    ///
    /// This variant represents an overlay that is present but has no dedicated glyph. It still
    /// hides the terrain below it and is drawn blank.
    Unrecognized,
}

impl Mask {
    /// Maps a stored cell value onto its mask kind.
    ///
    /// This function returns `None` for `0` only. Every other value yields a mask, with the
    /// wildcard arm acting as the single default entry of the mask lookup table.
    pub(crate) const fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => None,
            1 => Some(Self::Water),
            2 => Some(Self::Dimension),
            3 => Some(Self::Winner),
            4 => Some(Self::Ram),
            5 => Some(Self::Golem),
            _ => Some(Self::Unrecognized),
        }
    }

    /// Returns the glyph drawn for this mask kind.
    pub(crate) const fn glyph(self) -> Glyph {
        match self {
            Self::Water => Glyph::colored("WA", Color::LightCyan),
            Self::Dimension => Glyph::colored("DM", Color::LightMagenta),
            Self::Winner => Glyph::colored(WINNER_SYMBOL, Color::LightYellow),
            Self::Ram => Glyph::colored("RM", Color::LightRed),
            Self::Golem => Glyph::colored("GM", Color::LightRed),
            Self::Unrecognized => Glyph::BLANK,
        }
    }
}
