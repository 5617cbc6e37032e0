//! Command-line arguments of the level visualiser.

use std::{
    env,
    io::{self, IsTerminal as _},
    path::PathBuf,
};

use clap::{ArgAction, Parser, ValueEnum};

/// Renders puzzle level terrain and mask grids as colored block art.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Level set to load (`.json` or `.gd`) instead of the built-in levels.
    #[arg(short, long, value_name = "PATH")]
    pub levels: Option<PathBuf>,

    /// When to color the output.
    #[arg(short, long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Render only this 1-based level; may be repeated.
    #[arg(short = 'n', long = "level", value_name = "N")]
    pub select: Vec<usize>,

    /// Write the loaded level set in this format instead of rendering it.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub export: Option<ExportFormat>,

    /// Raise log verbosity on stderr; may be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Color policy for the rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is not set.
    Auto,
    /// Always emit ANSI color sequences.
    Always,
    /// Never emit ANSI color sequences.
    Never,
}

/// Output formats for exporting a level set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of level objects.
    Json,
    /// `level_layouts` and `level_masks` GDScript declarations.
    Gdscript,
}

impl ColorChoice {
    /// Decides whether to color, given whether the destination is a terminal.
    ///
    /// This function follows the `NO_COLOR` convention in automatic mode: any non-empty value of
    /// the variable turns color off.
    pub(crate) fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
                is_terminal && !no_color
            }
        }
    }
}

impl Args {
    /// Resolves the color policy against the process standard output.
    pub(crate) fn use_color(&self) -> bool {
        self.color.enabled(io::stdout().is_terminal())
    }
}
