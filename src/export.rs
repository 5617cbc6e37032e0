//! Serialization of level sets into the formats accepted by the loader.

use std::fmt::{self, Write as _};

use color_eyre::eyre::{Result, WrapErr as _};

use crate::level::{Grid, Level};

/// Serializes levels as a pretty-printed JSON array of level objects.
///
/// # Errors
///
/// This function only fails if serialization itself fails, which plain integer grids never do.
pub(crate) fn to_json(levels: &[Level]) -> Result<String> {
    serde_json::to_string_pretty(levels).wrap_err("failed to serialize levels as JSON")
}

/// Serializes levels as the `level_layouts` and `level_masks` GDScript declarations.
///
/// This function writes both declarations separated by a blank line. Each level opens with a
/// `# LEVEL n` comment and each grid row sits on its own tab-indented line, which is the layout the
/// game scripts are written in.
///
/// # Errors
///
/// This function returns [`fmt::Error`] if formatting into the output buffer fails.
pub(crate) fn to_gdscript(levels: &[Level]) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let layouts: Vec<&Grid> = levels.iter().map(|level| &level.terrain).collect();
    let masks: Vec<&Grid> = levels.iter().map(|level| &level.mask).collect();

    write_gdscript_array(&mut out, "level_layouts", &layouts)?;
    out.push_str("\n\n");
    write_gdscript_array(&mut out, "level_masks", &masks)?;

    Ok(out)
}

/// Writes a single `var name = [...]` declaration.
fn write_gdscript_array(out: &mut String, name: &str, grids: &[&Grid]) -> fmt::Result {
    writeln!(out, "var {name} = [")?;

    for (index, grid) in grids.iter().enumerate() {
        writeln!(out, "\t\t[ # LEVEL {}", index + 1)?;
        for row in *grid {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(out, "\t[{}],", cells.join(", "))?;
        }
        out.push_str("],\n");
    }

    out.push(']');
    Ok(())
}
