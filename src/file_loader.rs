//! File loading and parsing utilities for level set files.

use std::{fs, path::Path};

use color_eyre::eyre::{bail, OptionExt as _, Result, WrapErr as _};
use tracing::debug;

use crate::level::{Grid, Level};

/// Declaration that opens the mask half of a GDScript level file.
const MASKS_DECLARATION: &str = "var level_masks";

/// Reads a level set from a JSON or GDScript file.
///
/// This function picks the parser from the file extension, `.json` or `.gd`. Files with any other
/// extension are sniffed instead: text containing a `level_masks` declaration is treated as
/// GDScript and everything else as JSON.
///
/// # Errors
///
/// This function may return errors if:
/// - The file cannot be read
/// - The contents do not parse in the selected format
pub(crate) fn load_levels(path: &Path) -> Result<Vec<Level>> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read level file {}", path.display()))?;

    let extension = path.extension().and_then(|extension| extension.to_str());
    let levels = match extension {
        Some("json") => parse_json(&contents),
        Some("gd") => parse_gdscript(&contents),
        _ if contents.contains(MASKS_DECLARATION) => parse_gdscript(&contents),
        _ => parse_json(&contents),
    }
    .wrap_err_with(|| format!("failed to parse level file {}", path.display()))?;

    debug!(path = %path.display(), count = levels.len(), "loaded level file");
    Ok(levels)
}

/// Parses a JSON array of level objects.
///
/// # Errors
///
/// This function returns an error if the input is not a JSON array of objects carrying
/// `levelLayout` and `maskLayout` integer grids.
pub(crate) fn parse_json(input: &str) -> Result<Vec<Level>> {
    serde_json::from_str(input).wrap_err("invalid level JSON")
}

/// Parses a GDScript source holding `level_layouts` and `level_masks` arrays.
///
/// This function splits the source at the mask declaration, then turns each half into JSON by
/// dropping `#` comments, cutting everything outside the outermost brackets and removing trailing
/// commas. The resulting levels are named after their 1-based position.
///
/// # Errors
///
/// This function may return errors if:
/// - The source has no `level_masks` declaration
/// - Either half has no bracketed array or is not a list of integer grids
/// - The two halves hold a different number of levels
pub(crate) fn parse_gdscript(input: &str) -> Result<Vec<Level>> {
    let (layouts_source, masks_source) = input
        .split_once(MASKS_DECLARATION)
        .ok_or_eyre("could not find a `level_masks` declaration")?;

    let layouts = parse_gdscript_array(layouts_source).wrap_err("invalid `level_layouts` array")?;
    let masks = parse_gdscript_array(masks_source).wrap_err("invalid `level_masks` array")?;

    if layouts.len() != masks.len() {
        bail!(
            "mismatch: {} level layouts but {} mask layouts",
            layouts.len(),
            masks.len()
        );
    }

    Ok(layouts
        .into_iter()
        .zip(masks)
        .enumerate()
        .map(|(index, (terrain, mask))| {
            Level::new(format!("Level {}", index + 1), terrain, mask)
        })
        .collect())
}

/// Converts one GDScript array literal into a list of grids.
fn parse_gdscript_array(source: &str) -> Result<Vec<Grid>> {
    let uncommented = strip_comments(source);

    let start = uncommented
        .find('[')
        .ok_or_eyre("no opening bracket found")?;
    let end = uncommented
        .rfind(']')
        .ok_or_eyre("no closing bracket found")?;
    let array = uncommented
        .get(start..=end)
        .ok_or_eyre("closing bracket precedes opening bracket")?;

    serde_json::from_str(&strip_trailing_commas(array)).wrap_err("array is not a list of grids")
}

/// Drops everything from a `#` to the end of its line.
fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes every comma whose next non-whitespace character closes an array.
fn strip_trailing_commas(source: &str) -> String {
    let mut cleaned = String::with_capacity(source.len());

    for (offset, character) in source.char_indices() {
        let closes_array = source
            .get(offset + 1..)
            .is_some_and(|rest| rest.trim_start().starts_with(']'));

        if character == ',' && closes_array {
            continue;
        }

        cleaned.push(character);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    /// Small two-level GDScript source with comments and trailing commas.
    const SOURCE: &str = "\
var level_layouts = [
\t\t[ # LEVEL 1
\t[1, 1, 1],
\t[1, 0, 2], # water on the right
],
\t\t[ # LEVEL 2
\t[3, 3],
],
]

var level_masks = [
\t\t[ # LEVEL 1
\t[0, 0, 0],
\t[0, 3, 0],
],
\t\t[ # LEVEL 2
\t[0, 0],
],
]";

    #[test]
    fn test_parse_gdscript_levels() {
        let levels = parse_gdscript(SOURCE).expect("Failed to parse GDScript");

        assert_eq!(levels.len(), 2);
        let first = levels.first().expect("First level should exist");
        assert_eq!(first.name, "Level 1");
        assert_eq!(first.terrain, vec![vec![1, 1, 1], vec![1, 0, 2]]);
        assert_eq!(first.mask, vec![vec![0, 0, 0], vec![0, 3, 0]]);
        let second = levels.get(1).expect("Second level should exist");
        assert_eq!(second.name, "Level 2");
        assert_eq!(second.terrain, vec![vec![3, 3]]);
        assert_eq!(second.id, None);
    }

    #[test]
    fn test_parse_gdscript_missing_masks() {
        let result = parse_gdscript("var level_layouts = [[[1]]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_gdscript_count_mismatch() {
        let source = "var level_layouts = [[[1]], [[2]]]\nvar level_masks = [[[0]]]";

        let error = parse_gdscript(source).expect_err("Counts differ");
        assert!(error.to_string().contains("2 level layouts but 1 mask layouts"));
    }

    #[test]
    fn test_parse_gdscript_no_brackets() {
        let result = parse_gdscript("var level_layouts = 3\nvar level_masks = 4");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_gdscript_rejects_non_integer_cells() {
        let source = "var level_layouts = [[[\"wall\"]]]\nvar level_masks = [[[0]]]";
        assert!(parse_gdscript(source).is_err());
    }

    #[test]
    fn test_parse_json_levels() {
        let input = r#"[
            { "id": "a1", "name": "Intro", "levelLayout": [[1, 0]], "maskLayout": [[0, 3]] },
            { "levelLayout": [[2]], "maskLayout": [[0]] }
        ]"#;

        let levels = parse_json(input).expect("Failed to parse JSON");

        assert_eq!(levels.len(), 2);
        let first = levels.first().expect("First level should exist");
        assert_eq!(first.id.as_deref(), Some("a1"));
        assert_eq!(first.name, "Intro");
        assert_eq!(first.mask, vec![vec![0, 3]]);
        let second = levels.get(1).expect("Second level should exist");
        assert_eq!(second.id, None);
        assert!(second.name.is_empty());
    }

    #[test]
    fn test_parse_json_missing_layout() {
        assert!(parse_json(r#"[{ "name": "broken", "levelLayout": [[1]] }]"#).is_err());
    }

    #[test]
    fn test_strip_trailing_commas() {
        assert_eq!(strip_trailing_commas("[1, 2, ]"), "[1, 2 ]");
        assert_eq!(strip_trailing_commas("[[1],\n]"), "[[1]\n]");
        assert_eq!(strip_trailing_commas("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("[1, # one\n2] # two"), "[1, \n2] ");
    }

    #[test]
    fn test_load_levels_by_extension_and_sniffing() {
        let dir = env::temp_dir().join(format!("levelviz-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");

        let gd_path = dir.join("levels.gd");
        let txt_path = dir.join("levels.txt");
        let json_path = dir.join("levels.json");
        fs::write(&gd_path, SOURCE).expect("Failed to write GDScript file");
        fs::write(&txt_path, SOURCE).expect("Failed to write text file");
        fs::write(&json_path, r#"[{ "levelLayout": [[1]], "maskLayout": [[0]] }]"#)
            .expect("Failed to write JSON file");

        assert_eq!(load_levels(&gd_path).expect("GDScript should load").len(), 2);
        assert_eq!(load_levels(&txt_path).expect("Sniffed file should load").len(), 2);
        assert_eq!(load_levels(&json_path).expect("JSON should load").len(), 1);

        fs::remove_dir_all(&dir).expect("Failed to remove temp dir");
    }

    #[test]
    fn test_load_levels_missing_file() {
        let error = load_levels(Path::new("/nonexistent/levelviz/levels.gd"))
            .expect_err("Missing file should fail");
        assert!(error.to_string().contains("failed to read level file"));
    }
}
