//! This crate renders puzzle level grids to a terminal as colored block art.
//!
//! A level is made of a terrain grid and a same-shaped mask grid. Each cell is drawn as a
//! two-column glyph, taken from the mask when one is present and from the terrain otherwise. The
//! levels come either from the built-in set or from a JSON or GDScript level file.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod cli;
mod export;
mod file_loader;
mod level;
mod logging;
mod render;
mod types;

use std::io::Write;

use color_eyre::eyre::{ensure, Result};
use tracing::{debug, info, warn};

pub use cli::{Args, ColorChoice, ExportFormat};
pub use logging::init as init_logging;

use crate::level::Level;

/// Runs the visualiser with the given arguments, writing to `out`.
///
/// This function loads the level set, then either exports it or renders the selected levels in
/// order. Each rendered level is preceded by a blank line. A level whose terrain and mask grids
/// differ in shape is skipped with a warning, and the remaining levels are still rendered.
///
/// # Errors
///
/// This function may return errors if:
/// - The level file cannot be read or parsed
/// - A selected level number is outside the loaded set
/// - Writing to `out` fails
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let levels = match &args.levels {
        Some(path) => file_loader::load_levels(path)?,
        None => level::default_levels()?,
    };
    debug!(count = levels.len(), "level set ready");

    if let Some(format) = args.export {
        let exported = match format {
            ExportFormat::Json => export::to_json(&levels)?,
            ExportFormat::Gdscript => export::to_gdscript(&levels)?,
        };
        writeln!(out, "{exported}")?;
        out.flush()?;
        return Ok(());
    }

    let selection = select(&levels, &args.select)?;
    let colored = args.use_color();
    let mut skipped = 0_usize;

    for index in selection.iter().copied() {
        let Some(level) = levels.get(index) else {
            continue;
        };

        match render::render_level(index, level) {
            Ok(text) => {
                writeln!(out)?;
                render::write_text(out, &text, colored)?;
            }
            Err(err) => {
                skipped += 1;
                warn!(level = index + 1, name = %level.name, "skipping malformed level: {err}");
            }
        }
    }

    out.flush()?;
    info!(rendered = selection.len() - skipped, skipped, "done");

    Ok(())
}

/// Turns 1-based level numbers into indices, defaulting to every level in order.
fn select(levels: &[Level], numbers: &[usize]) -> Result<Vec<usize>> {
    if numbers.is_empty() {
        return Ok((0..levels.len()).collect());
    }

    numbers
        .iter()
        .map(|&number| {
            ensure!(
                (1..=levels.len()).contains(&number),
                "level {number} does not exist, the set has {} levels",
                levels.len()
            );
            Ok(number - 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use clap::Parser as _;

    use super::*;

    fn run_with(arguments: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(["levelviz"].iter().chain(arguments))?;
        let mut out = Vec::new();
        run(&args, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn headers(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|line| line.starts_with("=== LEVEL"))
            .collect()
    }

    #[test]
    fn test_run_renders_every_level_in_order() {
        let output = run_with(&["--color", "never"]).expect("Run should succeed");

        assert_eq!(
            headers(&output),
            vec![
                "=== LEVEL 1 ===",
                "=== LEVEL 2 ===",
                "=== LEVEL 3 ===",
                "=== LEVEL 4 ==="
            ]
        );
        // Four blocks of a separator, a header and nine rows.
        assert_eq!(output.lines().count(), 4 * 11);
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_run_colored() {
        let output = run_with(&["--color", "always", "-n", "1"]).expect("Run should succeed");
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_run_is_deterministic() {
        let first = run_with(&["--color", "always"]).expect("Run should succeed");
        let second = run_with(&["--color", "always"]).expect("Run should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_selected_levels() {
        let output = run_with(&["--color", "never", "-n", "3", "-n", "1"]).expect("Run should succeed");
        assert_eq!(headers(&output), vec!["=== LEVEL 3 ===", "=== LEVEL 1 ==="]);
    }

    #[test]
    fn test_run_rejects_out_of_range_level() {
        let error = run_with(&["-n", "5"]).expect_err("Level 5 does not exist");
        assert!(error.to_string().contains("level 5 does not exist"));
        assert!(run_with(&["-n", "0"]).is_err());
    }

    #[test]
    fn test_run_skips_malformed_levels() {
        let path = env::temp_dir().join(format!("levelviz-skip-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[
                { "levelLayout": [[1, 1]], "maskLayout": [[0, 0]] },
                { "levelLayout": [[1, 1], [1, 1]], "maskLayout": [[0, 0]] },
                { "levelLayout": [[2]], "maskLayout": [[3]] }
            ]"#,
        )
        .expect("Failed to write level file");

        let path_argument = path.to_str().expect("Temp path should be UTF-8");
        let output = run_with(&["--color", "never", "--levels", path_argument]);
        fs::remove_file(&path).expect("Failed to remove level file");

        let output = output.expect("Malformed levels are skipped, not fatal");
        assert_eq!(headers(&output), vec!["=== LEVEL 1 ===", "=== LEVEL 3 ==="]);
        assert!(output.contains("\u{2605} "));
    }

    #[test]
    fn test_run_export_json() {
        let output = run_with(&["--export", "json"]).expect("Run should succeed");
        let levels = file_loader::parse_json(&output).expect("Exported JSON should parse");
        assert_eq!(levels.len(), 4);
    }

    #[test]
    fn test_run_export_gdscript() {
        let output = run_with(&["--export", "gdscript"]).expect("Run should succeed");
        assert!(output.starts_with("var level_layouts = ["));
        assert_eq!(
            file_loader::parse_gdscript(&output).expect("Exported GDScript should parse"),
            level::default_levels().expect("Built-in levels should parse")
        );
    }

    #[test]
    fn test_run_missing_level_file() {
        assert!(run_with(&["--levels", "/nonexistent/levelviz.json"]).is_err());
    }

    #[test]
    fn test_select() {
        let levels = level::default_levels().expect("Built-in levels should parse");

        assert_eq!(select(&levels, &[]).expect("Empty selection"), vec![0, 1, 2, 3]);
        assert_eq!(select(&levels, &[4, 2]).expect("Valid selection"), vec![3, 1]);
        assert!(select(&levels, &[2, 9]).is_err());
    }
}
