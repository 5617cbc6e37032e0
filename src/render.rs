//! Grid rendering into styled text and its encoding for a terminal.
//!
//! Rendering is split in two steps. [`render_level`] is pure and turns a level into a [`Text`]
//! whose spans carry the glyphs and their colors, while [`write_text`] encodes such a block to any
//! writer, either with ANSI color sequences or as bare glyphs.

use std::io::{self, Write};

use ratatui::{
    crossterm::{
        queue,
        style::{Attribute, Color as TerminalColor, Print, SetAttribute, SetForegroundColor},
    },
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::{
    level::{DimensionError, Level},
    types::{Glyph, Mask, Terrain},
};

/// Resolves the glyph of one cell from its terrain and mask values.
///
/// This function applies the layer precedence rule: a present mask fully decides the cell and the
/// terrain value is not consulted, otherwise the terrain decides.
pub(crate) const fn resolve_cell(terrain: i32, mask: i32) -> Glyph {
    match Mask::from_value(mask) {
        Some(mask) => mask.glyph(),
        None => Terrain::from_value(terrain).glyph(),
    }
}

/// Builds the bold header line announcing a level by its 1-based number.
pub(crate) fn header(index: usize) -> Line<'static> {
    Line::from(Span::styled(
        format!("=== LEVEL {} ===", index + 1),
        Style::new().add_modifier(Modifier::BOLD),
    ))
}

/// Renders a level into a styled text block.
///
/// This function validates the shape of the level and then produces the header line followed by
/// one line per grid row, scanning rows top to bottom and cells left to right. Each cell becomes a
/// single span holding its two-column glyph, colored when the glyph has a color.
///
/// # Errors
///
/// This function returns a [`DimensionError`] if the terrain and mask layers differ in shape.
pub(crate) fn render_level(index: usize, level: &Level) -> Result<Text<'static>, DimensionError> {
    level.validate()?;

    let mut lines = Vec::with_capacity(level.terrain.len() + 1);
    lines.push(header(index));

    for (terrain_row, mask_row) in level.terrain.iter().zip(&level.mask) {
        let spans: Vec<Span<'static>> = terrain_row
            .iter()
            .zip(mask_row)
            .map(|(&terrain, &mask)| glyph_span(resolve_cell(terrain, mask)))
            .collect();
        lines.push(Line::from(spans));
    }

    Ok(Text::from(lines))
}

/// Wraps a glyph into a span, styled only when the glyph carries a color.
fn glyph_span(glyph: Glyph) -> Span<'static> {
    match glyph.color {
        Some(color) => Span::styled(glyph.symbol, Style::new().fg(color)),
        None => Span::raw(glyph.symbol),
    }
}

/// Encodes a text block to a writer, one output line per text line.
///
/// When `colored` is set, every styled span is wrapped in its foreground color and bold
/// attribute followed by an attribute reset. Otherwise only the span contents are written, so each
/// grid line holds exactly two visible characters per cell.
///
/// # Errors
///
/// This function returns any [`io::Error`] raised by the writer.
pub(crate) fn write_text<W: Write>(out: &mut W, text: &Text<'_>, colored: bool) -> io::Result<()> {
    for line in &text.lines {
        for span in &line.spans {
            write_span(out, span, colored)?;
        }
        queue!(out, Print('\n'))?;
    }

    Ok(())
}

/// Encodes a single span, see [`write_text`].
fn write_span<W: Write>(out: &mut W, span: &Span<'_>, colored: bool) -> io::Result<()> {
    let content: &str = &span.content;

    if !colored || span.style == Style::default() {
        return queue!(out, Print(content));
    }

    if let Some(color) = span.style.fg {
        queue!(out, SetForegroundColor(terminal_color(color)))?;
    }
    if span.style.add_modifier.contains(Modifier::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }

    queue!(out, Print(content), SetAttribute(Attribute::Reset))
}

/// Converts a ratatui color into the crossterm color emitting the same ANSI code.
const fn terminal_color(color: Color) -> TerminalColor {
    match color {
        Color::Reset => TerminalColor::Reset,
        Color::Black => TerminalColor::Black,
        Color::Red => TerminalColor::DarkRed,
        Color::Green => TerminalColor::DarkGreen,
        Color::Yellow => TerminalColor::DarkYellow,
        Color::Blue => TerminalColor::DarkBlue,
        Color::Magenta => TerminalColor::DarkMagenta,
        Color::Cyan => TerminalColor::DarkCyan,
        Color::Gray => TerminalColor::Grey,
        Color::DarkGray => TerminalColor::DarkGrey,
        Color::LightRed => TerminalColor::Red,
        Color::LightGreen => TerminalColor::Green,
        Color::LightYellow => TerminalColor::Yellow,
        Color::LightBlue => TerminalColor::Blue,
        Color::LightMagenta => TerminalColor::Magenta,
        Color::LightCyan => TerminalColor::Cyan,
        Color::White => TerminalColor::White,
        Color::Indexed(index) => TerminalColor::AnsiValue(index),
        Color::Rgb(red, green, blue) => TerminalColor::Rgb {
            r: red,
            g: green,
            b: blue,
        },
    }
}
