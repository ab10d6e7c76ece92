//! Plain-text PDF rendering of a combined document.
//!
//! The markdown is laid out verbatim in the built-in Courier face on A4 pages,
//! wrapped to the configured line width. Courier is monospaced, so the number of
//! columns that fit on a line follows directly from the font size.
//!
//! Built-in PDF fonts only cover the WinAnsi character set (ASCII, Latin-1 and a
//! few typographic marks). Anything else is written as `?`.

use crate::error::{DigestError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use unicode_width::UnicodeWidthChar;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const PT_TO_MM: f32 = 0.3528;
/// Advance width of a Courier glyph, as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;
const LINE_SPACING: f32 = 1.2;
const LAYER_NAME: &str = "Layer 1";
const UNSUPPORTED: char = '?';
/// WinAnsi characters outside Latin-1.
const WINANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Number of monospaced columns that fit in `line_width_mm` at `font_size` points.
pub fn columns_for(font_size: f32, line_width_mm: f32) -> usize {
    let glyph_mm = font_size * COURIER_ADVANCE * PT_TO_MM;
    ((line_width_mm / glyph_mm).floor() as usize).max(1)
}

/// Wraps text so no line is wider than `max_cols` display columns.
///
/// Existing line breaks are kept (blank lines included). Lines are broken at
/// spaces where possible; a word longer than the line is split.
pub fn wrap_lines(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut out = Vec::new();

    for source in text.split('\n') {
        if source.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut width = 0;
        for word in source.split(' ') {
            let word_width = str_width(word);
            let sep = usize::from(!line.is_empty());

            if width + sep + word_width <= max_cols {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                width += sep + word_width;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                width = 0;
            }

            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if width + w > max_cols && !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                    width = 0;
                }
                line.push(c);
                width += w;
            }
        }
        out.push(line);
    }

    out
}

/// Replaces characters the built-in Courier face cannot show. Tabs become a space.
pub fn to_winansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' => c,
            '\t' => ' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            _ if WINANSI_EXTRAS.contains(c) => c,
            _ => UNSUPPORTED,
        })
        .collect()
}

fn str_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Renders `text` into PDF bytes, paginating as needed.
pub fn render_pdf(title: &str, text: &str, font_size: f32, line_width_mm: f32) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| DigestError::Export(e.to_string()))?;

    let line_height = font_size * PT_TO_MM * LINE_SPACING;
    let top = PAGE_HEIGHT_MM - MARGIN_MM - font_size * PT_TO_MM;
    let lines = wrap_lines(&to_winansi(text), columns_for(font_size, line_width_mm));

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = top;
    for line in lines {
        if y < MARGIN_MM {
            let (page, layer_idx) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            layer = doc.get_page(page).get_layer(layer_idx);
            y = top;
        }
        if !line.is_empty() {
            layer.use_text(line, font_size, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= line_height;
    }

    doc.save_to_bytes()
        .map_err(|e| DigestError::Export(e.to_string()))
}
