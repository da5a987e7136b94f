//! Summary export to PDF.

use crate::config::ExportSettings;
use crate::error::{Result, VidlensError};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::{debug, instrument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;

/// Render `text` as a single-font, word-wrapped A4 document and return the
/// PDF bytes. Nothing is written to disk.
#[instrument(skip_all, fields(text_len = text.len()))]
pub fn summary_to_pdf(text: &str, settings: &ExportSettings) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new("Video Summary", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| VidlensError::Export(e.to_string()))?;

    let lines = wrap_text(text, chars_per_line(settings.font_size));
    let top = PAGE_HEIGHT_MM - MARGIN_MM - settings.line_height_mm;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = top;
    let mut pages = 1;

    for line in &lines {
        if y < MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = top;
            pages += 1;
        }
        if !line.is_empty() {
            current.use_text(line.as_str(), settings.font_size, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= settings.line_height_mm;
    }

    debug!("Rendered {} lines on {} pages", lines.len(), pages);

    doc.save_to_bytes()
        .map_err(|e| VidlensError::Export(e.to_string()))
}

/// Approximate number of characters that fit the printable width.
fn chars_per_line(font_size: f32) -> usize {
    let glyph_mm = font_size.max(1.0) * PT_TO_MM * AVG_GLYPH_WIDTH_EM;
    (((PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / glyph_mm) as usize).max(1)
}

/// Greedy word wrap. Input line breaks are kept; words longer than `width`
/// are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if line_len > 0 && line_len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line_len += word.len();
            line.extend(word);
        }

        lines.push(line);
    }

    lines
}
