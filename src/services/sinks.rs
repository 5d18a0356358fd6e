//! Completion sinks: stdout, append-only Markdown, and generated PDF.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::domain::{AppError, Completion};
use crate::ports::{CompletionSink, Destination, SinkOutcome};

/// Deliver a completion to every destination, independently.
///
/// A failing destination never prevents the remaining ones from being
/// attempted; the caller receives one outcome per destination, in order.
pub fn emit_all(completion: &Completion, destinations: &[Destination]) -> Vec<SinkOutcome> {
    destinations
        .iter()
        .map(|destination| {
            let result = match destination {
                Destination::Stdout => StdoutSink.emit(completion),
                Destination::MarkdownFile(path) => MarkdownFileSink::new(path).emit(completion),
                Destination::PdfFile(path) => PdfFileSink::new(path).emit(completion),
            };
            SinkOutcome { destination: destination.clone(), result }
        })
        .collect()
}

/// Writes the completion text plus exactly one trailing newline.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl CompletionSink for StdoutSink {
    fn emit(&self, completion: &Completion) -> Result<(), AppError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(completion.text().as_bytes())?;
        handle.write_all(b"\n")?;
        handle.flush()?;
        Ok(())
    }
}

/// Appends the completion text to a Markdown file.
#[derive(Debug, Clone)]
pub struct MarkdownFileSink {
    path: PathBuf,
}

impl MarkdownFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CompletionSink for MarkdownFileSink {
    fn emit(&self, completion: &Completion) -> Result<(), AppError> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(completion.text().as_bytes())?;
        Ok(())
    }
}

// Page geometry follows the original output format: A4 with 15mm bottom
// margin, 12pt body font, automatic page breaks.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const SIDE_MARGIN_MM: f32 = 10.0;
const TOP_MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
const CELL_HEIGHT_MM: f32 = 10.0;

const PT_TO_MM: f32 = 0.352_778;
// Average Helvetica glyph width, as a fraction of the font size.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;

/// Renders the completion as a paginated PDF document.
#[derive(Debug, Clone)]
pub struct PdfFileSink {
    path: PathBuf,
}

impl PdfFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CompletionSink for PdfFileSink {
    fn emit(&self, completion: &Completion) -> Result<(), AppError> {
        let cells = layout_cells(completion)?;
        write_document(&self.path, &cells)
    }
}

/// Split the completion into the wrapped text cells the document will hold.
///
/// Each input line becomes one or more cells, wrapped to the printable page
/// width. A line with a character the built-in font cannot encode fails the
/// whole layout.
pub fn layout_cells(completion: &Completion) -> Result<Vec<String>, AppError> {
    let max_chars = printable_chars_per_cell();
    let mut cells = Vec::new();

    for line in completion.lines() {
        if let Some(bad) = line.chars().find(|c| !is_encodable(*c)) {
            return Err(AppError::Render(format!(
                "unsupported character '{}' (U+{:04X})",
                bad, bad as u32
            )));
        }
        cells.extend(wrap_line(line, max_chars));
    }

    Ok(cells)
}

fn printable_chars_per_cell() -> usize {
    let printable_width = PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM;
    let glyph_width = FONT_SIZE_PT * PT_TO_MM * AVG_GLYPH_WIDTH_EM;
    (printable_width / glyph_width) as usize
}

// Built-in PDF fonts cover WinAnsi only.
fn is_encodable(c: char) -> bool {
    (c as u32) <= 0xFF && (!c.is_control() || c == '\t')
}

/// Wrap one line into cells of at most `max_chars`, breaking on spaces
/// where possible.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut cells = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if !current.is_empty() && current_len + 1 + word_len > max_chars {
            cells.push(std::mem::take(&mut current));
        }

        if word_len > max_chars {
            // A single over-long token is cut at the cell boundary.
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                cells.push(piece.iter().collect());
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        cells.push(current);
    }

    cells
}

fn write_document(path: &Path, cells: &[String]) -> Result<(), AppError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("promptline output", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let font: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(format!("failed to load built-in font: {e}")))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor_mm = TOP_MARGIN_MM;

    for cell in cells {
        if cursor_mm + CELL_HEIGHT_MM > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            cursor_mm = TOP_MARGIN_MM;
        }

        let baseline_mm = PAGE_HEIGHT_MM - cursor_mm - CELL_HEIGHT_MM * 0.75;
        layer.use_text(cell.clone(), FONT_SIZE_PT, Mm(SIDE_MARGIN_MM), Mm(baseline_mm), &font);
        cursor_mm += CELL_HEIGHT_MM;
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| AppError::Render(format!("failed to save document: {e}")))?;
    Ok(())
}
