use crate::aggregator::SentimentCounts;
use crate::types::{ClippingError, ContentId, ReportLayout, Result};
use crate::utils::text::single_line;
use serde::Serialize;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextStyle {
    Title,
    Subtitle,
    Heading,
    Body,
    BodyBold,
}

impl TextStyle {
    /// Point size the style is typeset at.
    pub fn font_size(&self) -> f32 {
        match self {
            TextStyle::Title => 24.0,
            TextStyle::Subtitle => 10.0,
            TextStyle::Heading => 16.0,
            TextStyle::Body | TextStyle::BodyBold => 10.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, TextStyle::Title | TextStyle::Heading | TextStyle::BodyBold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
}

/// One positioned line of text. Coordinates are millimetres from the top-left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    /// Width of the text column the line belongs to.
    pub max_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<Line>,
}

/// A compiled, paginated report ready to hand to a [`DocumentWriter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub id: Uuid,
    /// Suggested file stem, `Report_<start>_<end>`.
    pub name: String,
    pub totals: SentimentCounts,
    pub article_ids: Vec<ContentId>,
    pub post_ids: Vec<ContentId>,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn suggested_name(&self) -> &str {
        &self.name
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every line's text, in reading order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.text.as_str()))
    }
}

/// Emits a compiled report as a file.
pub trait DocumentWriter {
    fn extension(&self) -> &'static str;

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>>;

    /// Write into `dir` under the document's suggested name.
    fn write_to(&self, document: &ReportDocument, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.{}", document.suggested_name(), self.extension()));
        fs::write(&path, self.render(document)?)?;
        info!(
            "Wrote report {} ({} pages) to {}",
            document.id,
            document.page_count(),
            path.display()
        );
        Ok(path)
    }
}

/// Plain text rendering; pages are separated by form feeds.
pub struct TextDocumentWriter;

impl DocumentWriter for TextDocumentWriter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        let pages: Vec<String> = document
            .pages
            .iter()
            .map(|page| {
                let mut out = String::new();
                for line in &page.lines {
                    let text = single_line(&line.text);
                    match line.style {
                        TextStyle::Title | TextStyle::Heading => {
                            out.push_str(&text.to_uppercase());
                        }
                        _ => out.push_str(&text),
                    }
                    out.push('\n');
                }
                out.push_str(&format!("-- {} / {} --\n", page.number, document.page_count()));
                out
            })
            .collect();

        Ok(pages.join("\u{000C}").into_bytes())
    }
}

/// Serializes the page model as pretty JSON.
pub struct JsonDocumentWriter;

impl DocumentWriter for JsonDocumentWriter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

const PT_TO_MM: f32 = 0.3528;
/// Average glyph advance of Helvetica as a fraction of the point size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// Typesets the page model onto A4 PDF pages with the built-in Helvetica
/// faces. One PDF page per [`Page`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentWriter {
    pub layout: ReportLayout,
}

impl PdfDocumentWriter {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    fn place(&self, layer: &PdfLayerReference, line: &Line, regular: &IndirectFontRef, bold: &IndirectFontRef) {
        let text = single_line(&line.text);
        let size = line.style.font_size();
        let x = match line.align {
            Align::Left => line.x,
            Align::Center => {
                let width = text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH * PT_TO_MM;
                (line.x - width / 2.0).max(0.0)
            }
        };
        // PDF space grows upwards from the bottom-left corner
        let y = self.layout.page_height - line.y;
        let font = if line.style.is_bold() { bold } else { regular };
        layer.use_text(text, size, Mm(x), Mm(y), font);
    }
}

fn pdf_error(e: printpdf::Error) -> ClippingError {
    ClippingError::Pdf(e.to_string())
}

impl DocumentWriter for PdfDocumentWriter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        let width = Mm(self.layout.page_width);
        let height = Mm(self.layout.page_height);
        let (pdf, first_page, first_layer) = PdfDocument::new(document.suggested_name(), width, height, "Página 1");
        let regular = pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

        for (index, page) in document.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                pdf.add_page(width, height, format!("Página {}", page.number))
            };
            let layer = pdf.get_page(page_index).get_layer(layer_index);
            for line in &page.lines {
                self.place(&layer, line, &regular, &bold);
            }
        }

        pdf.save_to_bytes().map_err(pdf_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ReportDocument {
        let line = |y: f32, text: &str, style| Line {
            x: 10.0,
            y,
            text: text.to_string(),
            style,
            align: Align::Left,
            max_width: 190.0,
        };
        ReportDocument {
            id: Uuid::new_v4(),
            name: "Report_2024-01-01_2024-01-31".to_string(),
            totals: SentimentCounts::default(),
            article_ids: vec![],
            post_ids: vec![],
            pages: vec![
                Page {
                    number: 1,
                    lines: vec![line(10.0, "Relatório", TextStyle::Title)],
                },
                Page {
                    number: 2,
                    lines: vec![line(10.0, "linha\ncom quebra", TextStyle::Body)],
                },
            ],
        }
    }

    #[test]
    fn text_writer_separates_pages() {
        let rendered = String::from_utf8(TextDocumentWriter.render(&document()).unwrap()).unwrap();
        let pages: Vec<&str> = rendered.split('\u{000C}').collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with("RELATÓRIO\n"));
        assert!(pages[1].contains("linha com quebra"));
        assert!(pages[1].contains("-- 2 / 2 --"));
    }

    #[test]
    fn writers_use_the_suggested_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = JsonDocumentWriter.write_to(&document(), dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Report_2024-01-01_2024-01-31.json"
        );
        let value: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn pdf_writer_emits_one_page_per_report_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = PdfDocumentWriter::default().write_to(&document(), dir.path()).unwrap();
        assert!(path.ends_with("Report_2024-01-01_2024-01-31.pdf"));

        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let parsed = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn styles_map_to_typeset_faces() {
        assert!(TextStyle::Title.is_bold());
        assert!(!TextStyle::Body.is_bold());
        assert!(TextStyle::Title.font_size() > TextStyle::Heading.font_size());
        assert_eq!(TextStyle::Body.font_size(), TextStyle::BodyBold.font_size());
    }
}
