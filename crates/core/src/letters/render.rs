//! PDF output for a [`LetterDocument`].
#![allow(clippy::float_arithmetic, clippy::cast_precision_loss)]

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use super::document::LetterDocument;
use super::error::DocumentError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 25.0;
const MARGIN_RIGHT: f32 = 20.0;
const LABEL_WIDTH: f32 = 50.0;
const LINE_HEIGHT: f32 = 6.0;
const TOP: f32 = 20.0;
const BOTTOM: f32 = 25.0;

/// Rough advance of an average Times glyph, in em.
const GLYPH_EM: f32 = 0.47;
const PT_TO_MM: f32 = 0.3528;

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_EM * PT_TO_MM
}


struct Pen<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Pen<'_> {
    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn centred(&self, text: &str, size: f32, bold: bool) -> f32 {
        let width = text_width(text, size);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN_LEFT);
        self.text(text, size, x, bold);
        width
    }

    fn rule(&self, from: f32, to: f32, y: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from), Mm(y)), false),
                (Point::new(Mm(to), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.pdf.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages),
        );
        self.layer = self.pdf.get_page(page).get_layer(layer);
        self.layer.set_outline_thickness(0.5);
        self.y = PAGE_HEIGHT - TOP;
    }

    /// Moves down; continues on a fresh page once the bottom margin is hit.
    fn down(&mut self, lines: f32) {
        self.y -= LINE_HEIGHT * lines;
        if self.y < BOTTOM {
            self.new_page();
        }
    }

    /// Starts a fresh page unless `lines` more fit on this one.
    fn keep(&mut self, lines: f32) {
        if self.y - LINE_HEIGHT * lines < BOTTOM {
            self.new_page();
        }
    }
}

/// Lays the letter out on as many A4 pages as it needs.
fn draw(doc: &LetterDocument) -> Result<(PdfDocumentReference, usize), DocumentError> {
    let (pdf, page, layer) = PdfDocument::new(&doc.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = pdf.get_page(page).get_layer(layer);

    let regular = pdf
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| DocumentError::Render(e.to_string()))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::TimesBold)
        .map_err(|e| DocumentError::Render(e.to_string()))?;

    let mut pen = Pen {
        pdf: &pdf,
        layer,
        regular,
        bold,
        y: PAGE_HEIGHT - TOP,
        pages: 1,
    };

    // Letterhead
    for line in &doc.letterhead {
        pen.centred(line, 14.0, true);
        pen.down(1.1);
    }
    if !doc.address.is_empty() {
        pen.centred(&doc.address, 10.0, false);
        pen.down(0.6);
    }
    pen.layer.set_outline_thickness(1.5);
    pen.rule(MARGIN_LEFT, PAGE_WIDTH - MARGIN_RIGHT, pen.y);
    pen.layer.set_outline_thickness(0.5);
    pen.down(2.0);

    // Title
    let width = pen.centred(&doc.title, 13.0, true);
    let start = ((PAGE_WIDTH - width) / 2.0).max(MARGIN_LEFT);
    pen.rule(start, start + width, pen.y - 1.2);
    pen.down(1.0);
    pen.centred(&doc.number_line, 11.0, false);
    pen.down(2.0);

    for line in &doc.opening {
        pen.text(line, 11.0, MARGIN_LEFT, false);
        pen.down(1.0);
    }
    pen.down(0.5);

    let value_x = MARGIN_LEFT + 8.0 + LABEL_WIDTH;
    for row in &doc.rows {
        pen.text(&row.label, 11.0, MARGIN_LEFT + 8.0, false);
        pen.text(":", 11.0, value_x - 3.0, false);
        for line in &row.lines {
            pen.text(line, 11.0, value_x, false);
            pen.down(1.0);
        }
    }
    pen.down(0.5);

    for line in &doc.closing {
        pen.text(line, 11.0, MARGIN_LEFT, false);
        pen.down(1.0);
    }
    pen.down(2.0);

    // Signature block stays on one page.
    pen.keep(5.5);
    let sign_x = PAGE_WIDTH - MARGIN_RIGHT - 70.0;
    pen.text(&doc.place_date, 11.0, sign_x, false);
    pen.down(1.0);
    pen.text(&doc.signer_title, 11.0, sign_x, false);
    pen.down(4.5);
    pen.text(&doc.signer_name, 11.0, sign_x, true);
    let name_width = text_width(&doc.signer_name, 11.0);
    pen.rule(sign_x, sign_x + name_width, pen.y - 1.2);

    let pages = pen.pages;
    Ok((pdf, pages))
}

/// Draws the letter and returns the PDF bytes.
pub fn render_pdf(doc: &LetterDocument) -> Result<Vec<u8>, DocumentError> {
    let (pdf, _) = draw(doc)?;
    let mut writer = BufWriter::new(Vec::<u8>::new());
    pdf.save(&mut writer)
        .map_err(|e| DocumentError::Render(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| DocumentError::Render(e.to_string()))
}
