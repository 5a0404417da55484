use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::report::{ReportContent, ReportRenderer};
use crate::{DashboardError, DashboardResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;

const TITLE_SIZE: f32 = 20.0;
const SECTION_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;

const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 2.0;

const PT_TO_MM: f32 = 0.3528;

/// Table text is cut to this many characters before layout
const MAX_CELL_CHARS: usize = 50;

/// Header fill, the table accent blue from the dashboard
const HEADER_FILL: (f32, f32, f32) = (66.0 / 255.0, 139.0 / 255.0, 202.0 / 255.0);

/// Column width hints for the results table, in millimetres
const RESULT_COLUMNS: [f32; 4] = [80.0, 40.0, 30.0, 40.0];
const SUMMARY_COLUMNS: [f32; 2] = [60.0, 60.0];

/// PDF encoder: paginated A4 document with a summary table followed by the
/// detailed results table. Each section starts below the measured end of the
/// previous one and tables break onto fresh pages, re-drawing their header
/// row, once the cursor passes the bottom margin.
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn render(&self, content: &ReportContent) -> DashboardResult<Vec<u8>> {
        let mut page = PageWriter::new(&content.title)?;

        page.write_line(&content.title, TITLE_SIZE, false);
        page.space(4.0);

        page.write_line(&format!("Generated: {}", content.generated_at), BODY_SIZE, false);
        page.write_line(
            &format!(
                "Date Range: {} - {}",
                content.date_range.start, content.date_range.end
            ),
            BODY_SIZE,
            false,
        );
        page.write_line(
            &format!("Confidence Threshold: {}", content.confidence_threshold),
            BODY_SIZE,
            false,
        );
        page.space(6.0);

        page.write_line("Summary", SECTION_SIZE, true);
        page.space(2.0);

        let summary_rows = vec![
            vec![
                "Total Analyzed".to_string(),
                content.summary.total_analyzed.to_string(),
            ],
            vec![
                "Average Confidence".to_string(),
                content.summary.average_confidence.clone(),
            ],
            vec![
                "Neutral".to_string(),
                content.summary.distribution.neutral.clone(),
            ],
            vec![
                "Offensive".to_string(),
                content.summary.distribution.offensive.clone(),
            ],
            vec![
                "Hate Speech".to_string(),
                content.summary.distribution.hate.clone(),
            ],
        ];
        page.table(&["Metric", "Value"], &SUMMARY_COLUMNS, &summary_rows);
        page.space(8.0);

        page.write_line("Detailed Results", SECTION_SIZE, true);
        page.space(2.0);

        let result_rows: Vec<Vec<String>> = content
            .results
            .iter()
            .map(|row| {
                vec![
                    truncate_cell(&row.text),
                    row.classification.clone(),
                    row.confidence.clone(),
                    row.timestamp.clone(),
                ]
            })
            .collect();
        page.table(
            &["Text", "Classification", "Confidence", "Timestamp"],
            &RESULT_COLUMNS,
            &result_rows,
        );

        page.finish()
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

/// Cut table text to a fixed prefix, marking the cut with an ellipsis.
/// Presentation-only; the underlying result set is untouched.
fn truncate_cell(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(MAX_CELL_CHARS).collect::<String>())
    }
}

/// Clip a cell string so it cannot overflow its column width.
/// Helvetica averages roughly half an em per glyph at these sizes.
fn clip_to_width(text: &str, width: f32, size: f32) -> String {
    let glyph_width = size * 0.5 * PT_TO_MM;
    let max_chars = ((width - 2.0 * CELL_PADDING) / glyph_width).max(1.0) as usize;

    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Cursor-based page writer; `cursor` grows downward from the page top in
/// millimetres and every section start is derived from it, never from a
/// fixed offset.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
}

impl PageWriter {
    fn new(title: &str) -> DashboardResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DashboardError::ReportError(format!("PDF font error: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DashboardError::ReportError(format!("PDF font error: {}", e)))?;

        let layer = doc.get_page(page).get_layer(layer);
        let writer = Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN_TOP,
        };
        writer.reset_draw_state();
        Ok(writer)
    }

    fn reset_draw_state(&self) {
        self.layer.set_outline_thickness(0.2);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn fits(&self, needed: f32) -> bool {
        self.cursor + needed <= PAGE_HEIGHT - MARGIN_BOTTOM
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN_TOP;
        self.reset_draw_state();
    }

    fn ensure_room(&mut self, needed: f32) {
        if !self.fits(needed) {
            self.break_page();
        }
    }

    fn space(&mut self, mm: f32) {
        self.cursor += mm;
    }

    /// Write one line of text at the cursor and advance past it
    fn write_line(&mut self, text: &str, size: f32, bold: bool) {
        let line_height = size * PT_TO_MM * 1.4;
        self.ensure_room(line_height);
        self.cursor += line_height;

        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            text,
            size,
            Mm(MARGIN_LEFT),
            Mm(PAGE_HEIGHT - self.cursor),
            font,
        );
    }

    /// Grid-style table. Breaking onto a new page repeats the header row.
    fn table(&mut self, headers: &[&str], widths: &[f32], rows: &[Vec<String>]) {
        self.ensure_room(ROW_HEIGHT * 2.0);
        self.header_row(headers, widths);

        for row in rows {
            if !self.fits(ROW_HEIGHT) {
                self.break_page();
                self.header_row(headers, widths);
            }
            self.body_row(row, widths);
        }
    }

    fn header_row(&mut self, headers: &[&str], widths: &[f32]) {
        let top = self.cursor;
        let total_width: f32 = widths.iter().sum();

        // Filled band behind the header cells
        let (r, g, b) = HEADER_FILL;
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(PAGE_HEIGHT - top)), false),
                (
                    Point::new(Mm(MARGIN_LEFT + total_width), Mm(PAGE_HEIGHT - top)),
                    false,
                ),
                (
                    Point::new(
                        Mm(MARGIN_LEFT + total_width),
                        Mm(PAGE_HEIGHT - top - ROW_HEIGHT),
                    ),
                    false,
                ),
                (
                    Point::new(Mm(MARGIN_LEFT), Mm(PAGE_HEIGHT - top - ROW_HEIGHT)),
                    false,
                ),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });

        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
        self.cells(headers.iter().copied(), widths, true);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

        self.grid_row(top, widths);
        self.cursor = top + ROW_HEIGHT;
    }

    fn body_row(&mut self, row: &[String], widths: &[f32]) {
        let top = self.cursor;
        self.cells(row.iter().map(String::as_str), widths, false);
        self.grid_row(top, widths);
        self.cursor = top + ROW_HEIGHT;
    }

    fn cells<'a>(&self, values: impl Iterator<Item = &'a str>, widths: &[f32], bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        let baseline = self.cursor + ROW_HEIGHT - 2.2;

        let mut x = MARGIN_LEFT;
        for (value, width) in values.zip(widths) {
            self.layer.use_text(
                clip_to_width(value, *width, TABLE_SIZE),
                TABLE_SIZE,
                Mm(x + CELL_PADDING),
                Mm(PAGE_HEIGHT - baseline),
                font,
            );
            x += width;
        }
    }

    /// Cell borders for one row spanning `top..top + ROW_HEIGHT`
    fn grid_row(&self, top: f32, widths: &[f32]) {
        let bottom = top + ROW_HEIGHT;
        let total_width: f32 = widths.iter().sum();

        self.stroke(
            MARGIN_LEFT,
            top,
            MARGIN_LEFT + total_width,
            top,
        );
        self.stroke(
            MARGIN_LEFT,
            bottom,
            MARGIN_LEFT + total_width,
            bottom,
        );

        let mut x = MARGIN_LEFT;
        self.stroke(x, top, x, bottom);
        for width in widths {
            x += width;
            self.stroke(x, top, x, bottom);
        }
    }

    /// Straight line between two points given in top-down page coordinates
    fn stroke(&self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x0), Mm(PAGE_HEIGHT - y0)), false),
                (Point::new(Mm(x1), Mm(PAGE_HEIGHT - y1)), false),
            ],
            is_closed: false,
        });
    }

    fn finish(self) -> DashboardResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| DashboardError::ReportError(format!("PDF save error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_cell_text_with_ellipsis() {
        let short = "fits comfortably";
        assert_eq!(truncate_cell(short), short);

        let long = "x".repeat(80);
        let truncated = truncate_cell(&long);
        assert_eq!(truncated.chars().count(), MAX_CELL_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn clips_text_to_column_width() {
        let clipped = clip_to_width(&"y".repeat(200), 30.0, TABLE_SIZE);
        assert!(clipped.chars().count() < 30);

        assert_eq!(clip_to_width("ok", 30.0, TABLE_SIZE), "ok");
    }
}
