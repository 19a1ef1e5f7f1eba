//! Receipt tables painted onto buffered pages.
//!
//! Rendering runs in two passes. The content pass lays out the document
//! header, the table and the summary line, breaking pages as rows run out of
//! room. Once the page count is known the footer pass revisits every page and
//! stamps `Page i of P`.

use crate::error::{PdfError, Result};
use crate::layout::{stripe_fill, CellPadding, PageGeometry, Rgb, RowPlacement, TableLayout};
use crate::metrics::{Face, FontSpec, HELVETICA_ASCENT};
use crate::page::{BufferedPage, DrawnRow, LogoImage, PageBuffer};
use chrono::NaiveDate;
use kwitansi_core::ReceiptRecord;
use kwitansi_formatting::{
    generated_label, period_label, receipt_cells, today, RECEIPT_COLUMN_COUNT, RECEIPT_HEADERS,
};
use std::path::PathBuf;

/// Relative column widths, scaled to the printable width.
pub const COLUMN_WEIGHTS: [f32; RECEIPT_COLUMN_COUNT] =
    [25.0, 70.0, 70.0, 120.0, 60.0, 80.0, 80.0, 90.0];

const HEADER_FILL: u32 = 0x004F_81BD;
const GRID: u32 = 0x00BF_BFBF;
const LOGO_WIDTH: f32 = 50.0;
const LOGO_TOP: f32 = 30.0;
const TITLE_TOP: f32 = 40.0;
const GENERATED_TOP: f32 = 64.0;
const PERIOD_TOP: f32 = 78.0;
const TABLE_TOP: f32 = 100.0;
const PERIOD_SHIFT: f32 = 14.0;
const SUMMARY_GAP: f32 = 8.0;
/// Distance of the footer baseline from the bottom edge.
const FOOTER_OFFSET: f32 = 30.0;

/// Options for rendering a receipt PDF
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub title: String,
    /// Drawn top-left when it can be decoded; skipped otherwise.
    pub logo_path: Option<PathBuf>,
    pub generated_on: NaiveDate,
    pub geometry: PageGeometry,
    pub padding: CellPadding,
    pub title_font: FontSpec,
    pub meta_font: FontSpec,
    pub header_font: FontSpec,
    pub body_font: FontSpec,
    pub footer_font: FontSpec,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Data Kwitansi".to_string(),
            logo_path: None,
            generated_on: today(),
            geometry: PageGeometry::a4(),
            padding: CellPadding::default(),
            title_font: FontSpec::new(Face::Bold, 18.0),
            meta_font: FontSpec::new(Face::Regular, 10.0),
            header_font: FontSpec::new(Face::Bold, 9.0),
            body_font: FontSpec::new(Face::Regular, 9.0),
            footer_font: FontSpec::new(Face::Regular, 8.0),
        }
    }
}

/// A finished PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    options: PdfOptions,
}

impl PdfRenderer {
    #[must_use]
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    /// Render `records` to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::EmptyDataset`] before drawing anything when
    /// `records` is empty, or a write error if the document cannot be
    /// serialized.
    pub fn render(
        &self,
        records: &[ReceiptRecord],
        period: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<RenderedPdf> {
        let buffer = self.layout_pages(records, period)?;
        let page_count = buffer.len();
        let bytes = buffer.into_pdf()?;

        tracing::debug!(
            records = records.len(),
            pages = page_count,
            bytes = bytes.len(),
            "rendered receipt pdf"
        );
        Ok(RenderedPdf { bytes, page_count })
    }

    /// Run both passes and return the pages without serializing them.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::EmptyDataset`] when `records` is empty.
    pub fn layout_pages(
        &self,
        records: &[ReceiptRecord],
        period: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PageBuffer> {
        if records.is_empty() {
            return Err(PdfError::EmptyDataset);
        }

        let opts = &self.options;
        let mut buffer = PageBuffer::new(opts.geometry.width, opts.geometry.height);
        buffer.set_logo(self.load_logo());
        let logo_height = buffer.logo().map(|logo| logo.scaled_height(LOGO_WIDTH));
        let mut layout = TableLayout::new(opts.geometry, &COLUMN_WEIGHTS, opts.padding);

        let first = buffer.add_page();
        let table_top = self.draw_document_header(first, logo_height, period);
        layout.set_cursor_y(table_top);
        self.draw_table_header(first, &mut layout);

        for (index, record) in records.iter().enumerate() {
            let cells = receipt_cells(index, record);
            let height = layout.row_height(&cells, &opts.body_font);

            if layout.place_row(height) == RowPlacement::NextPage {
                layout.break_page();
                let page = buffer.add_page();
                self.draw_table_header(page, &mut layout);
            }

            let page = current_page(&mut buffer, &layout)?;
            let top = layout.commit_row(height);
            let fill = stripe_fill(index);
            self.draw_row(page, &layout, top, height, &cells, &opts.body_font, fill, Rgb::BLACK);
            page.record_row(DrawnRow {
                index: Some(index),
                top,
                height,
                fill,
            });
        }

        self.draw_summary(&mut buffer, &mut layout, records.len())?;
        self.stamp_footers(&mut buffer);

        Ok(buffer)
    }

    fn load_logo(&self) -> Option<LogoImage> {
        let path = self.options.logo_path.as_ref()?;
        match LogoImage::load(path) {
            Ok(logo) => Some(logo),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "logo unavailable, rendering without it"
                );
                None
            }
        }
    }

    /// Logo, title, generation date and optional period. Returns the table's top `y`.
    fn draw_document_header(
        &self,
        page: &mut BufferedPage,
        logo_height: Option<f32>,
        period: Option<(NaiveDate, NaiveDate)>,
    ) -> f32 {
        let opts = &self.options;

        if let Some(height) = logo_height {
            page.logo(opts.geometry.margins.left, LOGO_TOP, LOGO_WIDTH, height);
        }

        self.centered(page, TITLE_TOP, &opts.title_font, &opts.title);
        self.centered(
            page,
            GENERATED_TOP,
            &opts.meta_font,
            &generated_label(opts.generated_on),
        );

        match period {
            Some((start, end)) => {
                self.centered(page, PERIOD_TOP, &opts.meta_font, &period_label(start, end));
                TABLE_TOP + PERIOD_SHIFT
            }
            None => TABLE_TOP,
        }
    }

    fn centered(&self, page: &mut BufferedPage, top: f32, font: &FontSpec, text: &str) {
        let x = (self.options.geometry.width - font.text_width(text)) / 2.0;
        page.text(x, baseline(top, font), font, Rgb::BLACK, text);
    }

    fn draw_table_header(&self, page: &mut BufferedPage, layout: &mut TableLayout) {
        let font = &self.options.header_font;
        let height = layout.row_height(&RECEIPT_HEADERS, font);
        let top = layout.advance(height);
        let fill = Some(Rgb::hex(HEADER_FILL));
        self.draw_row(page, layout, top, height, &RECEIPT_HEADERS, font, fill, Rgb::WHITE);
        page.record_row(DrawnRow {
            index: None,
            top,
            height,
            fill,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row<S: AsRef<str>>(
        &self,
        page: &mut BufferedPage,
        layout: &TableLayout,
        top: f32,
        height: f32,
        cells: &[S],
        font: &FontSpec,
        fill: Option<Rgb>,
        color: Rgb,
    ) {
        let padding = layout.padding();
        let grid = Rgb::hex(GRID);

        for (col, (cell, width)) in cells.iter().zip(layout.columns()).enumerate() {
            let x = layout.column_x(col);
            if let Some(fill) = fill {
                page.fill_rect(x, top, *width, height, fill);
            }
            page.stroke_rect(x, top, *width, height, grid, 0.5);

            let inner = (width - 2.0 * padding.horizontal).max(1.0);
            let mut line_top = top + padding.vertical;
            for line in font.wrap(cell.as_ref(), inner) {
                if !line.is_empty() {
                    // the running number is centred, everything else left-aligned
                    let text_x = if col == 0 {
                        x + (width - font.text_width(&line)) / 2.0
                    } else {
                        x + padding.horizontal
                    };
                    page.text(text_x, baseline(line_top, font), font, color, &line);
                }
                line_top += font.line_height;
            }
        }
    }

    fn draw_summary(
        &self,
        buffer: &mut PageBuffer,
        layout: &mut TableLayout,
        total: usize,
    ) -> Result<()> {
        let font = &self.options.body_font;
        let height = SUMMARY_GAP + font.line_height;
        if !layout.fits(height) {
            layout.break_page();
            buffer.add_page();
        }

        let top = layout.advance(height) + SUMMARY_GAP;
        let x = layout.column_x(0);
        let page = current_page(buffer, layout)?;
        page.text(
            x,
            baseline(top, font),
            font,
            Rgb::BLACK,
            &format!("Total records: {total}"),
        );
        Ok(())
    }

    /// Second pass: every page gets its number once the total is known.
    fn stamp_footers(&self, buffer: &mut PageBuffer) {
        let opts = &self.options;
        let total = buffer.len();
        let right = opts.geometry.width - opts.geometry.margins.right;
        let baseline_y = opts.geometry.height - FOOTER_OFFSET;

        for (index, page) in buffer.pages_mut().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            let x = right - opts.footer_font.text_width(&label);
            page.text(x, baseline_y, &opts.footer_font, Rgb::BLACK, &label);
        }
    }
}

fn baseline(top: f32, font: &FontSpec) -> f32 {
    top + font.size * HELVETICA_ASCENT
}

fn current_page<'a>(buffer: &'a mut PageBuffer, layout: &TableLayout) -> Result<&'a mut BufferedPage> {
    let index = layout.page_index();
    buffer
        .page_mut(index)
        .ok_or_else(|| PdfError::Layout(format!("page {index} was never added")))
}
