//! Table geometry and page-break decisions.
//!
//! Coordinates are in points, measured from the top-left corner of the page
//! with `y` growing downwards. Nothing here draws; text measurement comes in
//! through [`TextMeasure`] so layouts can be tested without a PDF backend.

/// Measures how tall a piece of text is once wrapped to a width.
pub trait TextMeasure {
    /// Height in points of `text` wrapped to `width` points.
    fn text_height(&self, text: &str, width: f32) -> f32;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_height(&self, text: &str, width: f32) -> f32 {
        (**self).text_height(text, width)
    }
}

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);

    /// Colour from a `0xRRGGBB` literal.
    #[must_use]
    pub fn hex(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xFF) as f32 / 255.0;
        Rgb(channel(16), channel(8), channel(0))
    }
}

/// Fill for even-indexed data rows.
pub const STRIPE_FILL: u32 = 0x00DC_E6F1;

/// Background of a data row, keyed to the record's index in the full result
/// set so page breaks never shift the pattern.
#[must_use]
pub fn stripe_fill(original_index: usize) -> Option<Rgb> {
    (original_index % 2 == 0).then(|| Rgb::hex(STRIPE_FILL))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    #[must_use]
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Page size, margins and the band kept free above the bottom margin for the
/// page footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub footer_reserve: f32,
}

impl PageGeometry {
    /// A4 portrait with 40pt margins.
    #[must_use]
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margins: Margins::uniform(40.0),
            footer_reserve: 10.0,
        }
    }

    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Lowest `y` a table row may reach.
    #[must_use]
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margins.bottom - self.footer_reserve
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Inner spacing between a cell border and its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPadding {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            horizontal: 6.0,
            vertical: 4.0,
        }
    }
}

/// Scale column weights so they fill `available` points exactly.
///
/// Non-positive or empty weights give equal columns.
#[must_use]
pub fn fit_column_widths(weights: &[f32], available: f32) -> Vec<f32> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        let equal = available / weights.len() as f32;
        return vec![equal; weights.len()];
    }
    weights
        .iter()
        .map(|w| w.max(0.0) / total * available)
        .collect()
}

/// Where the next row goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPlacement {
    /// Below the cursor on the current page.
    CurrentPage,
    /// On a fresh page, after the table header is redrawn.
    NextPage,
}

/// Per-render table state: column geometry plus the cursor.
#[derive(Debug, Clone)]
pub struct TableLayout {
    geometry: PageGeometry,
    padding: CellPadding,
    columns: Vec<f32>,
    origin_x: f32,
    cursor_y: f32,
    page_index: usize,
    page_count: usize,
    rows_on_page: usize,
}

impl TableLayout {
    /// Lay out a table whose columns share the printable width by `weights`.
    #[must_use]
    pub fn new(geometry: PageGeometry, weights: &[f32], padding: CellPadding) -> Self {
        let columns = fit_column_widths(weights, geometry.content_width());
        let table_width: f32 = columns.iter().sum();
        let origin_x =
            geometry.margins.left + (geometry.content_width() - table_width).max(0.0) / 2.0;

        Self {
            geometry,
            padding,
            columns,
            origin_x,
            cursor_y: geometry.margins.top,
            page_index: 0,
            page_count: 1,
            rows_on_page: 0,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn padding(&self) -> CellPadding {
        self.padding
    }

    #[must_use]
    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    #[must_use]
    pub fn table_width(&self) -> f32 {
        self.columns.iter().sum()
    }

    /// Left edge of column `index`.
    #[must_use]
    pub fn column_x(&self, index: usize) -> f32 {
        self.origin_x + self.columns.iter().take(index).sum::<f32>()
    }

    #[must_use]
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Move the cursor, e.g. below a document header.
    pub fn set_cursor_y(&mut self, y: f32) {
        self.cursor_y = y;
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Height of a row: the tallest wrapped cell plus vertical padding.
    pub fn row_height<M, S>(&self, cells: &[S], measure: &M) -> f32
    where
        M: TextMeasure + ?Sized,
        S: AsRef<str>,
    {
        let tallest = cells
            .iter()
            .zip(&self.columns)
            .map(|(cell, width)| {
                let inner = (width - 2.0 * self.padding.horizontal).max(1.0);
                measure.text_height(cell.as_ref(), inner)
            })
            .fold(0.0_f32, f32::max);
        tallest + 2.0 * self.padding.vertical
    }

    /// Whether `height` more points fit above the footer band.
    #[must_use]
    pub fn fits(&self, height: f32) -> bool {
        self.cursor_y + height <= self.geometry.content_bottom()
    }

    /// Decide where a data row of `height` goes. Rows are never split.
    ///
    /// A row that does not fit even on a fresh continuation page is kept on
    /// that page rather than pushed forward forever.
    #[must_use]
    pub fn place_row(&self, height: f32) -> RowPlacement {
        if self.fits(height) || (self.rows_on_page == 0 && self.page_index > 0) {
            RowPlacement::CurrentPage
        } else {
            RowPlacement::NextPage
        }
    }

    /// Start a new page with the cursor at the top margin.
    pub fn break_page(&mut self) {
        self.page_index += 1;
        self.page_count = self.page_count.max(self.page_index + 1);
        self.cursor_y = self.geometry.margins.top;
        self.rows_on_page = 0;
    }

    /// Reserve `height` points for a non-data block (table header, summary).
    /// Returns the block's top `y`.
    pub fn advance(&mut self, height: f32) -> f32 {
        let top = self.cursor_y;
        self.cursor_y += height;
        top
    }

    /// Reserve `height` points for a data row. Returns the row's top `y`.
    pub fn commit_row(&mut self, height: f32) -> f32 {
        self.rows_on_page += 1;
        self.advance(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every 10 characters take one 10pt line, regardless of width.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn text_height(&self, text: &str, _width: f32) -> f32 {
            let lines = text.chars().count().div_ceil(10).max(1);
            lines as f32 * 10.0
        }
    }

    fn small_page() -> PageGeometry {
        PageGeometry {
            width: 200.0,
            height: 200.0,
            margins: Margins::uniform(20.0),
            footer_reserve: 10.0,
        }
    }

    #[test]
    fn test_fit_column_widths() {
        let widths = fit_column_widths(&[1.0, 3.0], 100.0);
        assert_eq!(widths, vec![25.0, 75.0]);

        let reference = fit_column_widths(&[25.0, 70.0, 70.0, 120.0, 60.0, 80.0, 80.0, 90.0], 515.28);
        let total: f32 = reference.iter().sum();
        assert!((total - 515.28).abs() < 0.01);
        assert!(reference[3] > reference[0]);

        assert_eq!(fit_column_widths(&[0.0, 0.0], 10.0), vec![5.0, 5.0]);
        assert!(fit_column_widths(&[], 10.0).is_empty());
    }

    #[test]
    fn test_columns_are_centred() {
        let layout = TableLayout::new(small_page(), &[1.0, 1.0], CellPadding::default());
        assert_eq!(layout.column_x(0), 20.0);
        assert_eq!(layout.column_x(1), 100.0);
        assert_eq!(layout.table_width(), 160.0);
    }

    #[test]
    fn test_row_height_is_tallest_cell_plus_padding() {
        let layout = TableLayout::new(
            small_page(),
            &[1.0, 1.0, 1.0],
            CellPadding {
                horizontal: 2.0,
                vertical: 4.0,
            },
        );
        let cells = ["short", "twenty-five characters!!!", ""];
        // 25 chars -> 3 lines -> 30pt, plus 2 * 4pt padding
        assert_eq!(layout.row_height(&cells, &FixedMeasure), 38.0);
        assert_eq!(layout.row_height(&["", "", ""], &FixedMeasure), 18.0);
    }

    #[test]
    fn test_page_break_when_row_exceeds_remaining_space() {
        let mut layout = TableLayout::new(small_page(), &[1.0], CellPadding::default());
        // content bottom = 200 - 20 - 10 = 170
        layout.set_cursor_y(150.0);
        layout.commit_row(10.0);
        assert!(layout.fits(10.0));
        assert_eq!(layout.place_row(10.0), RowPlacement::CurrentPage);
        assert_eq!(layout.place_row(10.5), RowPlacement::NextPage);

        layout.break_page();
        assert_eq!(layout.page_index(), 1);
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.cursor_y(), 20.0);
        assert_eq!(layout.place_row(10.5), RowPlacement::CurrentPage);
    }

    #[test]
    fn test_oversized_row_breaks_once_then_stays() {
        let mut layout = TableLayout::new(small_page(), &[1.0], CellPadding::default());
        layout.set_cursor_y(60.0);
        layout.commit_row(20.0);

        let huge = 500.0;
        assert_eq!(layout.place_row(huge), RowPlacement::NextPage);
        layout.break_page();
        layout.advance(20.0); // table header
        assert_eq!(layout.place_row(huge), RowPlacement::CurrentPage);
    }

    #[test]
    fn test_stripe_follows_original_index() {
        assert_eq!(stripe_fill(0), Some(Rgb::hex(STRIPE_FILL)));
        assert_eq!(stripe_fill(1), None);
        assert_eq!(stripe_fill(2), Some(Rgb::hex(STRIPE_FILL)));
        assert_eq!(stripe_fill(37), None);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::hex(0x00FF_FFFF), Rgb::WHITE);
        assert_eq!(Rgb::hex(0), Rgb::BLACK);
        let Rgb(r, g, b) = Rgb::hex(0x004F_81BD);
        assert!((r - 79.0 / 255.0).abs() < 1e-6);
        assert!((g - 129.0 / 255.0).abs() < 1e-6);
        assert!((b - 189.0 / 255.0).abs() < 1e-6);
    }
}
