//! Paginated receipt tables rendered to PDF.
//!
//! [`layout`] holds the pure table geometry and page-break rules, [`page`]
//! the buffered pages that stay editable until the whole document is known,
//! and [`PdfRenderer`] drives both.
//!
//! ```no_run
//! use kwitansi_core::ReceiptRecord;
//! use kwitansi_pdf::{PdfOptions, PdfRenderer};
//!
//! let records = vec![ReceiptRecord::default()];
//! let pdf = PdfRenderer::new(PdfOptions::default()).render(&records, None).unwrap();
//! println!("{} pages", pdf.page_count);
//! ```

pub mod error;
pub mod layout;
pub mod metrics;
pub mod page;
mod renderer;

pub use error::{PdfError, Result};
pub use layout::{
    fit_column_widths, stripe_fill, CellPadding, Margins, PageGeometry, Rgb, RowPlacement,
    TableLayout, TextMeasure,
};
pub use metrics::{Face, FontSpec};
pub use page::{BufferedPage, DrawnRow, LogoImage, PageBuffer};
pub use renderer::{PdfOptions, PdfRenderer, RenderedPdf, COLUMN_WEIGHTS};
