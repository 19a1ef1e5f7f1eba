//! In-memory pages that stay editable until the document is written.
//!
//! Drawing calls take top-down coordinates (see [`crate::layout`]) and are
//! converted to PDF user space as they are recorded.

use crate::error::Result;
use crate::layout::Rgb;
use crate::metrics::{Face, FontSpec};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use std::path::Path;

/// Resource name of the logo image.
const LOGO_RESOURCE: &str = "Logo";

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Encode text for a WinAnsi Type1 font. Characters outside Latin-1 become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// A decoded RGB logo, ready to embed as an image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl LogoImage {
    /// Decode any format the `image` crate understands.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the file is missing or unreadable.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, image::ImageError> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgb.into_raw(),
        })
    }

    /// Height for a given drawn width, keeping the aspect ratio.
    #[must_use]
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        width * self.height as f32 / self.width as f32
    }
}

/// A table row as drawn, kept for inspection after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnRow {
    /// Record index in the full result set; `None` for the header row.
    pub index: Option<usize>,
    pub top: f32,
    pub height: f32,
    pub fill: Option<Rgb>,
}

/// One page of drawing operations.
#[derive(Debug, Clone)]
pub struct BufferedPage {
    page_height: f32,
    operations: Vec<Operation>,
    texts: Vec<String>,
    rows: Vec<DrawnRow>,
}

impl BufferedPage {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
            texts: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let bottom = self.flip(y + height);
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("re", vec![real(x), real(bottom), real(width), real(height)]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, line_width: f32) {
        let bottom = self.flip(y + height);
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("w", vec![real(line_width)]),
            Operation::new("re", vec![real(x), real(bottom), real(width), real(height)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Draw a single line of text with its baseline at `baseline`.
    pub fn text(&mut self, x: f32, baseline: f32, font: &FontSpec, color: Rgb, text: &str) {
        let y = self.flip(baseline);
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.face.resource_name().into(), real(font.size)]),
            Operation::new("rg", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        self.texts.push(text.to_string());
    }

    /// Paint the document logo into the box with top-left corner `(x, y)`.
    pub fn logo(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let bottom = self.flip(y + height);
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![real(width), real(0.0), real(0.0), real(height), real(x), real(bottom)],
            ),
            Operation::new("Do", vec![LOGO_RESOURCE.into()]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn record_row(&mut self, row: DrawnRow) {
        self.rows.push(row);
    }

    /// Text drawn on this page, in drawing order.
    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    #[must_use]
    pub fn rows(&self) -> &[DrawnRow] {
        &self.rows
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

/// Pages held in memory, addressable by index, until [`PageBuffer::into_pdf`].
#[derive(Debug, Clone)]
pub struct PageBuffer {
    width: f32,
    height: f32,
    pages: Vec<BufferedPage>,
    logo: Option<LogoImage>,
}

impl PageBuffer {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
            logo: None,
        }
    }

    pub fn set_logo(&mut self, logo: Option<LogoImage>) {
        self.logo = logo;
    }

    #[must_use]
    pub fn logo(&self) -> Option<&LogoImage> {
        self.logo.as_ref()
    }

    /// Append a blank page and return it.
    pub fn add_page(&mut self) -> &mut BufferedPage {
        self.pages.push(BufferedPage::new(self.height));
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// The page at `index`, for drawing after later pages exist.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut BufferedPage> {
        self.pages.get_mut(index)
    }

    #[must_use]
    pub fn pages(&self) -> &[BufferedPage] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut BufferedPage> {
        self.pages.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Write every buffered page into a single PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if a content stream cannot be encoded or the document
    /// cannot be serialized.
    pub fn into_pdf(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary(Face::Regular));
        let bold_id = doc.add_object(font_dictionary(Face::Bold));

        let mut resources = dictionary! {
            "Font" => dictionary! {
                Face::Regular.resource_name() => regular_id,
                Face::Bold.resource_name() => bold_id,
            },
        };
        if let Some(logo) = self.logo {
            let image = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(logo.width),
                    "Height" => i64::from(logo.height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                },
                logo.pixels,
            );
            let image_id = doc.add_object(image);
            resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
        }
        let resources_id = doc.add_object(resources);

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let content = Content {
                operations: page.operations,
            };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    real(self.width),
                    real(self.height),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn font_dictionary(face: Face) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}
