//! PDF output through `lopdf`
//!
//! Builds the document object by object: one page dictionary and content
//! stream per page, image XObjects shared between pages, and a single
//! Helvetica font for placeholder text. Nothing time-dependent is written, so
//! identical input produces identical bytes.

use crate::constants::ZONE_OUTLINE_WIDTH;
use crate::decode::{DecodedImage, ImagePixels};
use crate::layout::Rect;
use crate::types::{Color, PageSize, PhotobookError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::writer::DocumentWriter;

/// Name of the placeholder font in page resources
const FONT_NAME: &str = "F1";

/// A [`DocumentWriter`] producing PDF bytes
pub struct PdfWriter {
    doc: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    current: Option<PageState>,
    image_cache: HashMap<DecodedImage, ObjectId>,
    font_id: Option<ObjectId>,
    title: Option<String>,
}

/// Content accumulated for the page being written
struct PageState {
    size: PageSize,
    content_ops: Vec<String>,
    xobjects: Dictionary,
    uses_font: bool,
}

impl PageState {
    fn new(size: PageSize) -> Self {
        Self {
            size,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
            uses_font: false,
        }
    }

    /// Convert a top-down y coordinate of a box of `height` to PDF's
    /// bottom-up coordinate of the box's lower edge
    fn flip_y(&self, y: f64, height: f64) -> f64 {
        self.size.height_pt - y - height
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        Self {
            doc,
            pages_tree_id,
            page_refs: Vec::new(),
            current: None,
            image_cache: HashMap::new(),
            font_id: None,
            title: None,
        }
    }

    /// Record `title` in the document information dictionary
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of pages started so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len() + usize::from(self.current.is_some())
    }

    fn page_mut(&mut self) -> Result<&mut PageState> {
        self.current.as_mut().ok_or(PhotobookError::NoPages)
    }

    /// Write out the current page, if any
    fn flush_page(&mut self) {
        let Some(page) = self.current.take() else {
            return;
        };

        let mut resources = Dictionary::new();
        if !page.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(page.xobjects));
        }
        if page.uses_font {
            let font_id = self.font_object();
            let mut fonts = Dictionary::new();
            fonts.set(FONT_NAME, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }

        let content = page.content_ops.join("");
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.size.width_pt as f32),
                Object::Real(page.size.height_pt as f32),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(content_id));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
    }

    fn font_object(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.doc.add_object(font_dict);
        self.font_id = Some(id);
        id
    }

    /// Add an image XObject, reusing an earlier one for identical images
    fn image_object(&mut self, image: &DecodedImage) -> Result<ObjectId> {
        if let Some(&id) = self.image_cache.get(image) {
            return Ok(id);
        }

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(image.size.width as i64));
        dict.set("Height", Object::Integer(image.size.height as i64));
        dict.set("BitsPerComponent", Object::Integer(8));

        let stream = match &image.pixels {
            ImagePixels::Jpeg { data, components } => {
                let color_space: &[u8] = if *components == 1 {
                    b"DeviceGray"
                } else {
                    b"DeviceRGB"
                };
                dict.set("ColorSpace", Object::Name(color_space.to_vec()));
                dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
                let mut stream = Stream::new(dict, data.clone());
                stream.allows_compression = false;
                stream
            }
            ImagePixels::Rgb { rgb, alpha } => {
                dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
                if let Some(alpha) = alpha {
                    let smask_id = self.soft_mask_object(image, alpha)?;
                    dict.set("SMask", Object::Reference(smask_id));
                }
                let mut stream = Stream::new(dict, rgb.clone());
                stream.compress()?;
                stream
            }
        };

        let id = self.doc.add_object(stream);
        self.image_cache.insert(image.clone(), id);
        Ok(id)
    }

    fn soft_mask_object(&mut self, image: &DecodedImage, alpha: &[u8]) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(image.size.width as i64));
        dict.set("Height", Object::Integer(image.size.height as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        let mut stream = Stream::new(dict, alpha.to_vec());
        stream.compress()?;
        Ok(self.doc.add_object(stream))
    }
}

impl DocumentWriter for PdfWriter {
    fn begin_document(&mut self, size: PageSize) -> Result<()> {
        if self.page_count() > 0 {
            return Err(PhotobookError::Config(
                "Document has already been started".to_string(),
            ));
        }
        self.add_page(size)
    }

    fn add_page(&mut self, size: PageSize) -> Result<()> {
        size.validate()?;
        self.flush_page();
        self.current = Some(PageState::new(size));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, stroke: Color) -> Result<()> {
        let page = self.page_mut()?;
        let (r, g, b) = stroke.fractions();
        let y = page.flip_y(rect.y, rect.height);
        page.content_ops.push(format!(
            "q {} {} {} RG {} w {} {} {} {} re S Q\n",
            num(r),
            num(g),
            num(b),
            num(ZONE_OUTLINE_WIDTH),
            num(rect.x),
            num(y),
            num(rect.width),
            num(rect.height)
        ));
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect) -> Result<()> {
        if self.current.is_none() {
            return Err(PhotobookError::NoPages);
        }
        let image_id = self.image_object(image)?;
        let page = self.page_mut()?;

        let name = format!("Im{}", page.xobjects.len());
        page.xobjects.set(name.as_bytes(), Object::Reference(image_id));

        let y = page.flip_y(rect.y, rect.height);
        page.content_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            num(rect.width),
            num(rect.height),
            num(rect.x),
            num(y),
            name
        ));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) -> Result<()> {
        let page = self.page_mut()?;
        page.uses_font = true;

        // Baseline one font size below the top edge
        let baseline = page.flip_y(y, font_size);
        page.content_ops.push(format!(
            "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
            FONT_NAME,
            num(font_size),
            num(x),
            num(baseline),
            escape_text(text)
        ));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_page();
        if self.page_refs.is_empty() {
            return Err(PhotobookError::NoPages);
        }

        // Create pages tree
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        if let Some(title) = self.title {
            let info_id = self.doc.add_object(Dictionary::from_iter(vec![
                ("Title", Object::string_literal(title)),
                ("Producer", Object::string_literal("photobook-layout")),
            ]));
            self.doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Format a number for a content stream: at most four decimals, no trailing
/// zeros, never exponent notation.
fn num(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Make text safe for a literal string with a standard 14 font
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
