//! The drawing surface the layout engine prints onto.
//!
//! Layout only ever needs five things from a backend: measure a string, place
//! a string, outline a box, start a page and save. [Canvas] is that seam;
//! [PdfCanvas] is the real backend, and tests substitute recorders.

use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::layout::width_of_text;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::ExamError;
use id_arena::Id;
use log::debug;
use std::path::{Path, PathBuf};

/// A drawing backend with one fixed font, used at several sizes. All
/// coordinates are points from the bottom-left corner of the current page;
/// text is placed by its baseline start.
pub trait Canvas {
    /// Width of `text` set at `size`
    fn measure_width(&self, text: &str, size: Pt) -> Result<Pt, ExamError>;

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, size: Pt) -> Result<(), ExamError>;

    /// Outline (don't fill) the rectangle with lower-left corner `(x, y)`
    fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) -> Result<(), ExamError>;

    /// Finish the current page; subsequent drawing goes on a fresh one
    fn new_page(&mut self) -> Result<(), ExamError>;

    /// Finish the document. Nothing may be drawn afterwards.
    fn save(&mut self) -> Result<(), ExamError>;
}

/// A [Canvas] that builds a PDF [Document] and writes it to `output` on save.
///
/// Saving writes to a temporary file next to `output` and renames it into
/// place, so `output` only ever exists as a complete document. If generation
/// is abandoned before [Canvas::save], nothing is written at all.
pub struct PdfCanvas {
    document: Document,
    font: Id<Font>,
    page_size: PageSize,
    page: Option<Page>,
    line_width: Pt,
    output: PathBuf,
}

impl PdfCanvas {
    pub fn new<P: Into<PathBuf>>(font: Font, page_size: PageSize, output: P) -> PdfCanvas {
        let mut document = Document::default();
        let font = document.add_font(font);
        PdfCanvas {
            document,
            font,
            page_size,
            page: Some(Page::new(page_size)),
            line_width: Pt(1.0),
            output: output.into(),
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Stroke width used by [Canvas::draw_rect]
    pub fn set_line_width(&mut self, width: Pt) {
        self.line_width = width;
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Pages finished so far, plus the one being drawn
    pub fn page_count(&self) -> usize {
        self.document.pages.len() + usize::from(self.page.is_some())
    }

    fn page_mut(&mut self) -> Result<&mut Page, ExamError> {
        self.page.as_mut().ok_or(ExamError::CanvasClosed)
    }

    fn font(&self) -> Result<&Font, ExamError> {
        if self.page.is_none() {
            return Err(ExamError::CanvasClosed);
        }
        Ok(&self.document.fonts[self.font])
    }
}

impl Canvas for PdfCanvas {
    fn measure_width(&self, text: &str, size: Pt) -> Result<Pt, ExamError> {
        width_of_text(text, self.font()?, size)
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, size: Pt) -> Result<(), ExamError> {
        // fail here rather than when the document is encoded
        self.font()?.encode(text)?;
        let font = SpanFont { id: self.font, size };
        self.page_mut()?.add_span(SpanLayout {
            text: text.to_string(),
            font,
            coords: (x, y),
        });
        Ok(())
    }

    fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt) -> Result<(), ExamError> {
        let line_width = self.line_width;
        self.page_mut()?
            .add_outline(Rect::from_origin(x, y, width, height), line_width);
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), ExamError> {
        let page = self.page.take().ok_or(ExamError::CanvasClosed)?;
        self.document.add_page(page);
        self.page = Some(Page::new(self.page_size));
        Ok(())
    }

    fn save(&mut self) -> Result<(), ExamError> {
        let page = self.page.take().ok_or(ExamError::CanvasClosed)?;
        self.document.add_page(page);
        let document = std::mem::take(&mut self.document);
        let pages = document.pages.len();

        let dir = match self.output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut partial = tempfile::Builder::new()
            .prefix(".exam-gen-")
            .suffix(".partial")
            .tempfile_in(dir)?;
        document.write(partial.as_file_mut())?;
        partial.as_file().sync_all()?;
        partial
            .persist(&self.output)
            .map_err(|err| ExamError::Io(err.error))?;

        debug!("wrote {} pages to {}", pages, self.output.display());
        Ok(())
    }
}
