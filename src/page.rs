use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::ExamError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Name, Pdf, Str};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text placed with its baseline starting at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// Anything that can be placed on a page
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    /// A stroked, unfilled rectangle
    Outline { rect: Rect, line_width: Pt },
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), size.0, size.1),
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_outline(&mut self, rect: Rect, line_width: Pt) {
        self.contents.push(PageContents::Outline { rect, line_width });
    }

    /// Turn the page contents into a content stream
    pub(crate) fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, ExamError> {
        let mut content = Content::new();

        for item in self.contents.iter() {
            match item {
                PageContents::Text(span) => {
                    let font = &fonts[span.font.id];
                    let glyphs = font.encode(&span.text)?;
                    content
                        .begin_text()
                        .set_font(
                            Name(format!("F{}", span.font.id.index()).as_bytes()),
                            *span.font.size,
                        )
                        .next_line(*span.coords.0, *span.coords.1)
                        .show(Str(&glyphs))
                        .end_text();
                }
                PageContents::Outline { rect, line_width } => {
                    content
                        .save_state()
                        .set_line_width(**line_width)
                        .rect(*rect.x1, *rect.y1, *rect.width(), *rect.height())
                        .stroke()
                        .restore_state();
                }
            }
        }

        Ok(content.finish())
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), ExamError> {
        let rendered = self.render(fonts)?;

        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let index = font_id.index();
            resource_fonts.pair(
                Name(format!("F{index}").as_bytes()),
                refs.get_or_gen(RefType::Font(index)),
            );
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
