use crate::{
    refs::{ObjectReferences, RefType},
    ExamError, Pt,
};
use id_arena::Id;
use log::warn;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A parsed TrueType / OpenType font. The font is embedded in its entirety
/// in the generated PDF and addressed by glyph id (Identity-H encoding), so
/// any character the font covers can be printed.
pub struct Font {
    pub face: OwnedFace,
    /// glyph id → the character it was mapped from, sorted by glyph id
    glyphs: BTreeMap<u16, char>,
    /// characters that have already been reported as substituted
    substituted: RefCell<BTreeSet<char>>,
}

impl Font {
    /// Parse a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ExamError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let glyphs = unicode_glyphs(face.as_face_ref());
        Ok(Font {
            face,
            glyphs,
            substituted: RefCell::new(BTreeSet::new()),
        })
    }

    /// Read and parse a font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, ExamError> {
        let bytes = std::fs::read(path.as_ref())?;
        Font::load(bytes)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// The full name of the font, if it declares one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it declares one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|gid| gid.0)
    }

    /// The glyph used to print `ch`. Characters the font doesn't cover are
    /// printed as U+FFFD, or `?` if the font has no replacement character.
    pub fn glyph_for(&self, ch: char) -> Result<u16, ExamError> {
        if let Some(gid) = self.glyph_id(ch) {
            return Ok(gid);
        }

        let fallback = self
            .glyph_id('\u{FFFD}')
            .or_else(|| self.glyph_id('?'))
            .ok_or(ExamError::MissingGlyph { ch })?;

        if self.substituted.borrow_mut().insert(ch) {
            warn!("font has no glyph for {ch:?}, substituting a replacement glyph");
        }
        Ok(fallback)
    }

    /// Horizontal advance of a glyph at the given size
    pub fn advance(&self, gid: u16, size: Pt) -> Pt {
        self.scaling(size)
            * self
                .face()
                .glyph_hor_advance(GlyphId(gid))
                .unwrap_or_default() as f32
    }

    /// Glyph ids for `text`, encoded as big-endian pairs ready for an
    /// Identity-H `Tj` operator
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, ExamError> {
        let mut encoded = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            encoded.extend_from_slice(&self.glyph_for(ch)?.to_be_bytes());
        }
        Ok(encoded)
    }

    /// Advance widths of every mapped glyph in PDF glyph space (1/1000 em)
    fn glyph_space_widths(&self) -> BTreeMap<u16, f32> {
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        self.glyphs
            .keys()
            .filter_map(|&gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.get_or_gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let widths = self.glyph_space_widths();
        let default_width = widths.values().copied().fold(0.0f32, f32::max);

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(default_width);

        // group consecutive glyph ids into runs
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for (gid, width) in widths {
            let continues_run = runs
                .last()
                .is_some_and(|(start, run)| *start as usize + run.len() == gid as usize);
            if !continues_run {
                runs.push((gid, Vec::new()));
            }
            if let Some((_, run)) = runs.last_mut() {
                run.push(width);
            }
        }
        let mut pdf_widths = cid_font.widths();
        for (start, run) in runs {
            pdf_widths.consecutive(start, run);
        }
        pdf_widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(&u16, &char)> = self.glyphs.iter().collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

/// Map every glyph reachable from a unicode cmap subtable back to the first
/// character that selects it
fn unicode_glyphs(face: &Face<'_>) -> BTreeMap<u16, char> {
    let mut map = BTreeMap::new();
    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            }
        });
    }

    map
}

#[cfg(test)]
mod test {
    use super::*;

    fn dejavu() -> Font {
        Font::load(include_bytes!("../assets/fonts/DejaVuSans.ttf").to_vec()).expect("can load font")
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            Font::load(b"definitely not a font".to_vec()),
            Err(ExamError::FaceParsing(_))
        ));
    }

    #[test]
    fn reads_font_names() {
        let font = dejavu();
        assert_eq!(font.family().as_deref(), Some("DejaVu Sans"));
        assert!(font.name().is_some());
    }

    #[test]
    fn uncovered_characters_use_the_replacement_glyph() {
        let font = dejavu();
        let replacement = font.glyph_id('\u{FFFD}').expect("has replacement glyph");
        assert_eq!(font.glyph_for('\u{10FFFD}').expect("falls back"), replacement);
        assert_eq!(font.glyph_for('A').ok(), font.glyph_id('A'));
    }

    #[test]
    fn encodes_two_bytes_per_character() {
        let font = dejavu();
        let encoded = font.encode("a✓").expect("can encode");
        assert_eq!(encoded.len(), 4);
        let gid = font.glyph_id('a').expect("has a");
        assert_eq!(&encoded[..2], &gid.to_be_bytes());
    }

    #[test]
    fn advances_scale_with_size() {
        let font = dejavu();
        let gid = font.glyph_id('M').expect("has M");
        let small = font.advance(gid, Pt(12.0));
        let large = font.advance(gid, Pt(24.0));
        assert!(small > Pt(0.0));
        assert!((*large - *small * 2.0).abs() < 1e-3);
    }
}
