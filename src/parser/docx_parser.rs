//! DOCX package reader.
//!
//! Only direct `w:p` children of `w:body` become paragraphs, matching what a
//! word processor calls the document's body paragraphs. Tables, text boxes
//! and other nested content are walked past.

use std::borrow::Cow;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::DOCUMENT_PART;
use crate::error::{Error, Result};
use crate::model::{Alignment, Document, Paragraph, Run};

pub(crate) const STYLES_PART: &str = "word/styles.xml";
pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Elements between a paragraph and its runs that still count as the
/// paragraph's own text.
const RUN_CONTAINERS: &[&[u8]] = &[b"w:hyperlink", b"w:ins", b"w:smartTag"];

/// DOCX document parser.
#[derive(Debug)]
pub struct DocxParser {
    document_xml: String,
    styles_xml: Option<String>,
}

impl DocxParser {
    /// Open a DOCX file. The file handle is released before this returns.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, path.display()),
            ))
        })?;
        Self::from_reader(file)
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Parse a DOCX package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let document_xml = read_part(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
            Error::MissingPart(format!("{} (is this a DOCX file?)", DOCUMENT_PART))
        })?;
        let styles_xml = read_part(&mut archive, STYLES_PART)?;

        Ok(Self {
            document_xml,
            styles_xml,
        })
    }

    /// Walk the document body and build the paragraph model.
    pub fn parse(&self) -> Result<Document> {
        let mut walker = BodyWalker::default();
        let mut reader = Reader::from_str(&self.document_xml);
        reader.trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => walker.open(&e, false),
                Event::Empty(e) => walker.open(&e, true),
                Event::End(e) => walker.close(e.name().as_ref()),
                Event::Text(e) if walker.in_text => {
                    let text = e.unescape()?;
                    walker.push_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !walker.saw_body {
            log::warn!("document part has no WordprocessingML body; no paragraphs read");
        }
        log::debug!("parsed {} body paragraphs", walker.paragraphs.len());

        Ok(Document {
            paragraphs: walker.paragraphs,
            styles: self.styles_xml.clone(),
        })
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Extract an attribute value by its `w:`-qualified name.
fn get_attr(e: &BytesStart, key: &[u8], names: &Names) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| names.canonical(a.key.as_ref()).as_ref() == key)
        .map(|a| match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}

/// WML toggle property: present means on unless `w:val` says otherwise.
fn toggle_value(e: &BytesStart, names: &Names) -> bool {
    !matches!(
        get_attr(e, b"w:val", names).as_deref(),
        Some("0" | "false" | "off")
    )
}

/// Maps the prefix a package binds to the WordprocessingML namespace onto
/// `w:`, so matching can use the conventional names.
#[derive(Default)]
struct Names {
    prefix: Option<Vec<u8>>,
}

impl Names {
    fn bind_from(&mut self, root: &BytesStart) {
        for attr in root.attributes().flatten() {
            if attr.value.as_ref() != WML_NS.as_bytes() {
                continue;
            }
            let key = attr.key.as_ref();
            if key == b"xmlns" {
                self.prefix = Some(Vec::new());
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                self.prefix = Some(prefix.to_vec());
            }
        }
    }

    fn canonical<'a>(&self, raw: &'a [u8]) -> Cow<'a, [u8]> {
        match self.prefix.as_deref() {
            None | Some(b"w") => Cow::Borrowed(raw),
            // Default namespace: unprefixed names are WordprocessingML
            Some(b"") if !raw.contains(&b':') => Cow::Owned([b"w:".as_slice(), raw].concat()),
            Some(b"") => Cow::Borrowed(raw),
            Some(prefix) => match raw.strip_prefix(prefix).and_then(|r| r.strip_prefix(b":")) {
                Some(local) => Cow::Owned([b"w:".as_slice(), local].concat()),
                None => Cow::Borrowed(raw),
            },
        }
    }
}

/// Streaming walker over `w:document`.
///
/// Depths count the open ancestors of an element, so a child of an element
/// at depth `d` sits at depth `d + 1`.
#[derive(Default)]
struct BodyWalker {
    names: Names,
    saw_body: bool,
    stack: Vec<Vec<u8>>,
    paragraphs: Vec<Paragraph>,
    paragraph: Option<(usize, Paragraph)>,
    run: Option<(usize, Run)>,
    in_text: bool,
}

impl BodyWalker {
    fn open(&mut self, e: &BytesStart, empty: bool) {
        if self.stack.is_empty() {
            self.names.bind_from(e);
        }
        let qname = e.name();
        let name = self.names.canonical(qname.as_ref()).into_owned();
        let name = name.as_slice();
        if name == b"w:body" {
            self.saw_body = true;
        }
        let depth = self.stack.len();
        let parent = self.stack.last().cloned();
        let parent = parent.as_deref();

        match name {
            b"w:p" if parent == Some(b"w:body".as_slice()) => {
                if empty {
                    self.paragraphs.push(Paragraph::new());
                } else {
                    self.paragraph = Some((depth, Paragraph::new()));
                }
            }
            b"w:r" if self.run.is_none() && self.is_run_position(depth, parent) => {
                if !empty {
                    self.run = Some((depth, Run::default()));
                }
            }
            _ => {
                if let Some(run_depth) = self.run.as_ref().map(|(d, _)| *d) {
                    self.open_in_run(e, name, depth, run_depth, parent, empty);
                } else if let Some(p_depth) = self.paragraph.as_ref().map(|(d, _)| *d) {
                    self.open_in_paragraph(e, name, depth, p_depth, parent);
                }
            }
        }

        if !empty {
            self.stack.push(name.to_vec());
        }
    }

    fn is_run_position(&self, depth: usize, parent: Option<&[u8]>) -> bool {
        let Some((p_depth, _)) = self.paragraph.as_ref() else {
            return false;
        };
        match parent {
            Some(b"w:p") => depth == p_depth + 1,
            Some(container) => {
                depth == p_depth + 2 && RUN_CONTAINERS.iter().any(|c| *c == container)
            }
            None => false,
        }
    }

    fn open_in_paragraph(
        &mut self,
        e: &BytesStart,
        name: &[u8],
        depth: usize,
        p_depth: usize,
        parent: Option<&[u8]>,
    ) {
        if depth != p_depth + 2 || parent != Some(b"w:pPr".as_slice()) {
            return;
        }
        let Some((_, paragraph)) = self.paragraph.as_mut() else {
            return;
        };
        match name {
            b"w:jc" => {
                paragraph.alignment =
                    get_attr(e, b"w:val", &self.names).map(|v| Alignment::from_wml(&v));
            }
            b"w:pStyle" => paragraph.style = get_attr(e, b"w:val", &self.names),
            _ => {}
        }
    }

    fn open_in_run(
        &mut self,
        e: &BytesStart,
        name: &[u8],
        depth: usize,
        run_depth: usize,
        parent: Option<&[u8]>,
        empty: bool,
    ) {
        if depth == run_depth + 1 {
            match name {
                b"w:t" => self.in_text = !empty,
                b"w:tab" => self.push_text("\t"),
                b"w:br" | b"w:cr" => self.push_text("\n"),
                _ => {}
            }
            return;
        }

        if depth != run_depth + 2 || parent != Some(b"w:rPr".as_slice()) {
            return;
        }
        let Some((_, run)) = self.run.as_mut() else {
            return;
        };
        match name {
            b"w:b" => run.bold = Some(toggle_value(e, &self.names)),
            b"w:i" => run.italic = Some(toggle_value(e, &self.names)),
            b"w:u" => {
                run.underline = Some(get_attr(e, b"w:val", &self.names).as_deref() != Some("none"));
            }
            b"w:rFonts" => {
                run.font_name = get_attr(e, b"w:ascii", &self.names)
                    .or_else(|| get_attr(e, b"w:hAnsi", &self.names));
            }
            b"w:sz" => {
                run.font_size = get_attr(e, b"w:val", &self.names)
                    .and_then(|v| v.parse::<f32>().ok())
                    .map(|half_points| half_points / 2.0);
            }
            _ => {}
        }
    }

    fn close(&mut self, raw: &[u8]) {
        let name = self.names.canonical(raw).into_owned();
        let name = name.as_slice();
        self.stack.pop();
        let depth = self.stack.len();

        match name {
            b"w:t" => self.in_text = false,
            b"w:r" if matches!(self.run, Some((d, _)) if d == depth) => {
                if let (Some((_, run)), Some((_, paragraph))) =
                    (self.run.take(), self.paragraph.as_mut())
                {
                    paragraph.add_run(run);
                }
            }
            b"w:p" if matches!(self.paragraph, Some((d, _)) if d == depth) => {
                if let Some((_, paragraph)) = self.paragraph.take() {
                    self.paragraphs.push(paragraph);
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, run)) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}
