//! DOCX package writer.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::detect::DOCUMENT_PART;
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Run};
use crate::parser::{STYLES_PART, WML_NS};

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Style sheet used when the document carries none of its own.
const DEFAULT_STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri" w:eastAsia="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-AU"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/><w:uiPriority w:val="1"/><w:semiHidden/></w:style></w:styles>"#;

/// Write a document as a DOCX package into any seekable writer.
pub fn write_docx<W: Write + Seek>(doc: &Document, writer: W) -> Result<W> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file(DOCUMENT_PART, options)?;
    zip.write_all(&document_xml(doc)?)?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(DOCUMENT_RELS.as_bytes())?;

    zip.start_file(STYLES_PART, options)?;
    zip.write_all(doc.styles.as_deref().unwrap_or(DEFAULT_STYLES).as_bytes())?;

    Ok(zip.finish()?)
}

/// Render a document to DOCX bytes.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    Ok(write_docx(doc, Cursor::new(Vec::new()))?.into_inner())
}

/// Save a document as a DOCX file.
///
/// The package is written to a temporary file next to `path` and renamed
/// into place only once complete, so a failed save never leaves a partial
/// file at `path`.
pub fn save_docx<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write_docx(doc, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::debug!(
        "wrote {} paragraphs to {}",
        doc.paragraph_count(),
        path.display()
    );
    Ok(())
}

/// Serialize the `w:document` part.
fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WML_NS));
    root.push_attribute(("xmlns:r", REL_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for paragraph in &doc.paragraphs {
        write_paragraph(&mut writer, paragraph)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

fn write_paragraph<W: Write>(writer: &mut Writer<W>, paragraph: &Paragraph) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    if paragraph.style.is_some() || paragraph.alignment.is_some() {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        if let Some(ref style) = paragraph.style {
            write_val(writer, "w:pStyle", style)?;
        }
        if let Some(ref alignment) = paragraph.alignment {
            write_val(writer, "w:jc", alignment.as_wml())?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    if paragraph.has_runs() {
        for run in &paragraph.runs {
            write_run(writer, run)?;
        }
    } else if !paragraph.text.is_empty() {
        write_run(writer, &Run::new(paragraph.text.as_str()))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run<W: Write>(writer: &mut Writer<W>, run: &Run) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    if run.has_formatting() {
        // Schema order: rFonts, b, i, sz, u
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if let Some(ref font) = run.font_name {
            let mut fonts = BytesStart::new("w:rFonts");
            fonts.push_attribute(("w:ascii", font.as_str()));
            fonts.push_attribute(("w:hAnsi", font.as_str()));
            fonts.push_attribute(("w:cs", font.as_str()));
            writer.write_event(Event::Empty(fonts))?;
        }
        if let Some(bold) = run.bold {
            write_toggle(writer, "w:b", bold)?;
        }
        if let Some(italic) = run.italic {
            write_toggle(writer, "w:i", italic)?;
        }
        if let Some(size) = run.font_size {
            let half_points = (size * 2.0).round() as u32;
            write_val(writer, "w:sz", &half_points.to_string())?;
        }
        if let Some(underline) = run.underline {
            write_val(writer, "w:u", if underline { "single" } else { "none" })?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    write_run_text(writer, &xml_safe(&run.text))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Emit text as `w:t` segments, with tabs and line breaks as their own
/// elements.
fn write_run_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    let mut segment = String::new();
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => {
                flush_segment(writer, &mut segment)?;
                let name = if c == '\t' { "w:tab" } else { "w:br" };
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            }
            _ => segment.push(c),
        }
    }
    flush_segment(writer, &mut segment)
}

fn flush_segment<W: Write>(writer: &mut Writer<W>, segment: &mut String) -> Result<()> {
    if segment.is_empty() {
        return Ok(());
    }
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(segment.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    segment.clear();
    Ok(())
}

fn write_val<W: Write>(writer: &mut Writer<W>, name: &str, val: &str) -> Result<()> {
    let mut element = BytesStart::new(name);
    element.push_attribute(("w:val", val));
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_toggle<W: Write>(writer: &mut Writer<W>, name: &str, on: bool) -> Result<()> {
    if on {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        Ok(())
    } else {
        write_val(writer, name, "0")
    }
}

/// Drop characters XML 1.0 cannot carry.
fn xml_safe(text: &str) -> std::borrow::Cow<'_, str> {
    let allowed = |c: char| {
        matches!(c, '\t' | '\n' | '\r')
            || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
    };
    if text.chars().all(allowed) {
        std::borrow::Cow::Borrowed(text)
    } else {
        log::warn!("dropping characters not allowed in XML from run text");
        std::borrow::Cow::Owned(text.chars().filter(|c| allowed(*c)).collect())
    }
}
