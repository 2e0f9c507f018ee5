//! End-to-end tests for cleaning DOCX files.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use lexclean::{
    clean_file, clean_file_with_options, extract_text, load_docx, Alignment, CleanOptions, Error,
};
use zip::write::{SimpleFileOptions, ZipWriter};

const W: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

const BODY: &str = concat!(
    // Separator rule
    r#"<w:p><w:r><w:t>______________________</w:t></w:r></w:p>"#,
    // Spacer
    r#"<w:p/>"#,
    // Numbered subsection with mixed formatting
    r#"<w:p><w:pPr><w:pStyle w:val="Subsection"/><w:jc w:val="both"/></w:pPr>"#,
    r#"<w:r><w:t xml:space="preserve">  (1)  </w:t></w:r>"#,
    r#"<w:r><w:rPr><w:b/><w:i/></w:rPr><w:t>Duties</w:t></w:r>"#,
    r#"<w:r><w:t xml:space="preserve"> apply.  </w:t></w:r></w:p>"#,
    // Compilation stamp split across runs
    r#"<w:p><w:r><w:t xml:space="preserve">Compilation No. 5 </w:t></w:r>"#,
    r#"<w:r><w:t>Compilation date: 03/04/2021</w:t></w:r></w:p>"#,
    // Table content is not body text
    r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
    // Plain clause in a named font
    r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/>"#,
    r#"<w:u w:val="single"/><w:sz w:val="24"/></w:rPr><w:t>Final clause   text.</w:t></w:r></w:p>"#,
    // Running footer with page number
    r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r>"#,
    r#"<w:t>Anti-Money Laundering and Counter-Terrorism Financing Act 2006 12</w:t></w:r></w:p>"#,
    r#"<w:sectPr/>"#,
);

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Subsection"><w:name w:val="subsection"/></w:style></w:styles>"#;

/// Build a DOCX package the way a word processor lays it out.
fn fixture_package() -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {}><w:body>{}</w:body></w:document>"#,
        W, BODY
    );

    let options = SimpleFileOptions::default();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.start_file("word/styles.xml", options).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("ASIC2.docx");
    std::fs::write(&path, fixture_package()).unwrap();
    path
}

#[test]
fn test_clean_file_drops_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("asic2cleaned.docx");

    let stats = clean_file(&input, &output).unwrap();
    assert_eq!(stats.input_paragraphs, 6);
    assert_eq!(stats.artifacts, 4);
    assert_eq!(stats.kept, 2);

    let cleaned = load_docx(&output).unwrap();
    let texts: Vec<&str> = cleaned.paragraphs.iter().map(|p| p.text.as_str()).collect();
    // Run text is carried raw; only run-less paragraphs are normalized
    assert_eq!(texts, vec!["  (1)  Duties apply.  ", "Final clause   text."]);
}

#[test]
fn test_clean_file_transfers_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out.docx");
    clean_file(&input, &output).unwrap();

    let cleaned = load_docx(&output).unwrap();

    let subsection = &cleaned.paragraphs[0];
    assert_eq!(subsection.style.as_deref(), Some("Subsection"));
    assert_eq!(subsection.alignment, Some(Alignment::Justify));
    assert_eq!(subsection.runs.len(), 3);
    assert_eq!(subsection.runs[1].text, "Duties");
    assert_eq!(subsection.runs[1].bold, Some(true));
    assert_eq!(subsection.runs[1].italic, Some(true));
    assert_eq!(subsection.runs[0].bold, None);

    let clause = &cleaned.paragraphs[1];
    assert_eq!(clause.alignment, None);
    assert_eq!(clause.runs[0].font_name.as_deref(), Some("Times New Roman"));
    assert_eq!(clause.runs[0].font_size, Some(12.0));
    assert_eq!(clause.runs[0].underline, Some(true));
}

#[test]
fn test_clean_file_keeps_source_styles() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    let kept = dir.path().join("kept.docx");
    clean_file(&input, &kept).unwrap();
    let styles = load_docx(&kept).unwrap().styles.unwrap();
    assert!(styles.contains(r#"w:styleId="Subsection""#));

    let dropped = dir.path().join("dropped.docx");
    clean_file_with_options(&input, &dropped, CleanOptions::new().with_styles(false)).unwrap();
    let styles = load_docx(&dropped).unwrap().styles.unwrap();
    assert!(!styles.contains("Subsection"));
}

#[test]
fn test_extra_pattern_drops_matching_paragraphs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("out.docx");

    let options = CleanOptions::new().with_artifact_pattern(r"^Final clause");
    let stats = clean_file_with_options(&input, &output, options).unwrap();
    assert_eq!(stats.kept, 1);

    let cleaned = load_docx(&output).unwrap();
    assert_eq!(cleaned.paragraph_count(), 1);
}

#[test]
fn test_cleaning_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let once = dir.path().join("once.docx");
    let twice = dir.path().join("twice.docx");

    clean_file(&input, &once).unwrap();
    let stats = clean_file(&once, &twice).unwrap();
    assert_eq!(stats.removed(), 0);
    assert_eq!(load_docx(&once).unwrap(), load_docx(&twice).unwrap());
}

#[test]
fn test_missing_input_reports_cause() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.docx");

    let err = clean_file(dir.path().join("ASIC2.docx"), &output).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("ASIC2.docx"));
    assert!(!output.exists());
}

#[test]
fn test_invalid_input_leaves_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.docx");
    std::fs::write(&input, "just some text").unwrap();
    let output = dir.path().join("out.docx");
    std::fs::write(&output, "previous").unwrap();

    let err = clean_file(&input, &output).unwrap_err();
    assert!(matches!(err, Error::Package(_)));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn test_unwritable_output_leaves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());
    let output = dir.path().join("no_such_dir").join("out.docx");

    assert!(clean_file(&input, &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_extract_text_is_uncleaned() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path());

    let text = extract_text(&input).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "______________________");
    assert_eq!(lines[1], "");
    assert!(!text.contains("cell"));
}
