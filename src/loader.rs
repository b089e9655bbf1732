//! Document loading: turns a .docx or .pdf file into trimmed, non-empty lines.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info};

use crate::error::{ResumeError, Result};

/// Part of a docx package holding the main document body.
const DOCX_BODY_PART: &str = "word/document.xml";

/// Supported input formats, chosen by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Dispatch on the path's extension. Does not touch the filesystem.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("docx") => Ok(Self::Docx),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(ResumeError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load `path` as an ordered sequence of trimmed, non-empty lines.
pub fn load(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ResumeError::FileNotFound(path.to_path_buf()));
    }

    let kind = DocumentKind::from_path(path)?;
    let lines = match kind {
        DocumentKind::Docx => read_docx(path)?,
        DocumentKind::Pdf => read_pdf(path)?,
    };

    info!(path = %path.display(), ?kind, lines = lines.len(), "Loaded document");
    Ok(lines)
}

/// Read paragraph text from a .docx package.
pub fn read_docx(path: &Path) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;

    let paragraphs = docx_paragraphs(&xml)?;
    Ok(paragraphs
        .iter()
        .map(|para| para.trim())
        .filter(|para| !para.is_empty())
        .map(str::to_string)
        .collect())
}

/// Read page text from a PDF, one line per non-blank text line, pages in order.
pub fn read_pdf(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)?;
    debug!(pages = pages.len(), "Extracted PDF pages");

    Ok(pages.iter().flat_map(|page| lines_from_text(page)).collect())
}

/// Split text on newlines, trim each piece and drop the blank ones.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Elements whose whole subtree is left out of the body text: tables,
/// text boxes and the duplicate `mc:Fallback` rendering of drawings.
const SKIPPED_SUBTREES: [&[u8]; 3] = [b"tbl", b"txbxContent", b"Fallback"];

/// Collect the raw text of every body-level `w:p` element of a
/// WordprocessingML document.
///
/// Text comes from `w:t` runs, including runs nested inside hyperlinks.
/// Inside a run, `w:tab` becomes a tab and `w:br`/`w:cr` a newline. Table
/// cells and text boxes are not read. Paragraphs are returned untrimmed and
/// may be blank.
pub fn docx_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut para_depth = 0usize;
    let mut skip_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e)
                if SKIPPED_SUBTREES
                    .iter()
                    .any(|name| *name == e.local_name().as_ref()) =>
            {
                skip_depth = 1;
            }
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    if para_depth == 0 {
                        current.clear();
                    }
                    para_depth += 1;
                }
                b"r" => in_run = true,
                b"t" => in_text = in_run,
                _ => {}
            },
            Event::Empty(e) if in_run && para_depth > 0 => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"p" && para_depth == 0 => {
                paragraphs.push(String::new());
            }
            Event::Text(t) if in_text && para_depth > 0 => {
                let text = t
                    .unescape()
                    .map_err(|err| ResumeError::Docx(err.to_string()))?;
                current.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    para_depth = para_depth.saturating_sub(1);
                    if para_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    fn write_docx(path: &Path, body: &str) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file(DOCX_BODY_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml(body).as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn from_path_dispatches_on_suffix() {
        assert_eq!(
            DocumentKind::from_path(Path::new("cv.docx")).unwrap(),
            DocumentKind::Docx
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("CV.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert!(matches!(
            DocumentKind::from_path(Path::new("cv.txt")),
            Err(ResumeError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentKind::from_path(Path::new("resume")),
            Err(ResumeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_reported_before_format() {
        let err = load(&PathBuf::from("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ResumeError::FileNotFound(_)));
    }

    #[test]
    fn existing_file_with_unsupported_suffix_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        fs::write(&path, "EDUCATION\n").unwrap();
        assert!(matches!(
            load(&path),
            Err(ResumeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn lines_from_text_trims_and_drops_blanks() {
        let lines = lines_from_text("  EDUCATION \n\n   \n\tMIT – Cambridge, MA\r\n");
        assert_eq!(lines, ["EDUCATION", "MIT – Cambridge, MA"]);
    }

    #[test]
    fn paragraphs_join_runs_and_hyperlinks() {
        let xml = document_xml(concat!(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>"#,
            r#"<w:r><w:t>• Languages:</w:t></w:r><w:r><w:t xml:space="preserve"> Python, </w:t></w:r>"#,
            r#"<w:hyperlink><w:r><w:t>Rust</w:t></w:r></w:hyperlink></w:p>"#,
            r#"<w:p/>"#,
            r#"<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t></w:r></w:p>"#,
        ));
        let paragraphs = docx_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, ["• Languages: Python, Rust", "", "A\tB"]);
    }

    #[test]
    fn paragraphs_unescape_entities() {
        let xml = document_xml(&para("R&amp;D Intern"));
        assert_eq!(docx_paragraphs(&xml).unwrap(), ["R&D Intern"]);
    }

    #[test]
    fn paragraphs_inside_tables_are_not_read() {
        let xml = document_xml(&format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para("EDUCATION"),
            para("Boston University – Boston, MA"),
            para("Master of Science")
        ));
        assert_eq!(
            docx_paragraphs(&xml).unwrap(),
            ["EDUCATION", "Master of Science"]
        );
    }

    #[test]
    fn text_box_content_stays_out_of_the_host_paragraph() {
        let text_box = format!(
            r#"<w:txbxContent>{}</w:txbxContent>"#,
            para("EDUCATION")
        );
        let xml = document_xml(&format!(
            concat!(
                r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r>"#,
                r#"<w:r><mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#,
                r#"<mc:Choice Requires="wps"><w:drawing><wps:txbx>{tb}</wps:txbx></w:drawing></mc:Choice>"#,
                r#"<mc:Fallback><w:pict><v:textbox>{tb}</v:textbox></w:pict></mc:Fallback>"#,
                r#"</mc:AlternateContent></w:r>"#,
                r#"<w:r><w:t xml:space="preserve"> Contact</w:t></w:r></w:p>"#,
                "{after}"
            ),
            tb = text_box,
            after = para("PROJECTS"),
        ));
        assert_eq!(
            docx_paragraphs(&xml).unwrap(),
            ["Jane Doe Contact", "PROJECTS"]
        );
    }

    #[test]
    fn read_docx_keeps_non_blank_trimmed_paragraphs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let body = [para("  PROJECTS  "), para("   "), para("1. Alpha System")].concat();
        write_docx(&path, &body);

        let lines = load(&path).unwrap();
        assert_eq!(lines, ["PROJECTS", "1. Alpha System"]);
    }

    #[test]
    fn docx_without_body_part_is_a_docx_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        assert!(matches!(load(&path), Err(ResumeError::Docx(_))));
    }

    #[test]
    fn non_zip_docx_is_a_docx_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.docx");
        fs::write(&path, "not a zip archive").unwrap();
        assert!(matches!(load(&path), Err(ResumeError::Docx(_))));
    }

    #[test]
    fn invalid_pdf_is_a_pdf_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        fs::write(&path, "not a pdf").unwrap();
        assert!(matches!(load(&path), Err(ResumeError::Pdf(_))));
    }

    /// Build a single-page PDF with one text line, the way pdf-extract expects it.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Parent", pages_id);
        }
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn read_pdf_yields_trimmed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        fs::write(&path, make_test_pdf("CERTIFICATIONS")).unwrap();

        let lines = load(&path).unwrap();
        assert!(!lines.is_empty(), "expected at least one line");
        assert!(lines.iter().all(|l| !l.is_empty() && l.trim() == l));
        let joined = lines.concat().replace(' ', "");
        assert!(
            joined.contains("CERTIFICATIONS"),
            "unexpected lines: {lines:?}"
        );
    }
}
