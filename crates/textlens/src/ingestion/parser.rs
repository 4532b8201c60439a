//! Multi-format file parser

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::types::FileType;

/// Parsed document with extracted text
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// File type
    pub file_type: FileType,
    /// Extracted text content
    pub content: String,
    /// Content hash
    pub content_hash: String,
}

/// Multi-format file parser
pub struct FileParser;

impl FileParser {
    /// Parse a file based on its extension. Files without an extension are
    /// treated as plain text.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let file_type = FileType::from_extension(extension);

        match file_type {
            FileType::Txt => Self::parse_text(data),
            FileType::Pdf => Self::parse_pdf(filename, data),
            FileType::Docx => Self::parse_docx(filename, data),
            FileType::Epub => Self::parse_epub(filename, data),
            FileType::Html => Self::parse_html(data),
            FileType::Unknown => Err(Error::UnsupportedFileType(extension.to_string())),
        }
    }

    /// Parse plain text, replacing invalid UTF-8 sequences
    fn parse_text(data: &[u8]) -> Result<ParsedDocument> {
        let content = String::from_utf8_lossy(data).to_string();

        Ok(ParsedDocument {
            file_type: FileType::Txt,
            content_hash: hash_content(&content),
            content,
        })
    }

    /// Parse PDF document
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let content = Self::extract_pdf_with_timeout(filename, data)?;

        // Strip NULs and blank lines left behind by the extractor
        let content = content
            .replace('\0', "")
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF",
            ));
        }

        Ok(ParsedDocument {
            file_type: FileType::Pdf,
            content_hash: hash_content(&content),
            content,
        })
    }

    /// Extract PDF text on a worker thread with a timeout, so a PDF with
    /// problematic fonts cannot hang the request
    fn extract_pdf_with_timeout(filename: &str, data: &[u8]) -> Result<String> {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result);
        });

        match rx.recv_timeout(Duration::from_secs(60)) {
            Ok(Ok(text)) => {
                let _ = handle.join();
                Ok(text)
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("pdf-extract failed for '{}': {}, trying fallback", filename, e);
                Self::extract_pdf_text_fallback(filename, data)
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The extraction thread cannot be killed; leave it and fall back
                tracing::error!("PDF extraction timeout after 60s for '{}'", filename);
                Self::extract_pdf_text_fallback(filename, data)
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::error!("PDF extraction thread crashed for '{}'", filename);
                Self::extract_pdf_text_fallback(filename, data)
            }
        }
    }

    /// Fallback PDF text extraction using lopdf directly
    fn extract_pdf_text_fallback(filename: &str, data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let mut pages_text = Vec::new();
        for (page_num, page_id) in doc.get_pages() {
            match doc.get_page_content(page_id) {
                Ok(content) => {
                    let text = Self::extract_text_from_content(&content);
                    if !text.is_empty() {
                        pages_text.push(text);
                    }
                }
                Err(e) => {
                    tracing::debug!("Could not get content for page {}: {}", page_num, e);
                }
            }
        }

        let all_text = pages_text.join("\n");
        if all_text.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(all_text)
    }

    /// Extract text from a PDF content stream: literal strings shown by
    /// Tj/TJ operators inside BT/ET blocks
    fn extract_text_from_content(content: &[u8]) -> String {
        let content_str = String::from_utf8_lossy(content);
        let mut text = String::new();
        let mut in_text_block = false;

        for line in content_str.lines() {
            let line = line.trim();

            if line == "BT" {
                in_text_block = true;
                continue;
            }
            if line == "ET" {
                in_text_block = false;
                if !text.is_empty() {
                    text.push(' ');
                }
                continue;
            }

            if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
                if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                    if start < end {
                        let decoded = line[start + 1..end]
                            .replace("\\n", "\n")
                            .replace("\\r", "\r")
                            .replace("\\t", "\t")
                            .replace("\\(", "(")
                            .replace("\\)", ")")
                            .replace("\\\\", "\\");
                        text.push_str(&decoded);
                    }
                }
            }
        }

        text.trim().to_string()
    }

    /// Parse DOCX document: paragraph run text joined with newlines
    fn parse_docx(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut paragraph = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                paragraph.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(paragraph);
            }
        }

        let content = paragraphs.join("\n");

        Ok(ParsedDocument {
            file_type: FileType::Docx,
            content_hash: hash_content(&content),
            content,
        })
    }

    /// Parse EPUB ebook: spine documents in reading order, text per section
    fn parse_epub(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut documents = Self::epub_spine_documents(&mut archive).unwrap_or_default();
        if documents.is_empty() {
            // Malformed or missing OPF; take every XHTML entry in archive order
            documents = archive
                .file_names()
                .filter(|name| {
                    let lower = name.to_lowercase();
                    lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm")
                })
                .map(|name| name.to_string())
                .collect();
        }

        let mut sections = Vec::new();
        for name in documents {
            if let Ok(mut file) = archive.by_name(&name) {
                let mut html = String::new();
                if file.read_to_string(&mut html).is_ok() {
                    let text = extract_html_text(&html);
                    if !text.is_empty() {
                        sections.push(text);
                    }
                }
            }
        }

        let content = sections.join("\n");
        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from EPUB",
            ));
        }

        Ok(ParsedDocument {
            file_type: FileType::Epub,
            content_hash: hash_content(&content),
            content,
        })
    }

    /// Resolve the EPUB spine to archive paths: container.xml names the OPF,
    /// the OPF manifest maps ids to hrefs, and the spine orders the ids
    fn epub_spine_documents<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> Result<Vec<String>> {
        let container = read_archive_entry(archive, "META-INF/container.xml")?;
        let opf_path = find_opf_path(&container)
            .ok_or_else(|| Error::internal("container.xml has no rootfile"))?;
        let opf = read_archive_entry(archive, &opf_path)?;

        // Hrefs are relative to the OPF's directory
        let opf_dir = match opf_path.rfind('/') {
            Some(pos) => &opf_path[..=pos],
            None => "",
        };

        let (manifest, spine) = parse_opf(&opf);
        Ok(spine
            .iter()
            .filter_map(|idref| manifest.get(idref))
            .map(|href| format!("{}{}", opf_dir, href))
            .collect())
    }

    /// Parse HTML document
    fn parse_html(data: &[u8]) -> Result<ParsedDocument> {
        let html = String::from_utf8_lossy(data);
        let content = extract_html_text(&html);

        Ok(ParsedDocument {
            file_type: FileType::Html,
            content_hash: hash_content(&content),
            content,
        })
    }
}

/// Extract the visible text of an HTML document: trimmed text nodes of the
/// body joined with single spaces
fn extract_html_text(html: &str) -> String {
    let document = scraper::Html::parse_document(html);
    let body_selector = scraper::Selector::parse("body").unwrap();

    let mut content = String::new();
    let mut append = |text: &str| {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !content.is_empty() {
                content.push(' ');
            }
            content.push_str(trimmed);
        }
    };

    match document.select(&body_selector).next() {
        Some(body) => {
            for text in body.text() {
                append(text);
            }
        }
        None => {
            for text in document.root_element().text() {
                append(text);
            }
        }
    }

    content
}

/// Read a named archive entry as UTF-8 text
fn read_archive_entry<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| Error::internal(format!("{}: {}", name, e)))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

/// Find the OPF path in an EPUB container.xml
fn find_opf_path(container_xml: &str) -> Option<String> {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(container_xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"rootfile" {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"full-path" {
                            if let Ok(value) = attr.unescape_value() {
                                return Some(value.into_owned());
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Parse an OPF package document into (manifest id -> href, spine idrefs)
fn parse_opf(opf_xml: &str) -> (HashMap<String, String>, Vec<String>) {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(opf_xml);
    reader.config_mut().trim_text(true);

    let mut manifest = HashMap::new();
    let mut spine = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"item" => {
                    let mut id = None;
                    let mut href = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.local_name().as_ref() {
                            b"id" => id = attr.unescape_value().ok().map(|v| v.into_owned()),
                            b"href" => href = attr.unescape_value().ok().map(|v| v.into_owned()),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(href)) = (id, href) {
                        manifest.insert(id, href);
                    }
                }
                b"itemref" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.local_name().as_ref() == b"idref" {
                            if let Ok(value) = attr.unescape_value() {
                                spine.push(value.into_owned());
                            }
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    (manifest, spine)
}

/// Hash content with SHA-256
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn text_files_pass_through() {
        let parsed = FileParser::parse("novel.txt", "第一章 青云门".as_bytes()).unwrap();
        assert_eq!(parsed.file_type, FileType::Txt);
        assert_eq!(parsed.content, "第一章 青云门");
    }

    #[test]
    fn missing_extension_is_treated_as_text() {
        let parsed = FileParser::parse("upload", b"plain body").unwrap();
        assert_eq!(parsed.file_type, FileType::Txt);
        assert_eq!(parsed.content, "plain body");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FileParser::parse("sheet.xlsx", b"PK").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn html_text_is_space_joined() {
        let html = b"<html><body><h1>Title</h1><p>Hello <b>world</b></p></body></html>";
        let parsed = FileParser::parse("page.html", html).unwrap();
        assert_eq!(parsed.file_type, FileType::Html);
        assert_eq!(parsed.content, "Title Hello world");
    }

    #[test]
    fn epub_spine_order_is_respected() {
        let data = build_epub(&[
            ("two.xhtml", "<html><body><p>second</p></body></html>"),
            ("one.xhtml", "<html><body><p>first</p></body></html>"),
        ]);

        let parsed = FileParser::parse("book.epub", &data).unwrap();
        assert_eq!(parsed.file_type, FileType::Epub);
        // Spine lists one.xhtml before two.xhtml regardless of archive order
        assert_eq!(parsed.content, "first\nsecond");
    }

    #[test]
    fn identical_content_hashes_identically() {
        let a = FileParser::parse("a.txt", b"same words").unwrap();
        let b = FileParser::parse("b.txt", b"same words").unwrap();
        assert_eq!(a.content_hash, b.content_hash);
    }

    /// Build a minimal EPUB archive whose spine is `one.xhtml`, `two.xhtml`
    fn build_epub(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("META-INF/container.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
        )
        .unwrap();

        zip.start_file("OEBPS/content.opf", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <manifest>
    <item id="one" href="one.xhtml" media-type="application/xhtml+xml"/>
    <item id="two" href="two.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="one"/>
    <itemref idref="two"/>
  </spine>
</package>"#,
        )
        .unwrap();

        for (name, body) in entries {
            zip.start_file(format!("OEBPS/{}", name), options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}
