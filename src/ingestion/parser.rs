//! Multi-format text extraction
//!
//! Dispatches on the lower-cased file extension through [`FileType`]. The
//! extension is validated against the supported set before any file content
//! is read, so an unrecognized extension never reaches a format reader.

use std::fs;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::types::FileType;

/// Extracts the plain-text content of a source document
pub struct TextExtractor;

impl TextExtractor {
    /// Extract text from the file at `path`, dispatching on its extension.
    pub fn extract(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let file_type = FileType::from_extension(&extension);
        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(format!(".{extension}")));
        }

        tracing::debug!(
            "Extracting {} as {}",
            path.display(),
            file_type.display_name()
        );

        let filename = path.display().to_string();
        match file_type {
            FileType::Txt | FileType::Markdown => Ok(fs::read_to_string(path)?),
            FileType::Json => Self::pretty_print_json(&fs::read_to_string(path)?),
            FileType::Code(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned()),
            FileType::Pdf => Self::extract_pdf(&filename, &fs::read(path)?),
            FileType::Docx => Self::extract_docx(&filename, &fs::read(path)?),
            FileType::Odt => Self::extract_odt(&filename, &fs::read(path)?),
            FileType::Unknown => Err(Error::UnsupportedFileType(format!(".{extension}"))),
        }
    }

    /// Parse JSON and re-serialize it with 2-space indentation
    fn pretty_print_json(content: &str) -> Result<String> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Extract per-page PDF text, pages joined by newlines in page order
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;
        Ok(pages.join("\n"))
    }

    /// Extract DOCX text: paragraphs, then table rows (cells tab-joined),
    /// then tagged header and footer blocks, newline-separated.
    fn extract_docx(filename: &str, data: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let body_xml = Self::read_zip_entry(&mut archive, "word/document.xml", filename)?;
        let (paragraphs, tables) = Self::parse_docx_body(filename, &body_xml)?;

        let mut blocks = paragraphs;
        for table in tables {
            for row in table {
                blocks.push(row.join("\t"));
            }
        }

        for name in Self::part_names(&archive, "word/header") {
            let xml = Self::read_zip_entry(&mut archive, &name, filename)?;
            if let Some(text) = Self::first_paragraph_text(filename, &xml)? {
                blocks.push(format!("[Header] {text}"));
            }
        }
        for name in Self::part_names(&archive, "word/footer") {
            let xml = Self::read_zip_entry(&mut archive, &name, filename)?;
            if let Some(text) = Self::first_paragraph_text(filename, &xml)? {
                blocks.push(format!("[Footer] {text}"));
            }
        }

        Ok(blocks.join("\n"))
    }

    /// Extract ODT text: one line per paragraph element of content.xml.
    /// Only text directly inside the paragraph element is captured.
    fn extract_odt(filename: &str, data: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let xml = Self::read_zip_entry(&mut archive, "content.xml", filename)?;

        let mut reader = Reader::from_str(&xml);
        let mut lines: Vec<String> = Vec::new();
        // (accumulated direct text, saw any child node) for the open paragraph
        let mut current: Option<(String, bool)> = None;
        let mut depth = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if current.is_some() {
                        depth += 1;
                        if let Some((_, saw_child)) = current.as_mut() {
                            *saw_child = true;
                        }
                    } else if e.local_name().as_ref() == b"p" {
                        current = Some((String::new(), false));
                        depth = 0;
                    }
                }
                Ok(Event::Empty(_)) => {
                    if let Some((_, saw_child)) = current.as_mut() {
                        *saw_child = true;
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some((text, saw_child)) = current.as_mut() {
                        *saw_child = true;
                        if depth == 0 {
                            if let Ok(t) = e.unescape() {
                                text.push_str(&t);
                            }
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    if current.is_some() {
                        if depth == 0 && e.local_name().as_ref() == b"p" {
                            let (text, saw_child) = current.take().unwrap_or_default();
                            if saw_child {
                                lines.push(text);
                            }
                        } else {
                            depth = depth.saturating_sub(1);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::file_parse(filename, e.to_string())),
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }

    /// Parse the DOCX body into top-level paragraphs and tables
    /// (tables as rows of cell texts).
    #[allow(clippy::type_complexity)]
    fn parse_docx_body(
        filename: &str,
        xml: &str,
    ) -> Result<(Vec<String>, Vec<Vec<Vec<String>>>)> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs: Vec<String> = Vec::new();
        let mut tables: Vec<Vec<Vec<String>>> = Vec::new();

        let mut table_depth = 0usize;
        let mut current_paragraph: Option<String> = None;
        let mut current_table: Vec<Vec<String>> = Vec::new();
        let mut current_row: Vec<String> = Vec::new();
        let mut current_cell: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"tbl" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            current_table = Vec::new();
                        }
                    }
                    b"tr" if table_depth == 1 => current_row = Vec::new(),
                    b"tc" if table_depth == 1 => current_cell = Some(String::new()),
                    b"p" if table_depth == 0 => current_paragraph = Some(String::new()),
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"p" && table_depth == 0 {
                        paragraphs.push(String::new());
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_text {
                        if let Ok(text) = e.unescape() {
                            if table_depth == 0 {
                                if let Some(p) = current_paragraph.as_mut() {
                                    p.push_str(&text);
                                }
                            } else if let Some(c) = current_cell.as_mut() {
                                c.push_str(&text);
                            }
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" => {
                        if table_depth == 0 {
                            if let Some(p) = current_paragraph.take() {
                                paragraphs.push(p);
                            }
                        } else if let Some(c) = current_cell.as_mut() {
                            // cell paragraphs are newline-joined
                            c.push('\n');
                        }
                    }
                    b"tc" if table_depth == 1 => {
                        if let Some(mut c) = current_cell.take() {
                            if c.ends_with('\n') {
                                c.pop();
                            }
                            current_row.push(c);
                        }
                    }
                    b"tr" if table_depth == 1 => {
                        current_table.push(std::mem::take(&mut current_row));
                    }
                    b"tbl" => {
                        table_depth = table_depth.saturating_sub(1);
                        if table_depth == 0 {
                            tables.push(std::mem::take(&mut current_table));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::file_parse(filename, e.to_string())),
                _ => {}
            }
        }

        Ok((paragraphs, tables))
    }

    /// Text of the first paragraph of a header/footer part, if any
    fn first_paragraph_text(filename: &str, xml: &str) -> Result<Option<String>> {
        let mut reader = Reader::from_str(xml);
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"p" if current.is_none() => current = Some(String::new()),
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"p" {
                        return Ok(Some(String::new()));
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_text {
                        if let Some(p) = current.as_mut() {
                            if let Ok(text) = e.unescape() {
                                p.push_str(&text);
                            }
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if current.is_some() => return Ok(current),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::file_parse(filename, e.to_string())),
                _ => {}
            }
        }

        Ok(None)
    }

    /// Archive part names with the given prefix, in sorted order
    fn part_names<R: Read + Seek>(archive: &zip::ZipArchive<R>, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with(prefix) && name.ends_with(".xml"))
            .map(|s| s.to_string())
            .collect();
        names.sort();
        names
    }

    fn read_zip_entry<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        name: &str,
        filename: &str,
    ) -> Result<String> {
        let mut entry = archive
            .by_name(name)
            .map_err(|e| Error::file_parse(filename, format!("{name}: {e}")))?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }
}
