//! Report rendering against a `.docx` template.
//!
//! The template is an ordinary OPC package; every part is copied through
//! unchanged except `word/document.xml`, which is rewritten in place. The
//! template language is deliberately small:
//!
//! - `{{Excel.Field}}` and `{{Control.A1}}` are scalar tokens replaced with
//!   payload values anywhere in the document.
//! - A table row (`<w:tr>` element) containing `{{Item.Field}}` or
//!   `{{Author.Field}}` tokens is a row template: it is repeated once per
//!   record with the tokens substituted, and removed when the collection is
//!   empty. A row binds to exactly one collection; `{{Item.*}}` takes
//!   precedence, and tokens of the other family stay untouched in the
//!   expanded rows.
//! - Unknown tokens are left intact so template mistakes stay visible in the
//!   output.

use crate::container::{ContainerError, OpcContainer};
use crate::render::RenderPayload;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("template container error: {0}")]
    Container(#[from] ContainerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip write error: {0}")]
    Zip(String),
    #[error("template has no {DOCUMENT_PART} part")]
    DocumentPartMissing,
    #[error("{DOCUMENT_PART} is not valid UTF-8")]
    DocumentNotUtf8,
}

impl From<zip::result::ZipError> for RenderError {
    fn from(err: zip::result::ZipError) -> RenderError {
        RenderError::Zip(err.to_string())
    }
}

/// Render `template` with `payload` and write the result to `output`.
pub fn render_document(
    template: &Path,
    output: &Path,
    payload: &RenderPayload,
) -> Result<(), RenderError> {
    let mut container = OpcContainer::open_from_path(template)?;
    let entries = container.read_all_entries()?;

    if !entries.iter().any(|(name, _)| name == DOCUMENT_PART) {
        return Err(RenderError::DocumentPartMissing);
    }

    let mut writer = ZipWriter::new(BufWriter::new(File::create(output)?));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(&name, options)?;
        if name == DOCUMENT_PART {
            let document =
                String::from_utf8(bytes).map_err(|_| RenderError::DocumentNotUtf8)?;
            writer.write_all(render_document_xml(&document, payload).as_bytes())?;
        } else {
            writer.write_all(&bytes)?;
        }
    }

    writer.finish()?.flush()?;
    Ok(())
}

/// Apply the payload to the document XML: row templates first (their cells
/// contain scalar-looking tokens of their own), then document-wide scalars.
fn render_document_xml(document: &str, payload: &RenderPayload) -> String {
    let mut out = expand_row_templates(document, payload);

    for (address, value) in &payload.control {
        out = out.replace(&format!("{{{{Control.{address}}}}}"), &xml_escape(value));
    }
    out = out.replace("{{Excel.FileName}}", &xml_escape(&payload.excel.file_name));
    out = out.replace("{{Excel.Checksum}}", &xml_escape(&payload.excel.checksum));
    out = out.replace("{{Excel.FileSize}}", &xml_escape(&payload.excel.file_size));
    out = out.replace("{{Excel.CreatedAt}}", &xml_escape(&payload.excel.created_at));
    out
}

/// Find each `<w:tr>` element carrying collection tokens and expand it.
/// Rows bind to one collection only (Items wins over Authors).
fn expand_row_templates(document: &str, payload: &RenderPayload) -> String {
    let mut out = String::with_capacity(document.len());
    let mut rest = document;

    while let Some((before, row, after)) = next_table_row(rest) {
        out.push_str(before);
        if row.contains("{{Item.") {
            for item in &payload.items {
                out.push_str(
                    &row.replace("{{Item.FileName}}", &xml_escape(&item.file_name))
                        .replace("{{Item.Checksum}}", &xml_escape(&item.checksum))
                        .replace("{{Item.FileSize}}", &xml_escape(&item.file_size))
                        .replace("{{Item.CreatedAt}}", &xml_escape(&item.created_at)),
                );
            }
        } else if row.contains("{{Author.") {
            for author in &payload.authors {
                out.push_str(
                    &row.replace("{{Author.Title}}", &xml_escape(&author.title))
                        .replace("{{Author.Name}}", &xml_escape(&author.name)),
                );
            }
        } else {
            out.push_str(row);
        }
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Split off the next complete `<w:tr ...>...</w:tr>` element.
/// Word never nests table rows directly, so a plain end-tag scan suffices.
fn next_table_row(document: &str) -> Option<(&str, &str, &str)> {
    const END: &str = "</w:tr>";
    let start = find_row_start(document)?;
    let end_rel = document[start..].find(END)?;
    let end = start + end_rel + END.len();
    Some((&document[..start], &document[start..end], &document[end..]))
}

/// Offset of the next `<w:tr>` or `<w:tr ...>` open tag.
fn find_row_start(document: &str) -> Option<usize> {
    let mut search_from = 0;
    loop {
        let candidate = search_from + document[search_from..].find("<w:tr")?;
        match document.as_bytes().get(candidate + 5) {
            Some(b'>') | Some(b' ') | Some(b'/') => return Some(candidate),
            // <w:trPr> and friends share the prefix.
            _ => search_from = candidate + 5,
        }
    }
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{AuthorEntry, CheckedFile};
    use std::collections::BTreeMap;

    fn payload() -> RenderPayload {
        RenderPayload {
            items: vec![
                CheckedFile {
                    file_name: "a.bin".to_string(),
                    checksum: "CBF43926".to_string(),
                    file_size: "9".to_string(),
                    created_at: "2024.05.06_12:00".to_string(),
                },
                CheckedFile {
                    file_name: "b.bin".to_string(),
                    checksum: "1".to_string(),
                    file_size: "2".to_string(),
                    created_at: "2024.05.06_12:01".to_string(),
                },
            ],
            excel: CheckedFile {
                file_name: "data.xlsx".to_string(),
                checksum: "0".to_string(),
                file_size: "100".to_string(),
                created_at: "2024.05.06_12:02".to_string(),
            },
            control: BTreeMap::from([("B3".to_string(), "ИУЛ-42 & Co".to_string())]),
            authors: vec![AuthorEntry {
                title: "Разраб.".to_string(),
                name: "Иванов".to_string(),
            }],
        }
    }

    #[test]
    fn scalar_tokens_replaced_everywhere() {
        let doc = "<w:p>{{Excel.FileName}} {{Control.B3}}</w:p>";
        let out = render_document_xml(doc, &payload());
        assert_eq!(out, "<w:p>data.xlsx ИУЛ-42 &amp; Co</w:p>");
    }

    #[test]
    fn item_row_repeats_per_record() {
        let doc = "<w:tbl><w:tr><w:tc>{{Item.FileName}}</w:tc><w:tc>{{Item.Checksum}}</w:tc></w:tr></w:tbl>";
        let out = render_document_xml(doc, &payload());
        assert_eq!(
            out,
            "<w:tbl><w:tr><w:tc>a.bin</w:tc><w:tc>CBF43926</w:tc></w:tr>\
             <w:tr><w:tc>b.bin</w:tc><w:tc>1</w:tc></w:tr></w:tbl>"
        );
    }

    #[test]
    fn author_row_removed_when_collection_empty() {
        let mut p = payload();
        p.authors.clear();
        let doc = "<w:tbl><w:tr><w:tc>{{Author.Name}}</w:tc></w:tr></w:tbl>";
        assert_eq!(render_document_xml(doc, &p), "<w:tbl></w:tbl>");
    }

    #[test]
    fn plain_rows_pass_through() {
        let doc = "<w:tbl><w:tr w:rsidR=\"0\"><w:trPr/><w:tc>static</w:tc></w:tr></w:tbl>";
        assert_eq!(render_document_xml(doc, &payload()), doc);
    }

    #[test]
    fn unknown_tokens_left_intact() {
        let doc = "<w:p>{{Excel.NoSuchField}}</w:p>";
        assert_eq!(render_document_xml(doc, &payload()), doc);
    }

    #[test]
    fn present_but_empty_control_cell_renders_blank() {
        let mut p = payload();
        p.control.insert("B1".to_string(), String::new());
        let doc = "<w:p>[{{Control.B1}}]</w:p>";
        assert_eq!(render_document_xml(doc, &p), "<w:p>[]</w:p>");
    }

    #[test]
    fn mixed_family_rows_bind_to_items_only() {
        let doc = "<w:tbl><w:tr><w:tc>{{Item.FileName}}</w:tc><w:tc>{{Author.Name}}</w:tc></w:tr></w:tbl>";
        let out = render_document_xml(doc, &payload());
        // One row per item; the Author tokens stay visible as template
        // mistakes rather than borrowing values from the other collection.
        assert_eq!(
            out,
            "<w:tbl><w:tr><w:tc>a.bin</w:tc><w:tc>{{Author.Name}}</w:tc></w:tr>\
             <w:tr><w:tc>b.bin</w:tc><w:tc>{{Author.Name}}</w:tc></w:tr></w:tbl>"
        );
    }

    #[test]
    fn tr_prefix_tags_not_mistaken_for_rows() {
        let doc = "<w:trPr><w:trHeight/></w:trPr>";
        assert!(next_table_row(doc).is_none());
    }
}
