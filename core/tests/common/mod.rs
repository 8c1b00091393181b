//! Fixture builders shared by the integration tests: minimal but valid
//! `.xlsx` workbooks and `.docx` templates written with the zip crate.

// Each test binary uses its own slice of these helpers.
#![allow(dead_code)]

use iul_core::address_to_index;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One sheet: a name plus `(address, text)` cell pairs.
pub struct SheetFixture<'a> {
    pub name: &'a str,
    pub cells: Vec<(&'a str, &'a str)>,
}

/// Write a workbook with inline-string cells. Sheets keep their given order.
pub fn write_workbook(path: &Path, sheets: &[SheetFixture<'_>]) {
    let mut zip = ZipWriter::new(File::create(path).expect("create workbook"));
    let options = SimpleFileOptions::default();

    let mut content_types = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
    );
    for index in 0..sheets.len() {
        content_types.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
            index + 1
        ));
    }
    content_types.push_str("</Types>");
    write_entry(&mut zip, "[Content_Types].xml", &content_types, options);

    write_entry(
        &mut zip,
        "_rels/.rels",
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
         </Relationships>",
        options,
    );

    let mut workbook_xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><sheets>",
    );
    let mut rels_xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    );
    for (index, sheet) in sheets.iter().enumerate() {
        let n = index + 1;
        workbook_xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{n}\" r:id=\"rId{n}\"/>",
            sheet.name
        ));
        rels_xml.push_str(&format!(
            "<Relationship Id=\"rId{n}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{n}.xml\"/>"
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    rels_xml.push_str("</Relationships>");
    write_entry(&mut zip, "xl/workbook.xml", &workbook_xml, options);
    write_entry(&mut zip, "xl/_rels/workbook.xml.rels", &rels_xml, options);

    for (index, sheet) in sheets.iter().enumerate() {
        write_entry(
            &mut zip,
            &format!("xl/worksheets/sheet{}.xml", index + 1),
            &sheet_xml(&sheet.cells),
            options,
        );
    }

    zip.finish().expect("finish workbook");
}

fn sheet_xml(cells: &[(&str, &str)]) -> String {
    // Group by row, cells in column order, rows ascending.
    let mut rows: BTreeMap<usize, BTreeMap<usize, (&str, &str)>> = BTreeMap::new();
    for (address, text) in cells {
        let (row, col) = address_to_index(address).expect("valid fixture address");
        rows.entry(row).or_default().insert(col, (address, text));
    }

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\"><sheetData>",
    );
    for (row, cols) in rows {
        xml.push_str(&format!("<row r=\"{}\">", row + 1));
        for (address, text) in cols.values() {
            xml.push_str(&format!(
                "<c r=\"{address}\" t=\"inlineStr\"><is><t>{text}</t></is></c>"
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write a template document with the given `word/document.xml` body.
pub fn write_docx(path: &Path, document_xml: &str) {
    let mut zip = ZipWriter::new(File::create(path).expect("create docx"));
    let options = SimpleFileOptions::default();

    write_entry(
        &mut zip,
        "[Content_Types].xml",
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
         </Types>",
        options,
    );
    write_entry(
        &mut zip,
        "_rels/.rels",
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
         </Relationships>",
        options,
    );
    write_entry(&mut zip, "word/document.xml", document_xml, options);

    zip.finish().expect("finish docx");
}

fn write_entry(zip: &mut ZipWriter<File>, name: &str, content: &str, options: SimpleFileOptions) {
    zip.start_file(name, options).expect("start entry");
    zip.write_all(content.as_bytes()).expect("write entry");
}

/// Read one entry out of a finished package.
pub fn read_zip_entry(path: &Path, name: &str) -> Vec<u8> {
    let file = File::open(path).expect("open package");
    let mut archive = zip::ZipArchive::new(file).expect("read package");
    let mut entry = archive.by_name(name).expect("entry present");
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut entry, &mut bytes).expect("read entry");
    bytes
}
