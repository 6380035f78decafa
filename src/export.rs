//! # Workbook Export
//!
//! Writes the realigned table back out as a minimal single-sheet xlsx
//! workbook: a ZIP container holding the OOXML parts, with the worksheet
//! using inline strings so no shared-string table is needed. The first row
//! carries the original header labels, the second the synthetic normalized
//! field names, and the data rows follow beneath.

use crate::error::ScheduleError;
use crate::sheet::cell_position;
use crate::table::{ScheduleTable, Value};
use quick_xml::escape::escape;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

const CONTENT_TYPES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>",
    "<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>",
    "<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
    "</Types>",
);

const ROOT_RELATIONSHIPS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>",
    "</Relationships>",
);

const WORKBOOK_RELATIONSHIPS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    "</Relationships>",
);

const STYLES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
    "<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
    "<fonts count=\"1\"><font><sz val=\"11\"/><name val=\"Calibri\"/></font></fonts>",
    "<fills count=\"1\"><fill><patternFill patternType=\"none\"/></fill></fills>",
    "<borders count=\"1\"><border/></borders>",
    "<cellStyleXfs count=\"1\"><xf/></cellStyleXfs>",
    "<cellXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellXfs>",
    "</styleSheet>",
);

/// Writes the export workbook: one worksheet named `sheet_name` holding the
/// realigned table with its column labels as the first row.
pub fn write_workbook<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    table: &ScheduleTable,
) -> Result<(), ScheduleError> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELATIONSHIPS.as_bytes())?;
    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml(sheet_name).as_bytes())?;
    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELATIONSHIPS.as_bytes())?;
    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(STYLES.as_bytes())?;
    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(worksheet_xml(table).as_bytes())?;

    let mut inner = zip.finish()?;
    inner.flush()?;
    Ok(())
}

fn workbook_xml(sheet_name: &str) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        "<workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\"",
        " xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">",
        "<sheets>",
    ));
    xml.push_str(&format!(
        "<sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/>",
        escape(sheet_name)
    ));
    xml.push_str("</sheets></workbook>");
    xml
}

fn worksheet_xml(table: &ScheduleTable) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str("<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">");
    xml.push_str("<sheetData>");

    let labels: Vec<Value> = table
        .columns()
        .iter()
        .map(|name| Value::Text(name.to_owned()))
        .collect();
    push_row(&mut xml, 0, &labels);
    for (index, row) in table.rows().enumerate() {
        push_row(&mut xml, index + 1, row);
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Appends one `<row>`; empty, missing, and NaN cells are omitted entirely.
fn push_row(xml: &mut String, row: usize, cells: &[Value]) {
    xml.push_str(&format!("<row r=\"{}\">", row + 1));
    for (column, value) in cells.iter().enumerate() {
        let reference = cell_position(row, column);
        match value {
            Value::Missing => (),
            Value::Text(text) if text.is_empty() => (),
            Value::Float(number) if number.is_nan() => (),
            Value::Int(number) => {
                xml.push_str(&format!("<c r=\"{reference}\"><v>{number}</v></c>"));
            }
            Value::Float(number) => {
                xml.push_str(&format!("<c r=\"{reference}\"><v>{number}</v></c>"));
            }
            Value::Text(text) => {
                xml.push_str(&format!(
                    "<c r=\"{reference}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                    escape(text.as_str())
                ));
            }
        }
    }
    xml.push_str("</row>");
}
