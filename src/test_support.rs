//! 测试辅助：在内存中拼装最小可用的 `.xlsx` 文件

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

const EMPTY_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

fn workbook_xml(sheets: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets}</sheets></workbook>"#
    )
}

pub struct XlsxCell {
    reference: String,
    xml: String,
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl XlsxCell {
    pub fn text(reference: &str, value: &str) -> Self {
        Self {
            reference: reference.to_string(),
            xml: format!(
                r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                escape(value)
            ),
        }
    }

    pub fn number(reference: &str, value: &str) -> Self {
        Self {
            reference: reference.to_string(),
            xml: format!(r#"<c r="{reference}"><v>{value}</v></c>"#),
        }
    }
}

fn row_number(reference: &str) -> &str {
    reference.trim_start_matches(|c: char| c.is_ascii_alphabetic())
}

fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// 单工作表，每个内层 Vec 为一行（行号取自单元格引用）
pub fn build_xlsx_cells(rows: &[Vec<XlsxCell>]) -> Vec<u8> {
    let mut sheet_data = String::new();
    for (index, row) in rows.iter().enumerate() {
        let r = row
            .first()
            .map(|c| row_number(&c.reference).to_string())
            .unwrap_or_else(|| (index + 1).to_string());
        sheet_data.push_str(&format!(r#"<row r="{r}">"#));
        for cell in row {
            sheet_data.push_str(&cell.xml);
        }
        sheet_data.push_str("</row>");
    }
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
    );
    let workbook = workbook_xml(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#);
    zip_parts(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

/// 全部为文本单元格，空字符串表示该单元格不存在
pub fn build_xlsx(rows: &[&[&str]]) -> Vec<u8> {
    let rows: Vec<Vec<XlsxCell>> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| !value.is_empty())
                .map(|(c, value)| {
                    let col = (b'A' + c as u8) as char;
                    XlsxCell::text(&format!("{col}{}", r + 1), value)
                })
                .collect()
        })
        .collect();
    build_xlsx_cells(&rows)
}

pub fn build_xlsx_without_sheets() -> Vec<u8> {
    let workbook = workbook_xml("");
    zip_parts(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", EMPTY_WORKBOOK_RELS),
    ])
}
