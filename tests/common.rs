#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use invoice_docgen_server::converter::{expected_pdf_path, ConversionError, DocumentConverter};
use invoice_docgen_server::storage::{Directory, FileStore};
use invoice_docgen_server::AppState;
use serde_json::json;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const DOCX_MIMETYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

pub fn document_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", text)
}

fn cell(text: &str) -> String {
    format!("<w:tc>{}</w:tc>", paragraph(text))
}

/// Body of the invoice template used across tests.
pub fn invoice_body() -> String {
    let header_row = format!(
        "<w:tr>{}{}{}{}{}</w:tr>",
        cell("No"),
        cell("Item"),
        cell("Qty"),
        cell("Price"),
        cell("Amount")
    );
    let product_row = format!(
        "<w:tr>{}{}{}{}{}</w:tr>",
        cell("{{ product.number }}"),
        cell("{{ product.name }}"),
        cell("{{ product.quantity }}"),
        cell("{{ product.price }}"),
        cell("{{ product.total }}")
    );

    [
        paragraph("{{ title }}"),
        paragraph("Date: {{ date }}"),
        paragraph("Bill to: {{ address }}"),
        paragraph("{{ description }}"),
        format!("<w:tbl>{}{}</w:tbl>", header_row, product_row),
        paragraph("Total: {{ total }}"),
    ]
    .concat()
}

/// Build a `.docx` archive from `(name, content)` parts.
pub fn docx_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal `.docx` with the given body.
pub fn docx(body: &str) -> Vec<u8> {
    let document = document_xml(body);
    docx_with_parts(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", &document),
    ])
}

pub fn read_part(archive: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

pub fn new_store() -> (TempDir, FileStore) {
    let root = tempfile::tempdir().unwrap();
    let store = FileStore::new(root.path());
    store.ensure_dirs().unwrap();
    (root, store)
}

pub fn seed_template(store: &FileStore, name: &str, bytes: &[u8]) -> PathBuf {
    let path = store.dir(Directory::Templates).join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn sample_invoice(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "date": "2024-06-30",
        "title": "June Services",
        "description": "Maintenance & support",
        "address": "Jl. Kenanga 12",
        "total": 187.5,
        "products": [
            {"id": "p-1", "name": "Support hours", "quantity": 3, "price": 50.0},
            {"id": "p-2", "name": "Spare cable", "quantity": 5, "price": 7.5}
        ]
    })
}

/// Writes a small fake PDF where the real converter would.
pub struct StubConverter;

#[async_trait]
impl DocumentConverter for StubConverter {
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        let target = expected_pdf_path(source, output_dir)?;
        tokio::fs::write(&target, b"%PDF-1.4\n%stub\n").await.unwrap();
        Ok(target)
    }
}

/// Behaves like a converter that exits without writing anything.
pub struct NoOutputConverter;

#[async_trait]
impl DocumentConverter for NoOutputConverter {
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        Err(ConversionError::MissingOutput(expected_pdf_path(source, output_dir)?))
    }
}

pub fn app_state(
    store: &FileStore,
    converter: Arc<dyn DocumentConverter + Send + Sync>,
) -> web::Data<AppState> {
    web::Data::new(AppState::new(store.clone(), converter))
}
