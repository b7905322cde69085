//! `.docx` rendering engine.
//!
//! A `.docx` file is a zip archive. The engine copies every entry into a new
//! archive, rendering the main document body, headers and footers on the way.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::template::render_part;
use super::GeneratorError;
use crate::invoice::context::RenderContext;

/// Main document body inside the archive.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on buffer pre-allocation; declared entry sizes are untrusted.
const MAX_PREALLOC: u64 = 1 << 20;

/// Stateless engine for rendering `.docx` templates.
pub struct DocxRenderEngine;

impl DocxRenderEngine {
    /// Render a template archive into a filled archive.
    pub fn render(template: &[u8], context: &RenderContext) -> Result<Vec<u8>, GeneratorError> {
        let mut archive = ZipArchive::new(Cursor::new(template))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(template.len())));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut has_body = false;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();

            if entry.is_dir() {
                writer.add_directory(name, options)?;
                continue;
            }

            let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
            entry.read_to_end(&mut bytes)?;

            if is_templated_part(&name) {
                has_body |= name == DOCUMENT_PART;
                let xml = String::from_utf8(bytes).map_err(|_| GeneratorError::NotUtf8(name.clone()))?;
                bytes = render_part(&xml, context)?.into_bytes();
            }

            writer.start_file(name, options)?;
            writer.write_all(&bytes)?;
        }

        if !has_body {
            return Err(GeneratorError::MissingPart(DOCUMENT_PART));
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Parts that may carry placeholders.
pub fn is_templated_part(name: &str) -> bool {
    if name == DOCUMENT_PART {
        return true;
    }
    match name.strip_prefix("word/") {
        Some(part) => {
            (part.starts_with("header") || part.starts_with("footer"))
                && part.ends_with(".xml")
                && !part.contains('/')
        }
        None => false,
    }
}
