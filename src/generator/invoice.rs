//! Generator for invoice documents.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::engine::DocxRenderEngine;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};
use crate::invoice::context::RenderContext;
use crate::invoice::models::Invoice;
use crate::storage::{Directory, FileStore};

/// Template used when the request does not name one.
pub const DEFAULT_TEMPLATE: &str = "invoice_template.docx";

/// One document to produce.
#[derive(Debug)]
pub struct InvoiceJob {
    /// File name inside the documents directory.
    pub filename: String,
    pub invoice: Invoice,
    pub template: Option<String>,
}

/// Resolve a template selector to a file name in the templates directory.
pub fn template_file_name(template: Option<&str>) -> String {
    match template.map(str::trim).filter(|name| !name.is_empty()) {
        None => DEFAULT_TEMPLATE.to_string(),
        Some(name) if name.to_ascii_lowercase().ends_with(".docx") => name.to_string(),
        Some(name) => format!("{}.docx", name),
    }
}

pub struct InvoiceDocumentGenerator {
    store: FileStore,
}

impl InvoiceDocumentGenerator {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}

impl Generator<InvoiceJob> for InvoiceDocumentGenerator {
    /// Copy the template into the documents directory and fill it in place.
    fn generate(&self, job: InvoiceJob) -> Result<GeneratedDocument, GeneratorError> {
        let template = template_file_name(job.template.as_deref());
        let template_path = self.store.path_of(Directory::Templates, &template)?;
        if !template_path.is_file() {
            return Err(GeneratorError::TemplateNotFound(template));
        }

        let destination = self.store.path_of(Directory::Documents, &job.filename)?;
        fs::copy(&template_path, &destination)?;
        debug!("Copied {} to {}", template_path.display(), destination.display());

        let context = RenderContext::from_invoice(&job.invoice);
        if let Err(e) = fill_in_place(&destination, &context) {
            if let Err(remove_err) = fs::remove_file(&destination) {
                warn!("Could not remove unfilled {}: {}", destination.display(), remove_err);
            }
            return Err(e);
        }

        Ok(GeneratedDocument {
            filename: job.filename,
            path: destination,
            template,
        })
    }
}

fn fill_in_place(path: &Path, context: &RenderContext) -> Result<(), GeneratorError> {
    let source = fs::read(path)?;
    let rendered = DocxRenderEngine::render(&source, context)?;
    fs::write(path, rendered)?;
    Ok(())
}
