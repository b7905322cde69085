//! Generators module - fills `.docx` templates with invoice data.
//!
//! - `template` - placeholder substitution over WordprocessingML parts
//! - `engine` - rewrites a `.docx` archive with rendered parts
//! - `invoice` - copies a template into the documents directory and fills it

pub mod engine;
pub mod invoice;
pub mod template;
pub mod traits;

pub use engine::DocxRenderEngine;
pub use invoice::{InvoiceDocumentGenerator, InvoiceJob, DEFAULT_TEMPLATE};
pub use traits::Generator;

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
    #[error("template placeholder '{{{{ {0} }}}}' has no value")]
    UnknownPlaceholder(String),
    #[error("template is not a valid .docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("template part '{0}' is not UTF-8 XML")]
    NotUtf8(String),
    #[error("template is missing the '{0}' part")]
    MissingPart(&'static str),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub path: PathBuf,
    pub template: String,
}
