//! PDF conversion through an external office suite.
//!
//! Success means the expected PDF exists after the process ends. The exit
//! status is only logged.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use thiserror::Error;
use tokio::process::Command;

/// Default converter program.
pub const DEFAULT_CONVERTER: &str = "soffice";

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("cannot derive a PDF name from '{0}'")]
    InvalidSource(PathBuf),
    #[error("failed to launch converter '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("converter produced no output at {0}")]
    MissingOutput(PathBuf),
}

/// Turns a filled document into a PDF inside `output_dir`.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Returns the path of the written PDF.
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError>;
}

/// `{output_dir}/{source stem}.pdf`
pub fn expected_pdf_path(source: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
    let stem = source
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ConversionError::InvalidSource(source.to_path_buf()))?;
    let mut name = stem.to_os_string();
    name.push(".pdf");
    Ok(output_dir.join(name))
}

/// Runs LibreOffice (or a compatible CLI) in headless mode.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: String,
}

impl SofficeConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl DocumentConverter for SofficeConverter {
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf, ConversionError> {
        let expected = expected_pdf_path(source, output_dir)?;

        let mut command = Command::new(&self.program);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(output_dir)
            .arg(source);
        debug!("Running converter: {:?}", command);

        let output = command.output().await.map_err(|e| ConversionError::Launch {
            program: self.program.clone(),
            source: e,
        })?;

        if !output.status.success() {
            warn!(
                "{} exited with {} for {}: {}",
                self.program,
                output.status,
                source.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        match tokio::fs::try_exists(&expected).await {
            Ok(true) => Ok(expected),
            _ => Err(ConversionError::MissingOutput(expected)),
        }
    }
}
