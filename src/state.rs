use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::ServerConfig;
use crate::converter::{DocumentConverter, SofficeConverter};
use crate::storage::{Directory, FileStore};

/// Bytes escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone)]
pub struct AppState {
    pub store: FileStore,
    pub converter: Arc<dyn DocumentConverter + Send + Sync>,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(store: FileStore, converter: Arc<dyn DocumentConverter + Send + Sync>) -> Self {
        Self {
            store,
            converter,
            public_base_url: String::new(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let converter = Arc::new(SofficeConverter::new(config.converter_bin.clone()));
        Self::new(FileStore::new(&config.storage_dir), converter)
            .with_public_base_url(config.public_base_url.clone())
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    /// Link to `GET /download/{directory}/{name}`.
    pub fn download_url(&self, directory: Directory, name: &str) -> String {
        format!(
            "{}/download/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            directory.as_str(),
            utf8_percent_encode(name, PATH_SEGMENT)
        )
    }
}
