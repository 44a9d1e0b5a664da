//! Document codecs
//!
//! A codec turns a template file into a [`Document`] tree and writes the
//! filled tree back out. The substitution engine only ever sees the tree,
//! so any container format can be plugged in behind [`DocumentCodec`].
//!
//! The bundled [`JsonCodec`] reads and writes a serde dump of the tree.

use crate::document_model::Document;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reads and writes document trees
pub trait DocumentCodec: Send + Sync {
    /// Short name of the format, for logs
    fn name(&self) -> &'static str;

    /// Parse a template file into a document tree
    fn read(&self, path: &Path) -> Result<Document, CodecError>;

    /// Serialize a document tree, overwriting `path`
    fn write(&self, document: &Document, path: &Path) -> Result<(), CodecError>;
}

/// Codec for the JSON dump of a document tree
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    /// Pretty-print the output
    pub pretty: bool,
}

impl JsonCodec {
    /// Codec producing indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read(&self, path: &Path) -> Result<Document, CodecError> {
        let content =
            fs::read_to_string(path).map_err(|e| CodecError::IoError(path.to_path_buf(), e))?;

        serde_json::from_str(&content).map_err(|e| CodecError::ParseError(path.to_path_buf(), e))
    }

    fn write(&self, document: &Document, path: &Path) -> Result<(), CodecError> {
        let content = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|e| CodecError::SerializeError(path.to_path_buf(), e))?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| CodecError::IoError(parent.to_path_buf(), e))?;
            }
        }

        fs::write(path, content).map_err(|e| CodecError::IoError(path.to_path_buf(), e))
    }
}

/// Pick a codec from a file's extension
///
/// # Returns
/// * `Ok(Box<dyn DocumentCodec>)` - A codec able to handle the file
/// * `Err(CodecError::UnsupportedFormat)` - No codec for this extension
pub fn codec_for_path(path: &Path) -> Result<Box<dyn DocumentCodec>, CodecError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Box::new(JsonCodec::pretty())),
        _ => Err(CodecError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Errors raised while reading or writing a document
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error on {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("Malformed document {path}: {source}", path = .0.display(), source = .1)]
    ParseError(PathBuf, #[source] serde_json::Error),

    #[error("Cannot serialize document for {path}: {source}", path = .0.display(), source = .1)]
    SerializeError(PathBuf, #[source] serde_json::Error),

    #[error("No codec for {path}", path = .0.display())]
    UnsupportedFormat(PathBuf),
}
