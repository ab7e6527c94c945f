//! Uploaded documents.

use sha2::{Digest, Sha256};

/// Advisory upload size limit (5 MiB). Larger documents are accepted but
/// logged.
pub const ADVISORY_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Document kinds the upload form advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Portable Document Format.
    Pdf,
    /// Legacy Word document.
    Doc,
    /// Office Open XML Word document.
    Docx,
}

impl DocumentKind {
    /// Infers the kind from a file name's extension, case-insensitively.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// A single uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Creates a document from its name and contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// The kind inferred from the file name.
    #[must_use]
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_file_name(&self.file_name)
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-byte upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if the document exceeds [`ADVISORY_MAX_BYTES`].
    #[must_use]
    pub fn exceeds_advisory_limit(&self) -> bool {
        self.bytes.len() > ADVISORY_MAX_BYTES
    }

    /// Lowercase hex SHA-256 of the contents.
    #[must_use]
    pub fn digest(&self) -> String {
        Sha256::digest(&self.bytes)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
