use std::fmt;

use super::DocumentId;

const TEXT_MIME_PREFIX: &str = "text";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

/// Declared MIME type of an uploaded file, kept as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(String);

impl ContentType {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim();
        if mime.is_empty() {
            Self(FALLBACK_MIME.to_string())
        } else {
            Self(mime.to_ascii_lowercase())
        }
    }

    pub fn plain_text() -> Self {
        Self("text/plain".to_string())
    }

    /// Text-like types are the only ones the extractor decodes.
    pub fn is_text(&self) -> bool {
        self.0.starts_with(TEXT_MIME_PREFIX)
    }

    pub fn as_mime(&self) -> &str {
        &self.0
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self(FALLBACK_MIME.to_string())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }
}
