use super::{ContentType, Document};

/// A file as handed over by the user or received from a multipart field.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: ContentType,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: ContentType, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn to_document(&self) -> Document {
        Document::new(
            self.file_name.clone(),
            self.content_type.clone(),
            self.size_bytes(),
        )
    }
}
