use super::Document;

/// Outcome of one upload. Replaced wholesale when another file is uploaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadResult {
    pub extracted_text: String,
    pub source_file_name: Option<String>,
    pub source_file_size_bytes: Option<u64>,
    pub extracted_length: Option<usize>,
    pub error_message: Option<String>,
}

impl UploadResult {
    pub fn extracted(document: &Document, text: String) -> Self {
        let extracted_length = text.chars().count();
        Self {
            extracted_text: text,
            source_file_name: Some(document.filename.clone()),
            source_file_size_bytes: Some(document.size_bytes),
            extracted_length: Some(extracted_length),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error_message.is_some()
    }

    /// True when the extracted text holds anything besides whitespace.
    pub fn has_text(&self) -> bool {
        !self.extracted_text.trim().is_empty()
    }
}
