use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{UploadResult, UploadedFile};

pub struct UploadService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
}

impl<F> UploadService<F>
where
    F: FileLoader,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self { file_loader }
    }

    /// Type and emptiness are checked before the loader sees any bytes.
    pub async fn upload(&self, file: Option<UploadedFile>) -> Result<UploadResult, FileLoaderError> {
        let file = file.ok_or(FileLoaderError::MissingFile)?;

        if !file.content_type.is_text() {
            return Err(FileLoaderError::UnsupportedContentType(
                file.content_type.as_mime().to_string(),
            ));
        }

        if file.bytes.is_empty() {
            return Err(FileLoaderError::EmptyFile);
        }

        let document = file.to_document();
        let text = self.file_loader.extract_text(&file.bytes, &document).await?;

        tracing::debug!(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
            size_bytes = document.size_bytes,
            "Extracted text from upload"
        );

        Ok(UploadResult::extracted(&document, text))
    }
}
