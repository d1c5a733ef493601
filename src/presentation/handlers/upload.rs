use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::{FileLoader, FileLoaderError, LlmClient};
use crate::domain::{ContentType, UploadedFile};
use crate::presentation::state::AppState;

use super::api_types::UploadResponse;

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<F, L>(
    State(state): State<AppState<F, L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let file = match multipart.next_field().await {
        Ok(Some(field)) => {
            let file_name = field.file_name().unwrap_or("unknown").to_string();
            let content_type = ContentType::from_mime(field.content_type().unwrap_or_default());

            tracing::debug!(filename = %file_name, content_type = %content_type, "Processing file upload");

            match field.bytes().await {
                Ok(bytes) => Some(UploadedFile::new(file_name, content_type, bytes.to_vec())),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read file bytes");
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(UploadResponse::failure(format!("Failed to read file: {}", e))),
                    )
                        .into_response();
                }
            }
        }
        Ok(None) => None,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse::failure(format!(
                    "Failed to read multipart: {}",
                    e
                ))),
            )
                .into_response();
        }
    };

    match state.upload_service.upload(file).await {
        Ok(result) => {
            tracing::info!(
                filename = ?result.source_file_name,
                extracted_length = ?result.extracted_length,
                "File processed"
            );
            (StatusCode::OK, Json(UploadResponse::from(result))).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Upload rejected");
            let status = match e {
                FileLoaderError::MissingFile => StatusCode::BAD_REQUEST,
                FileLoaderError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FileLoaderError::EmptyFile | FileLoaderError::ExtractionFailed(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
            (status, Json(UploadResponse::failure(e.to_string()))).into_response()
        }
    }
}
