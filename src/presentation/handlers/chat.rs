use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{GenerationRequest, GenerationResult};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_types::{ChatRequest, ChatResponse};

/// Always answers 200; generation failures and unreadable bodies travel in the body.
#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler<F, L>(
    State(state): State<AppState<F, L>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected chat request body");
            return (
                StatusCode::OK,
                Json(ChatResponse::from(GenerationResult::failure(
                    rejection.body_text(),
                ))),
            );
        }
    };

    tracing::debug!(
        prompt = %sanitize_prompt(&request.user_prompt),
        api_key_present = state.generation_gateway.has_api_key(),
        "Processing chat request"
    );

    let result = state
        .generation_gateway
        .generate(&GenerationRequest::new(request.user_prompt))
        .await;

    if result.failed {
        tracing::warn!(diagnostic = ?result.diagnostic, "Chat request answered with failure");
    }

    (StatusCode::OK, Json(ChatResponse::from(result)))
}
