use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use crate::application::ports::{ChatBackend, Notifier, TransportError};
use crate::domain::{
    ChatState, DisplayBuffer, GenerationRequest, GenerationResult, Notification, UploadResult,
    UploadedFile,
};

use super::incremental_revealer::IncrementalRevealer;
use super::prompt_composer::PromptComposer;

pub const OUTPUT_PLACEHOLDER: &str = "The response will appear here...";

const NO_FILE_SELECTED: &str = "No file selected!";
const FILE_TYPE_NOT_SUPPORTED: &str = "File type not supported!";
const FILE_PROCESSING: &str = "file processing...";
const FILE_PROCESSING_FAILED: &str = "file processing failed";
const FILE_PROCESSED: &str = "File processed successfully!";
const FILE_WITHOUT_TEXT: &str = "File uploaded, but no text extracted.";
const EMPTY_QUESTION: &str = "Prompt cannot be empty!";
const NO_UPLOAD: &str = "Please upload a file first!";
const EMPTY_DOCUMENT: &str = "No text found in the uploaded file!";
const CHATTING: &str = "Chatting with the AI...";
const EMPTY_ANSWER: &str = "No response received from AI. Please try again.";
const REQUEST_FAILED: &str = "Failed to process request. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("question is empty")]
    EmptyQuestion,
    #[error("no document uploaded")]
    NoUpload,
    #[error("uploaded document has no text")]
    EmptyDocument,
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("empty answer")]
    EmptyAnswer,
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
}

/// Client-side controller for one chat session.
///
/// Holds at most one document at a time. Every failure is reported through
/// the [`Notifier`] and returned, and leaves the session in a state from
/// which the user can upload or ask again.
pub struct ChatOrchestrator<B, N>
where
    B: ChatBackend,
    N: Notifier,
{
    backend: Arc<B>,
    notifier: Arc<N>,
    composer: PromptComposer,
    revealer: IncrementalRevealer,
    state: ChatState,
    upload: Option<UploadResult>,
    last_result: Option<GenerationResult>,
}

impl<B, N> ChatOrchestrator<B, N>
where
    B: ChatBackend,
    N: Notifier,
{
    pub fn new(
        backend: Arc<B>,
        notifier: Arc<N>,
        composer: PromptComposer,
        revealer: IncrementalRevealer,
    ) -> Self {
        Self {
            backend,
            notifier,
            composer,
            revealer,
            state: ChatState::Idle,
            upload: None,
            last_result: None,
        }
    }

    pub fn mount(&mut self) {
        if self.state == ChatState::Idle {
            self.transition(ChatState::AwaitingUpload);
        }
    }

    /// Current state. A finished reveal moves `Displaying` to `Ready`.
    pub fn state(&mut self) -> ChatState {
        if self.state == ChatState::Displaying && !self.revealer.is_revealing() {
            self.transition(ChatState::Ready);
        }
        self.state
    }

    pub fn upload_result(&self) -> Option<&UploadResult> {
        self.upload.as_ref()
    }

    pub fn last_result(&self) -> Option<&GenerationResult> {
        self.last_result.as_ref()
    }

    pub fn subscribe_output(&self) -> watch::Receiver<DisplayBuffer> {
        self.revealer.subscribe()
    }

    /// Revealed answer so far, or the placeholder before the first answer.
    pub fn output(&self) -> String {
        if self.last_result.is_none() {
            return OUTPUT_PLACEHOLDER.to_string();
        }
        self.revealer.current()
    }

    pub async fn save_output(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::write(path, self.output()).await?;
        self.notifier
            .notify(Notification::success("Downloaded the output as a text file!"));
        Ok(())
    }

    /// Sends a file to the upload endpoint. On success the previous document
    /// and answer are dropped; on failure the previous document is kept.
    pub async fn upload(&mut self, file: Option<UploadedFile>) -> Result<(), OrchestratorError> {
        let Some(file) = file else {
            self.notify(Notification::error(NO_FILE_SELECTED));
            return Err(OrchestratorError::NoFileSelected);
        };

        if !file.content_type.is_text() {
            self.notify(Notification::error(FILE_TYPE_NOT_SUPPORTED));
            return Err(OrchestratorError::UnsupportedFileType(
                file.content_type.as_mime().to_string(),
            ));
        }

        self.notify(Notification::loading(FILE_PROCESSING));

        let result = match self.backend.upload(&file).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, filename = %file.file_name, "Upload request failed");
                self.notify(Notification::error(FILE_PROCESSING_FAILED));
                return Err(OrchestratorError::Transport(e));
            }
        };

        if let Some(message) = result.error_message.clone() {
            tracing::warn!(error = %message, filename = %file.file_name, "Server rejected upload");
            self.notify(Notification::error(format!("Upload failed: {message}")));
            return Err(OrchestratorError::Upload(message));
        }

        self.revealer.cancel();
        self.revealer.clear();
        self.last_result = None;

        let has_text = result.has_text();
        tracing::info!(
            filename = %file.file_name,
            extracted_length = ?result.extracted_length,
            has_text,
            "Document replaced"
        );
        self.upload = Some(result);

        if has_text {
            self.notify(Notification::success(FILE_PROCESSED));
            self.transition(ChatState::Ready);
        } else {
            self.notify(Notification::success(FILE_WITHOUT_TEXT));
            self.transition(ChatState::AwaitingUpload);
        }

        Ok(())
    }

    /// Asks one question about the current document and starts revealing the answer.
    pub async fn ask(&mut self, question: &str) -> Result<(), OrchestratorError> {
        if question.trim().is_empty() {
            self.notify(Notification::error(EMPTY_QUESTION));
            return Err(OrchestratorError::EmptyQuestion);
        }

        let document_text = match self.upload.as_ref() {
            None => {
                self.notify(Notification::error(NO_UPLOAD));
                return Err(OrchestratorError::NoUpload);
            }
            Some(upload) if !upload.has_text() => {
                self.notify(Notification::error(EMPTY_DOCUMENT));
                return Err(OrchestratorError::EmptyDocument);
            }
            Some(upload) => upload.extracted_text.clone(),
        };

        let request = GenerationRequest::new(self.composer.compose(question, &document_text));

        self.transition(ChatState::Submitting);
        self.notify(Notification::loading(CHATTING));

        let outcome = self.backend.chat(&request).await;
        self.notifier.dismiss();

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Chat request failed");
                self.notify(Notification::error(REQUEST_FAILED));
                self.settle();
                return Err(OrchestratorError::Transport(e));
            }
        };

        if result.failed || result.is_apology() {
            tracing::warn!(diagnostic = ?result.diagnostic, "Generation reported failure");
            self.notify(Notification::error(result.text.clone()));
            self.settle();
            return Err(OrchestratorError::Generation(result.text));
        }

        if result.text.is_empty() {
            self.notify(Notification::error(EMPTY_ANSWER));
            self.settle();
            return Err(OrchestratorError::EmptyAnswer);
        }

        self.revealer.reveal(result.text.clone());
        self.last_result = Some(result);
        self.transition(ChatState::Displaying);

        Ok(())
    }

    /// Waits for the running reveal to finish, then returns to `Ready`.
    pub async fn wait_for_reveal(&mut self) {
        self.revealer.finished().await;
        if self.state == ChatState::Displaying {
            self.transition(ChatState::Ready);
        }
    }

    /// Leaves `Submitting` for `Displaying` while an earlier answer is still
    /// being revealed, otherwise for `Ready`.
    fn settle(&mut self) {
        if self.revealer.is_revealing() {
            self.transition(ChatState::Displaying);
        } else {
            self.transition(ChatState::Ready);
        }
    }

    fn notify(&self, notification: Notification) {
        self.notifier.dismiss();
        self.notifier.notify(notification);
    }

    fn transition(&mut self, next: ChatState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "Chat state changed");
            self.state = next;
        }
    }
}
