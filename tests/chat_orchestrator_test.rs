use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use askdoc::application::ports::{
    ChatBackend, LlmClient, LlmClientError, Notifier, TransportError,
};
use askdoc::application::services::{
    ChatOrchestrator, GenerationGateway, IncrementalRevealer, OUTPUT_PLACEHOLDER,
    OrchestratorError, PromptComposer, UploadService,
};
use askdoc::domain::{
    ApiKey, ChatState, ContentType, GenerationRequest, GenerationResult, Notification,
    NotificationLevel, UploadResult, UploadedFile,
};
use askdoc::infrastructure::text_processing::PlainTextAdapter;

/// Answers with a scripted reply and remembers the prompts it saw.
#[derive(Default)]
struct ScriptedLlmClient {
    reply: Mutex<Option<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlmClient {
    fn answering(reply: &str) -> Self {
        Self {
            reply: Mutex::new(Some(reply.to_string())),
            prompts: Mutex::default(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
        _api_key: &ApiKey,
    ) -> Result<String, LlmClientError> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.composite_prompt.clone());
        self.reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("HTTP 500: boom".to_string()))
    }
}

/// Runs the server-side services in process instead of over HTTP.
struct InProcessBackend {
    uploads: UploadService<PlainTextAdapter>,
    gateway: GenerationGateway<ScriptedLlmClient>,
    offline: AtomicBool,
    upload_calls: AtomicUsize,
    chat_calls: AtomicUsize,
}

impl InProcessBackend {
    fn new(llm: Arc<ScriptedLlmClient>) -> Self {
        Self {
            uploads: UploadService::new(Arc::new(PlainTextAdapter)),
            gateway: GenerationGateway::new(llm, ApiKey::new("test-key")),
            offline: AtomicBool::new(false),
            upload_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn calls(&self) -> (usize, usize) {
        (
            self.upload_calls.load(Ordering::SeqCst),
            self.chat_calls.load(Ordering::SeqCst),
        )
    }

    fn check_online(&self) -> Result<(), TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChatBackend for InProcessBackend {
    async fn upload(&self, file: &UploadedFile) -> Result<UploadResult, TransportError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(match self.uploads.upload(Some(file.clone())).await {
            Ok(result) => result,
            Err(e) => UploadResult::failed(e.to_string()),
        })
    }

    async fn chat(&self, request: &GenerationRequest) -> Result<GenerationResult, TransportError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.gateway.generate(request).await)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    fn last(&self) -> Notification {
        self.all().last().cloned().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

struct Harness {
    llm: Arc<ScriptedLlmClient>,
    backend: Arc<InProcessBackend>,
    notifier: Arc<RecordingNotifier>,
    orchestrator: ChatOrchestrator<InProcessBackend, RecordingNotifier>,
}

fn harness(reply: Option<&str>) -> Harness {
    let llm = Arc::new(match reply {
        Some(reply) => ScriptedLlmClient::answering(reply),
        None => ScriptedLlmClient::default(),
    });
    let backend = Arc::new(InProcessBackend::new(Arc::clone(&llm)));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut orchestrator = ChatOrchestrator::new(
        Arc::clone(&backend),
        Arc::clone(&notifier),
        PromptComposer::new("Not in the document."),
        IncrementalRevealer::new(Duration::from_millis(1)),
    );
    orchestrator.mount();

    Harness {
        llm,
        backend,
        notifier,
        orchestrator,
    }
}

fn text_file(name: &str, content: &str) -> Option<UploadedFile> {
    Some(UploadedFile::new(
        name,
        ContentType::plain_text(),
        content.as_bytes().to_vec(),
    ))
}

#[test]
fn given_new_orchestrator_when_mounted_then_awaits_upload() {
    let backend = Arc::new(InProcessBackend::new(Arc::new(ScriptedLlmClient::default())));
    let mut orchestrator = ChatOrchestrator::new(
        backend,
        Arc::new(RecordingNotifier::default()),
        PromptComposer::default(),
        IncrementalRevealer::default(),
    );
    assert_eq!(orchestrator.state(), ChatState::Idle);

    orchestrator.mount();

    assert_eq!(orchestrator.state(), ChatState::AwaitingUpload);
    assert_eq!(orchestrator.output(), OUTPUT_PLACEHOLDER);
}

#[tokio::test(start_paused = true)]
async fn given_text_document_when_asking_then_answer_is_revealed_from_composed_prompt() {
    let mut h = harness(Some("A short summary."));

    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
    assert_eq!(
        h.notifier.last(),
        Notification::success("File processed successfully!")
    );
    let stored = h.orchestrator.upload_result().unwrap();
    assert_eq!(stored.extracted_text, "Hello world");
    assert_eq!(stored.extracted_length, Some(11));

    h.orchestrator.ask("summarize").await.unwrap();
    assert_eq!(h.orchestrator.state(), ChatState::Displaying);

    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("summarize"));
    assert!(prompts[0].contains("Hello world"));
    assert!(prompts[0].contains("Not in the document."));

    h.orchestrator.wait_for_reveal().await;
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
    assert_eq!(h.orchestrator.output(), "A short summary.");
    assert_eq!(
        h.orchestrator.last_result().map(|r| r.text.as_str()),
        Some("A short summary.")
    );
}

#[tokio::test]
async fn given_upload_in_progress_when_processing_then_loading_notice_precedes_result() {
    let mut h = harness(Some("ok"));

    h.orchestrator
        .upload(text_file("doc.txt", "content"))
        .await
        .unwrap();

    let levels: Vec<NotificationLevel> = h.notifier.all().iter().map(|n| n.level).collect();
    assert_eq!(
        levels,
        vec![NotificationLevel::Loading, NotificationLevel::Success]
    );
    assert_eq!(h.notifier.all()[0].message, "file processing...");
}

#[tokio::test]
async fn given_no_file_when_uploading_then_reports_without_network_call() {
    let mut h = harness(Some("ok"));

    let err = h.orchestrator.upload(None).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::NoFileSelected));
    assert_eq!(h.notifier.last(), Notification::error("No file selected!"));
    assert_eq!(h.backend.calls(), (0, 0));
    assert_eq!(h.orchestrator.state(), ChatState::AwaitingUpload);
}

#[tokio::test]
async fn given_pdf_file_when_uploading_then_rejects_before_sending() {
    let mut h = harness(Some("ok"));
    let file = UploadedFile::new(
        "resume.pdf",
        ContentType::from_mime("application/pdf"),
        b"%PDF".to_vec(),
    );

    let err = h.orchestrator.upload(Some(file)).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::UnsupportedFileType(ref m) if m == "application/pdf"));
    assert_eq!(h.notifier.last(), Notification::error("File type not supported!"));
    assert_eq!(h.backend.calls(), (0, 0));
}

#[tokio::test]
async fn given_no_upload_when_asking_then_reports_without_network_call() {
    let mut h = harness(Some("ok"));

    let err = h.orchestrator.ask("what is this?").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::NoUpload));
    assert_eq!(h.notifier.last(), Notification::error("Please upload a file first!"));
    assert_eq!(h.backend.calls(), (0, 0));
}

#[tokio::test]
async fn given_empty_question_when_asking_then_reports_without_network_call() {
    let mut h = harness(Some("ok"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();

    let err = h.orchestrator.ask("").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyQuestion));
    assert_eq!(h.notifier.last(), Notification::error("Prompt cannot be empty!"));
    assert_eq!(h.backend.calls(), (1, 0));
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
}

#[tokio::test]
async fn given_whitespace_question_when_asking_then_reports_without_network_call() {
    let mut h = harness(Some("ok"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();

    let err = h.orchestrator.ask("  \t ").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyQuestion));
    assert_eq!(h.notifier.last(), Notification::error("Prompt cannot be empty!"));
    assert_eq!(h.backend.calls(), (1, 0));
}

#[tokio::test]
async fn given_whitespace_document_when_uploaded_then_asking_reports_missing_text() {
    let mut h = harness(Some("ok"));

    h.orchestrator
        .upload(text_file("blank.txt", "  \n\t "))
        .await
        .unwrap();
    assert_eq!(
        h.notifier.last(),
        Notification::success("File uploaded, but no text extracted.")
    );
    assert_eq!(h.orchestrator.state(), ChatState::AwaitingUpload);

    let err = h.orchestrator.ask("anything?").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyDocument));
    assert_eq!(
        h.notifier.last(),
        Notification::error("No text found in the uploaded file!")
    );
    assert_eq!(h.backend.calls(), (1, 0));
}

#[tokio::test]
async fn given_server_rejects_upload_when_uploading_then_previous_document_is_kept() {
    let mut h = harness(Some("ok"));
    h.orchestrator
        .upload(text_file("first.txt", "first document"))
        .await
        .unwrap();

    let err = h
        .orchestrator
        .upload(text_file("empty.txt", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Upload(ref m) if m == "file is empty"));
    assert_eq!(
        h.notifier.last(),
        Notification::error("Upload failed: file is empty")
    );
    assert_eq!(
        h.orchestrator.upload_result().unwrap().extracted_text,
        "first document"
    );
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
}

#[tokio::test]
async fn given_unreachable_server_when_uploading_then_reports_processing_failure() {
    let mut h = harness(Some("ok"));
    h.backend.go_offline();

    let err = h
        .orchestrator
        .upload(text_file("doc.txt", "text"))
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Transport(_)));
    assert_eq!(h.notifier.last(), Notification::error("file processing failed"));
    assert!(h.orchestrator.upload_result().is_none());
}

#[tokio::test(start_paused = true)]
async fn given_new_upload_after_answer_when_asking_then_only_new_document_is_used() {
    let mut h = harness(Some("An answer."));
    h.orchestrator
        .upload(text_file("a.txt", "alpha contents"))
        .await
        .unwrap();
    h.orchestrator.ask("what?").await.unwrap();
    h.orchestrator.wait_for_reveal().await;
    assert_eq!(h.orchestrator.output(), "An answer.");

    h.orchestrator
        .upload(text_file("b.txt", "beta contents"))
        .await
        .unwrap();
    assert_eq!(h.orchestrator.output(), OUTPUT_PLACEHOLDER);
    assert!(h.orchestrator.last_result().is_none());

    h.orchestrator.ask("and now?").await.unwrap();
    h.orchestrator.wait_for_reveal().await;

    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("beta contents"));
    assert!(!prompts[1].contains("alpha contents"));
}

#[tokio::test]
async fn given_provider_failure_when_asking_then_apology_is_notified_not_displayed() {
    let mut h = harness(None);
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();

    let err = h.orchestrator.ask("summarize").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Generation(_)));
    assert_eq!(
        h.notifier.last(),
        Notification::error("Unable to process the prompt. Please try again.")
    );
    assert_eq!(h.orchestrator.output(), OUTPUT_PLACEHOLDER);
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
}

#[tokio::test]
async fn given_unreachable_server_when_asking_then_returns_to_ready() {
    let mut h = harness(Some("ok"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();
    h.backend.go_offline();

    let err = h.orchestrator.ask("summarize").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Transport(_)));
    assert_eq!(
        h.notifier.last(),
        Notification::error("Failed to process request. Please try again.")
    );
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
}

#[tokio::test]
async fn given_empty_answer_when_asking_then_reports_no_response() {
    let mut h = harness(Some(""));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();

    let err = h.orchestrator.ask("summarize").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyAnswer));
    assert_eq!(
        h.notifier.last(),
        Notification::error("No response received from AI. Please try again.")
    );
    assert_eq!(h.orchestrator.state(), ChatState::Ready);
}

#[tokio::test(start_paused = true)]
async fn given_revealed_answer_when_saving_then_file_holds_output() {
    let mut h = harness(Some("Saved answer"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();
    h.orchestrator.ask("summarize").await.unwrap();
    h.orchestrator.wait_for_reveal().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");

    h.orchestrator.save_output(&path).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Saved answer");
    assert_eq!(
        h.notifier.last(),
        Notification::success("Downloaded the output as a text file!")
    );
}

#[tokio::test]
async fn given_no_answer_yet_when_saving_then_file_holds_placeholder() {
    let h = harness(Some("ok"));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");

    h.orchestrator.save_output(&path).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), OUTPUT_PLACEHOLDER);
}

#[tokio::test(start_paused = true)]
async fn given_reveal_in_progress_when_ask_fails_then_stays_displaying_until_reveal_ends() {
    let mut h = harness(Some("A fairly long answer"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();
    h.orchestrator.ask("q1").await.unwrap();
    h.backend.go_offline();

    let err = h.orchestrator.ask("q2").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Transport(_)));
    assert_eq!(h.orchestrator.state(), ChatState::Displaying);
    assert!("A fairly long answer".starts_with(h.orchestrator.output().as_str()));

    h.orchestrator.wait_for_reveal().await;

    assert_eq!(h.orchestrator.state(), ChatState::Ready);
    assert_eq!(h.orchestrator.output(), "A fairly long answer");
}

#[tokio::test(start_paused = true)]
async fn given_reveal_in_progress_when_answer_is_apology_then_stays_displaying() {
    let mut h = harness(Some("First answer text"));
    h.orchestrator
        .upload(text_file("doc.txt", "Hello world"))
        .await
        .unwrap();
    h.orchestrator.ask("q1").await.unwrap();
    *h.llm.reply.lock().unwrap() = None;

    let err = h.orchestrator.ask("q2").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Generation(_)));
    assert_eq!(h.orchestrator.state(), ChatState::Displaying);

    h.orchestrator.wait_for_reveal().await;

    assert_eq!(h.orchestrator.state(), ChatState::Ready);
    assert_eq!(h.orchestrator.output(), "First answer text");
}
