//! Terminal client for an askdoc server.
//!
//! Lines typed on stdin are questions about the uploaded document. Commands:
//! `/upload <path>`, `/save [path]`, `/quit`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use askdoc::application::services::{
    ChatOrchestrator, DEFAULT_FALLBACK_STATEMENT, IncrementalRevealer, PromptComposer,
};
use askdoc::domain::{ContentType, UploadedFile};
use askdoc::infrastructure::http::HttpChatBackend;
use askdoc::infrastructure::notifications::TerminalNotifier;
use askdoc::infrastructure::observability::{TracingConfig, init_tracing};

const DEFAULT_SAVE_PATH: &str = "chat.txt";

type Orchestrator = ChatOrchestrator<HttpChatBackend, TerminalNotifier>;

#[derive(Parser, Debug)]
#[command(name = "askdoc-chat", version, about = "Ask questions about a text document")]
struct Cli {
    /// Base URL of the askdoc server.
    #[arg(long, env = "ASKDOC_SERVER_URL", default_value = "http://localhost:3000")]
    server_url: String,

    /// Answer the model gives when the document does not cover the question.
    #[arg(long, env = "ASKDOC_FALLBACK_STATEMENT", default_value = DEFAULT_FALLBACK_STATEMENT)]
    fallback_statement: String,

    /// Document to upload before reading questions.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Content type sent with the file instead of guessing it from the extension.
    #[arg(long)]
    content_type: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&TracingConfig {
        filter: "warn".to_string(),
        ..TracingConfig::default()
    });

    let composer = PromptComposer::new(cli.fallback_statement.clone());
    tracing::debug!(
        server_url = %cli.server_url,
        fallback_statement = %composer.fallback_statement(),
        "Starting chat client"
    );

    let mut orchestrator = ChatOrchestrator::new(
        Arc::new(HttpChatBackend::new(&cli.server_url)),
        Arc::new(TerminalNotifier),
        composer,
        IncrementalRevealer::default(),
    );
    orchestrator.mount();

    if let Some(path) = cli.file.as_deref() {
        upload(&mut orchestrator, Some(path), cli.content_type.as_deref()).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();

        if line == "/quit" {
            break;
        } else if let Some(rest) = line.strip_prefix("/upload") {
            let path = rest.trim();
            let path = (!path.is_empty()).then(|| Path::new(path));
            upload(&mut orchestrator, path, cli.content_type.as_deref()).await;
        } else if let Some(rest) = line.strip_prefix("/save") {
            let path = match rest.trim() {
                "" => DEFAULT_SAVE_PATH,
                other => other,
            };
            if let Err(e) = orchestrator.save_output(Path::new(path)).await {
                eprintln!("[error] could not write {}: {}", path, e);
            }
        } else if orchestrator.ask(line).await.is_ok() {
            print_reveal(&mut orchestrator).await?;
        }
    }

    Ok(())
}

async fn upload(orchestrator: &mut Orchestrator, path: Option<&Path>, content_type: Option<&str>) {
    let file = match path {
        None => None,
        Some(path) => match tokio::fs::read(path).await {
            Ok(bytes) => {
                let content_type = content_type
                    .map(ContentType::from_mime)
                    .unwrap_or_else(|| guess_content_type(path));
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Some(UploadedFile::new(file_name, content_type, bytes))
            }
            Err(e) => {
                eprintln!("[error] could not read {}: {}", path.display(), e);
                return;
            }
        },
    };

    // Failures are already reported by the notifier.
    let _ = orchestrator.upload(file).await;
}

/// Streams the answer to stdout as the revealer exposes it.
async fn print_reveal(orchestrator: &mut Orchestrator) -> std::io::Result<()> {
    let mut output = orchestrator.subscribe_output();
    let mut printed = 0;

    loop {
        tokio::select! {
            changed = output.changed() => {
                if changed.is_err() {
                    break;
                }
                printed = print_new_text(output.borrow_and_update().as_str(), printed)?;
            }
            _ = orchestrator.wait_for_reveal() => {
                print_new_text(output.borrow_and_update().as_str(), printed)?;
                break;
            }
        }
    }

    println!();
    Ok(())
}

fn print_new_text(revealed: &str, printed: usize) -> std::io::Result<usize> {
    if let Some(fresh) = revealed.get(printed..) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(fresh.as_bytes())?;
        stdout.flush()?;
    }
    Ok(revealed.len().max(printed))
}

fn guess_content_type(path: &Path) -> ContentType {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let mime = match extension.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    };

    ContentType::from_mime(mime)
}
