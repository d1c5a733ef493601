use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use askdoc::application::services::{GenerationGateway, UploadService};
use askdoc::infrastructure::llm::create_gemini_client;
use askdoc::infrastructure::observability::{TracingConfig, init_tracing};
use askdoc::infrastructure::text_processing::PlainTextAdapter;
use askdoc::presentation::config::API_KEY_ENV;
use askdoc::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        environment.as_str(),
    ));

    let api_key = settings.generation.api_key();
    if api_key.is_none() {
        tracing::warn!(
            "{} is not set; chat requests will be answered with a missing-key error",
            API_KEY_ENV
        );
    }

    let llm_client = Arc::new(create_gemini_client(&settings.generation));

    tracing::info!(
        model = %llm_client.model(),
        max_output_tokens = llm_client.max_output_tokens(),
        api_key_present = api_key.is_some(),
        "Generation configured"
    );

    let generation_gateway = Arc::new(GenerationGateway::new(llm_client, api_key));
    let upload_service = Arc::new(UploadService::new(Arc::new(PlainTextAdapter)));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        upload_service,
        generation_gateway,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
