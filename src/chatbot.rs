use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

pub mod dto;
pub mod handlers;

use crate::{
    config::Config,
    infer::CompletionClient,
    service,
};
use dto::{ChatRequest, ChatResponse};

pub struct ChatBot {
    config: Arc<Config>,
    client: CompletionClient,
}

impl ChatBot {
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let client = CompletionClient::new(&config.model, config.upstream_timeout)
            .context("Failed to build completion client")?;
        Ok(Self { config, client })
    }

    /// Relays one user message to the completion API.
    pub async fn send_message(&self, request: ChatRequest) -> service::Result<ChatResponse> {
        let credentials = self.config.credentials()?;
        let reply = self
            .client
            .complete(credentials, request.message.as_deref())
            .await?;

        Ok(ChatResponse {
            response: reply.into(),
        })
    }
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let bot = ChatBot::new(Arc::new(config))?;
    tracing::info!("Using model {}", bot.client.model());

    let router = handlers::build_router(Arc::new(bot));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
