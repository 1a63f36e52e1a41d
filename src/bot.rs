//! Bot startup: wires the collaborators together and serves the webhook.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::dispatcher::{Dispatcher, DispatcherOptions};
use crate::error::Result;
use crate::openai::OpenAiClient;
use crate::places::FoursquareClient;
use crate::server::{AppState, router};
use crate::state::InMemoryStore;
use crate::telegram::TelegramClient;

/// Run the bot until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is missing, webhook registration fails,
/// or the listener cannot be bound.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing provider clients");
    let telegram = Arc::new(TelegramClient::new(config.telegram_token.clone()));
    let places = Arc::new(FoursquareClient::new(config.foursquare_api_key.clone()));
    let summarizer = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    let dispatcher = Dispatcher::new(
        Arc::new(InMemoryStore::new()),
        places,
        summarizer,
        DispatcherOptions {
            default_query: config.default_query.clone(),
            fallback: config.fallback,
        },
    );

    telegram.set_webhook(&config.webhook_url).await?;

    let app = router(
        &config.webhook_path,
        AppState {
            dispatcher: Arc::new(dispatcher),
            sender: telegram,
        },
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Listening for updates on {addr}{}", config.webhook_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, shutting down...");
            }
        })
        .await?;

    Ok(())
}
