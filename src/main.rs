use std::sync::Arc;

use eyre::{Context, Result};
use tokio_util::sync::CancellationToken;

use globalrate::backend::new_backend;
use globalrate::cli::Command;
use globalrate::config::init_logger;
use globalrate::context::new_context_provider;
use globalrate::server::{self, AppState};
use globalrate::service::ChatService;
use globalrate::storage::new_storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    better_panic::install();

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    log::info!("Starting {}", globalrate::config::version());

    let storage = new_storage(&config.storage)
        .await
        .wrap_err("initializing storage")?;

    let backend = new_backend(&config.backend).wrap_err("initializing backend")?;

    log::info!("Context provider: {}", config.context.provider);
    let context = new_context_provider(&config.context, &config.assistant);

    let chat = ChatService::from_config(&config, backend, storage, context);
    let state = Arc::new(AppState::new(chat));

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(_) => log::info!("Shutdown signal received"),
            Err(err) => log::error!("Listening for shutdown signal: {}", err),
        }
        shutdown.cancel();
    });

    server::serve(&config.server, state, token).await?;
    log::info!("Server stopped");
    Ok(())
}
