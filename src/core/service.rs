use crate::adapters::{http, FileStore};
use crate::config::AppConfig;
use crate::core::form::FormHandler;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Wires the file store, the form handler and the HTTP listener together.
pub struct FormService {
    config: AppConfig,
    handler: FormHandler,
}

impl FormService {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let store = FileStore::from_config(&config.store);
        store.prepare()?;
        tracing::debug!("Store file: {}", store.path().display());

        let handler = FormHandler::new(Arc::new(store))?;
        Ok(Self { config, handler })
    }

    pub fn handler(&self) -> &FormHandler {
        &self.handler
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.server.bind).await?;
        self.run_on(listener, shutdown_signal()).await
    }

    pub async fn run_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("🚀 Form available at http://{}/", addr);
        }
        http::serve(listener, self.handler, shutdown).await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
