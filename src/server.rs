//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend from configuration, connects it (failing
//! fast when the backend is unreachable), and runs the Axum server.

use crate::application::services::ShortenerService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::persistence::{FileMappingRepository, MongoMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - the storage backend cannot be opened or reached at startup
/// - the listen address is invalid or the bind fails
/// - the server hits a runtime error
pub async fn run(config: Config) -> Result<()> {
    let repository: Arc<dyn MappingRepository> = match config.storage_backend {
        StorageBackend::MongoDb => {
            let uri = config
                .mongodb_uri
                .as_deref()
                .context("MONGODB_URI must be set when STORAGE_BACKEND is 'mongodb'")?;

            let repository = MongoMappingRepository::connect(uri, &config.mongodb_database)
                .await
                .context("Failed to connect to MongoDB")?;
            tracing::info!("Connected to MongoDB (database '{}')", config.mongodb_database);

            Arc::new(repository)
        }
        StorageBackend::File => {
            let repository = FileMappingRepository::open(&config.data_file)
                .await
                .with_context(|| {
                    format!("Failed to open snapshot {}", config.data_file.display())
                })?;
            tracing::info!(path = %config.data_file.display(), "Opened mapping snapshot");

            Arc::new(repository)
        }
    };

    let shortener = Arc::new(ShortenerService::new(repository));
    let state = AppState::new(shortener, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
