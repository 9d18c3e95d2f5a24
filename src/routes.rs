//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - landing page with the mappings listing
//! - `POST /shorten`  - shorten form submission
//! - `GET  /{code}`   - short link redirect
//! - `/static/*`      - static assets
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Path normalization** - trailing slash handling

use crate::state::AppState;
use crate::web::handlers::{home_handler, redirect_handler, shorten_handler};
use crate::web::middleware::tracing;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(home_handler))
        .route("/shorten", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
