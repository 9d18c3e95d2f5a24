//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The visit is recorded (counter increment, last-visited timestamp)
/// before the redirect is issued; when recording fails, the client gets a
/// 500 and no redirect.
///
/// # Responses
///
/// - 301 Moved Permanently with the target in `Location`
/// - 404 when the code is unknown
/// - 500 when the visit could not be persisted
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), AppError> {
    let long_url = state.shortener.redirect(&code).await?;

    debug!(%code, target = %long_url, "redirecting");

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, long_url)],
    ))
}
