//! Handler for the shorten form submission.

use axum::{Form, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::home::{IndexTemplate, mapping_rows};

/// Form body of `POST /shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    pub url: Option<String>,
}

/// Shortens a submitted URL and re-renders the landing page.
///
/// # Endpoint
///
/// `POST /shorten` (`application/x-www-form-urlencoded`)
///
/// # Responses
///
/// - missing or empty `url` parameter: 400
/// - validation failure: 200, the error rendered in place on the page
/// - success: 200, the short URL shown in the result banner; a URL that
///   was shortened before reports its existing code
/// - storage failure: 500
pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<IndexTemplate, AppError> {
    let url = form.url.as_deref().map(str::trim).unwrap_or_default();

    if url.is_empty() {
        return Err(AppError::bad_request("URL parameter is required", json!({})));
    }

    match state.shortener.shorten(url).await {
        Ok(outcome) => {
            let short_url = state
                .shortener
                .short_url(&state.base_url, &outcome.mapping.short_code);

            let message = if outcome.already_existed {
                format!("Already shortened: {short_url}")
            } else {
                info!(code = %outcome.mapping.short_code, "created mapping");
                format!("Shortened URL: {short_url}")
            };

            Ok(IndexTemplate {
                mappings: mapping_rows(&state).await?,
                message: Some(message),
                error: None,
            })
        }
        // User-correctable input; render the reason on the page itself.
        Err(AppError::Validation { message, .. }) => Ok(IndexTemplate {
            mappings: mapping_rows(&state).await?,
            message: None,
            error: Some(message),
        }),
        Err(e) => Err(e),
    }
}
