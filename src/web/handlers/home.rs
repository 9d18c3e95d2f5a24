//! Landing page handler and the shared index template.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the landing page.
///
/// Renders `templates/index.html` with the shorten form, an optional
/// result or error banner, and the table of existing mappings. The same
/// template backs the response of `POST /shorten`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub mappings: Vec<MappingRow>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// One row of the mappings table, preformatted for the template.
pub struct MappingRow {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: String,
    pub visit_count: u64,
    pub last_visited_at: Option<String>,
}

impl MappingRow {
    fn new(state: &AppState, mapping: &UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code.clone(),
            short_url: state
                .shortener
                .short_url(&state.base_url, &mapping.short_code),
            long_url: mapping.long_url.clone(),
            created_at: format_timestamp(mapping.created_at),
            visit_count: mapping.visit_count,
            last_visited_at: mapping.last_visited_at.map(format_timestamp),
        }
    }
}

fn format_timestamp(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Fetches all mappings and shapes them into table rows.
pub(crate) async fn mapping_rows(state: &AppState) -> Result<Vec<MappingRow>, AppError> {
    let mappings = state.shortener.list_mappings().await?;

    Ok(mappings
        .iter()
        .map(|mapping| MappingRow::new(state, mapping))
        .collect())
}

/// Renders the landing page with all existing mappings.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 500 when the mapping store cannot be read.
pub async fn home_handler(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    Ok(IndexTemplate {
        mappings: mapping_rows(&state).await?,
        message: None,
        error: None,
    })
}
