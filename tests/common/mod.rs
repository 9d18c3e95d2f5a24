#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use urlshort::application::services::ShortenerService;
use urlshort::domain::entities::UrlMapping;
use urlshort::domain::repositories::MappingRepository;
use urlshort::infrastructure::persistence::FileMappingRepository;
use urlshort::state::AppState;

pub const BASE_URL: &str = "http://localhost:3000";

pub type TestRepo = Arc<FileMappingRepository>;

/// Builds an [`AppState`] over a file-backed store rooted at `data_file`.
///
/// The repository handle is returned alongside so tests can inspect the
/// store directly.
pub async fn create_test_state(data_file: &Path) -> (AppState, TestRepo) {
    let repository = Arc::new(FileMappingRepository::open(data_file).await.unwrap());
    let shortener = Arc::new(ShortenerService::new(repository.clone()));

    (AppState::new(shortener, BASE_URL.to_string()), repository)
}

pub async fn seed_mapping(repository: &FileMappingRepository, code: &str, url: &str) {
    repository
        .insert(UrlMapping::new(code.to_string(), url.to_string()))
        .await
        .unwrap();
}
