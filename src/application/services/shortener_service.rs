//! Shorten and redirect orchestration.

use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;
use chrono::Utc;
use serde_json::json;

/// Maximum number of fresh codes tried when an insert collides.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Result of a shorten request.
///
/// `already_existed` is true when the submitted URL had been shortened
/// before and the existing mapping was returned instead of a new one.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    pub mapping: UrlMapping,
    pub already_existed: bool,
}

/// Service implementing the shorten and redirect use cases.
///
/// The backend is selected at startup and injected as a trait object, so
/// the service logic is identical for the MongoDB and flat-file stores.
pub struct ShortenerService {
    repository: Arc<dyn MappingRepository>,
}

impl ShortenerService {
    /// Creates a new service over the given storage backend.
    pub fn new(repository: Arc<dyn MappingRepository>) -> Self {
        Self { repository }
    }

    /// Shortens a long URL.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL; nothing is stored on failure.
    /// 2. If the exact URL was shortened before, return the existing
    ///    mapping (dedup-on-submit policy). The lookup and the insert are
    ///    not atomic, so two concurrent submissions of the same URL can
    ///    each create a mapping; dedup is best effort, only short codes
    ///    are unique.
    /// 3. Otherwise generate a candidate code and insert. A duplicate-key
    ///    conflict means the code collided with an existing one; retry with
    ///    a fresh code up to [`MAX_CODE_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed URLs,
    /// [`AppError::Internal`] on storage failures or when the retry budget
    /// is exhausted.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenOutcome, AppError> {
        validate_url(long_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "url": long_url }))
        })?;

        if let Some(existing) = self.repository.find_by_long_url(long_url).await? {
            return Ok(ShortenOutcome {
                mapping: existing,
                already_existed: true,
            });
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let mapping = UrlMapping::new(generate_code(), long_url.to_string());

            match self.repository.insert(mapping.clone()).await {
                Ok(()) => {
                    return Ok(ShortenOutcome {
                        mapping,
                        already_existed: false,
                    });
                }
                // Collision: another mapping already owns this code.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code for a redirect and records the visit.
    ///
    /// The target URL is returned only after the store confirms the visit
    /// was persisted; a storage failure surfaces as an error and the caller
    /// must not redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::Internal`] when the visit could not be persisted.
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        match self.repository.record_visit(code, Utc::now()).await? {
            Some(mapping) => Ok(mapping.long_url),
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            )),
        }
    }

    /// Lists every stored mapping for the landing page.
    pub async fn list_mappings(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_all().await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::utils::code_generator::CODE_LENGTH;
    use chrono::Utc;

    fn service(repo: MockMappingRepository) -> ShortenerService {
        ShortenerService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let outcome = service(repo)
            .shorten("http://example.com/page")
            .await
            .unwrap();

        assert!(!outcome.already_existed);
        assert_eq!(outcome.mapping.long_url, "http://example.com/page");
        assert_eq!(outcome.mapping.short_code.len(), CODE_LENGTH);
        assert!(
            outcome
                .mapping
                .short_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        );
        assert_eq!(outcome.mapping.visit_count, 0);
        assert!(outcome.mapping.last_visited_at.is_none());
    }

    #[tokio::test]
    async fn test_shorten_invalid_url_touches_no_storage() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url().times(0);
        repo.expect_insert().times(0);

        let err = service(repo).shorten("not-a-url").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_missing_scheme_is_validation_error() {
        let repo = MockMappingRepository::new();

        let err = service(repo).shorten("example.com/page").await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_dedups_known_url() {
        let mut repo = MockMappingRepository::new();

        let existing = UrlMapping::new("known1".to_string(), "http://example.com".to_string());
        let returned = existing.clone();
        repo.expect_find_by_long_url()
            .withf(|url| url == "http://example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_insert().times(0);

        let outcome = service(repo).shorten("http://example.com").await.unwrap();

        assert!(outcome.already_existed);
        assert_eq!(outcome.mapping.short_code, "known1");
    }

    #[tokio::test]
    async fn test_shorten_retries_on_code_collision() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));

        let mut calls = 0;
        repo.expect_insert().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AppError::conflict("Short code already exists", json!({})))
            } else {
                Ok(())
            }
        });

        let outcome = service(repo).shorten("https://example.com").await.unwrap();

        assert!(!outcome.already_existed);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_bounded_retries() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Short code already exists", json!({}))));

        let err = service(repo).shorten("https://example.com").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_propagates_storage_error() {
        let mut repo = MockMappingRepository::new();

        repo.expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Storage error", json!({}))));

        let err = service(repo).shorten("https://example.com").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_redirect_returns_target_after_persisted_visit() {
        let mut repo = MockMappingRepository::new();

        repo.expect_record_visit()
            .withf(|code, _| code == "abc123")
            .times(1)
            .returning(|code, visited_at| {
                let mut mapping =
                    UrlMapping::new(code.to_string(), "http://example.com/page".to_string());
                mapping.record_visit(visited_at);
                Ok(Some(mapping))
            });

        let url = service(repo).redirect("abc123").await.unwrap();

        assert_eq!(url, "http://example.com/page");
    }

    #[tokio::test]
    async fn test_redirect_unknown_code_is_not_found() {
        let mut repo = MockMappingRepository::new();

        repo.expect_record_visit().times(1).returning(|_, _| Ok(None));

        let err = service(repo).redirect("zzzzzz").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_redirect_storage_failure_blocks_redirect() {
        let mut repo = MockMappingRepository::new();

        repo.expect_record_visit()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Storage error", json!({}))));

        let err = service(repo).redirect("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_list_mappings_passthrough() {
        let mut repo = MockMappingRepository::new();

        let mut older = UrlMapping::new("aaaaaa".to_string(), "http://a.example".to_string());
        older.record_visit(Utc::now());
        let newer = UrlMapping::new("bbbbbb".to_string(), "http://b.example".to_string());

        let listed = vec![older, newer];
        let returned = listed.clone();
        repo.expect_list_all()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let mappings = service(repo).list_mappings().await.unwrap();

        assert_eq!(mappings, listed);
    }

    #[test]
    fn test_short_url_joins_base_and_code() {
        let svc = service(MockMappingRepository::new());

        assert_eq!(
            svc.short_url("http://localhost:3000", "abc123"),
            "http://localhost:3000/abc123"
        );
        assert_eq!(
            svc.short_url("https://sho.rt/", "abc123"),
            "https://sho.rt/abc123"
        );
    }
}
