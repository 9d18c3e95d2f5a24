//! Repository trait for short URL mapping storage.

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage interface for URL mappings.
///
/// The only shared state in the system lives behind this trait. Two
/// backends implement it:
///
/// - [`crate::infrastructure::persistence::MongoMappingRepository`] - a
///   remote document collection, every call a network round trip
/// - [`crate::infrastructure::persistence::FileMappingRepository`] - an
///   in-memory map mirrored to a JSON snapshot file
///
/// Mock implementations are generated with `cfg(test)` for service tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Adds a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists and
    /// [`AppError::Internal`] on backend failures. A failed insert leaves
    /// the store unchanged.
    async fn insert(&self, mapping: UrlMapping) -> Result<(), AppError>;

    /// Looks up a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Looks up a mapping by its long URL.
    ///
    /// Used by the dedup-on-submit policy: a URL that was already shortened
    /// resolves to its existing code instead of a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend failures.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Replaces the mutable fields (`visit_count`, `last_visited_at`) of an
    /// existing mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping carries the short code
    /// and [`AppError::Internal`] on backend failures. A failed update
    /// leaves the prior state in place.
    async fn update(&self, mapping: &UrlMapping) -> Result<(), AppError>;

    /// Registers one visit to a short code as a single store operation:
    /// increments `visit_count`, sets `last_visited_at`, persists, and
    /// returns the updated mapping. `Ok(None)` means the code is unknown.
    ///
    /// The file backend holds its write lock across the whole
    /// read-increment-write, so concurrent visits to one code never lose
    /// updates. The MongoDB backend reads then writes in two round trips;
    /// concurrent visits there can lose increments, a documented limitation
    /// of that backend.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the visit could not be persisted;
    /// the caller must not redirect in that case.
    async fn record_visit(
        &self,
        code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Lists every stored mapping, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend failures.
    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError>;
}
