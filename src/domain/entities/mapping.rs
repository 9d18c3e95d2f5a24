//! URL mapping entity binding a short code to its target URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The mapping between a short code and a long URL, plus visit metadata.
///
/// `short_code` is the unique key across the whole store. `created_at` is
/// set once at creation and never changes; `visit_count` and
/// `last_visited_at` are the only mutable fields and only move forward.
///
/// The struct serializes directly as one record of the flat-file snapshot;
/// the MongoDB backend maps it to its own BSON document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub visit_count: u64,
    pub last_visited_at: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Creates a fresh mapping with a zero visit counter.
    pub fn new(short_code: String, long_url: String) -> Self {
        Self {
            short_code,
            long_url,
            created_at: Utc::now(),
            visit_count: 0,
            last_visited_at: None,
        }
    }

    /// Records one redirect: bumps the counter and stamps the visit time.
    pub fn record_visit(&mut self, visited_at: DateTime<Utc>) {
        self.visit_count += 1;
        self.last_visited_at = Some(visited_at);
    }

    /// Returns true if the mapping has never been visited.
    pub fn never_visited(&self) -> bool {
        self.last_visited_at.is_none()
    }
}
