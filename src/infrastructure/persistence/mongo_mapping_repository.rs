//! MongoDB implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, map_mongo_error};

/// Bounded timeout for connecting and for server selection, so a dead
/// database stalls a request for seconds rather than forever.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

const COLLECTION_NAME: &str = "mappings";

/// BSON document shape stored in the `mappings` collection.
///
/// Timestamps are epoch milliseconds and the counter is an `i64` because
/// BSON has no unsigned integers; conversion to the domain entity happens
/// at the repository boundary.
#[derive(Debug, Serialize, Deserialize)]
struct MappingDocument {
    short_code: String,
    long_url: String,
    created_at: i64,
    visit_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_visited_at: Option<i64>,
}

impl From<&UrlMapping> for MappingDocument {
    fn from(mapping: &UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code.clone(),
            long_url: mapping.long_url.clone(),
            created_at: mapping.created_at.timestamp_millis(),
            visit_count: mapping.visit_count as i64,
            last_visited_at: mapping.last_visited_at.map(|t| t.timestamp_millis()),
        }
    }
}

impl MappingDocument {
    fn into_entity(self) -> Result<UrlMapping, AppError> {
        let created_at = millis_to_datetime(self.created_at)?;
        let last_visited_at = self.last_visited_at.map(millis_to_datetime).transpose()?;

        Ok(UrlMapping {
            short_code: self.short_code,
            long_url: self.long_url,
            created_at,
            visit_count: self.visit_count.max(0) as u64,
            last_visited_at,
        })
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        AppError::internal(
            "Stored timestamp out of range",
            json!({ "timestamp_millis": millis }),
        )
    })
}

/// MongoDB-backed mapping store.
///
/// Every operation is a network round trip against one document. The
/// server guarantees per-document atomicity and the unique index keeps
/// short codes from colliding, but there is no cross-document transaction:
/// [`MappingRepository::record_visit`] reads then writes, so two
/// simultaneous redirects to the same code can lose an increment. That
/// race is an accepted limitation of this backend.
pub struct MongoMappingRepository {
    collection: Collection<MappingDocument>,
}

impl MongoMappingRepository {
    /// Connects to the database, verifies it is reachable, and ensures the
    /// unique index on `short_code` exists.
    ///
    /// # Errors
    ///
    /// Fails fast (startup error) when the URI is malformed or the server
    /// does not answer a ping within [`OPERATION_TIMEOUT`].
    pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(OPERATION_TIMEOUT);
        options.server_selection_timeout = Some(OPERATION_TIMEOUT);

        let client = Client::with_options(options)?;
        let db = client.database(database);

        db.run_command(doc! { "ping": 1 }).await?;

        let collection = db.collection::<MappingDocument>(COLLECTION_NAME);

        let index = IndexModel::builder()
            .keys(doc! { "short_code": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await?;

        Ok(Self { collection })
    }
}

#[async_trait]
impl MappingRepository for MongoMappingRepository {
    async fn insert(&self, mapping: UrlMapping) -> Result<(), AppError> {
        self.collection
            .insert_one(MappingDocument::from(&mapping))
            .await
            .map_err(map_mongo_error)?;

        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.collection
            .find_one(doc! { "short_code": code })
            .await
            .map_err(map_mongo_error)?
            .map(MappingDocument::into_entity)
            .transpose()
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        self.collection
            .find_one(doc! { "long_url": long_url })
            .await
            .map_err(map_mongo_error)?
            .map(MappingDocument::into_entity)
            .transpose()
    }

    async fn update(&self, mapping: &UrlMapping) -> Result<(), AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "short_code": &mapping.short_code },
                doc! { "$set": {
                    "visit_count": mapping.visit_count as i64,
                    "last_visited_at": mapping.last_visited_at.map(|t| t.timestamp_millis()),
                } },
            )
            .await
            .map_err(map_mongo_error)?;

        if result.matched_count == 0 {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": mapping.short_code }),
            ));
        }

        Ok(())
    }

    async fn record_visit(
        &self,
        code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<UrlMapping>, AppError> {
        // Read-then-write in two round trips. Concurrent visits to the same
        // code can overwrite each other's increment; see the struct docs.
        let Some(mut mapping) = self.find_by_code(code).await? else {
            return Ok(None);
        };

        mapping.record_visit(visited_at);
        self.update(&mapping).await?;

        Ok(Some(mapping))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(map_mongo_error)?;

        let mut mappings = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(map_mongo_error)? {
            mappings.push(document.into_entity()?);
        }

        Ok(mappings)
    }
}
