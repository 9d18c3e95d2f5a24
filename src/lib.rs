//! # urlshort
//!
//! A small URL-shortening web service with pluggable persistence.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain layer** ([`domain`]) - the [`domain::entities::UrlMapping`]
//!   entity and the storage trait
//! - **Application layer** ([`application`]) - the shortener service
//!   orchestrating validation, code generation, and collision retry
//! - **Infrastructure layer** ([`infrastructure`]) - the MongoDB and
//!   flat-file storage backends
//! - **Web layer** ([`web`]) - server-rendered HTML pages and the redirect
//!   endpoint
//!
//! ## Storage
//!
//! The backend is selected at startup via `STORAGE_BACKEND`:
//!
//! - `mongodb` - mappings live in a remote document collection; requires
//!   `MONGODB_URI`, fails fast when unreachable
//! - `file` - mappings live in memory, mirrored to a JSON snapshot rewritten
//!   atomically (temp file + rename) on every mutation
//!
//! ## Quick start
//!
//! ```bash
//! # Flat-file backend (default)
//! cargo run
//!
//! # MongoDB backend
//! export STORAGE_BACKEND=mongodb
//! export MONGODB_URI="mongodb://localhost:27017"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`]; see the
//! [`config`] module for the full list.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;
pub mod web;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ShortenOutcome, ShortenerService};
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
