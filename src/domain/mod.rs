//! Domain layer containing the business entities and storage contracts.
//!
//! The domain layer has no dependency on infrastructure or presentation
//! code. It defines the [`entities::UrlMapping`] entity and the
//! [`repositories::MappingRepository`] trait that every storage backend
//! implements.

pub mod entities;
pub mod repositories;
