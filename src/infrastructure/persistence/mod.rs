//! Storage backend implementations.
//!
//! Concrete implementations of the domain's
//! [`crate::domain::repositories::MappingRepository`] trait. The backend is
//! chosen once at startup from configuration:
//!
//! - [`MongoMappingRepository`] - remote MongoDB document collection
//! - [`FileMappingRepository`] - in-memory map mirrored to a JSON snapshot

pub mod file_mapping_repository;
pub mod mongo_mapping_repository;

pub use file_mapping_repository::FileMappingRepository;
pub use mongo_mapping_repository::MongoMappingRepository;
