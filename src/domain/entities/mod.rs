//! Core domain entities.

pub mod mapping;

pub use mapping::UrlMapping;
