//! Application layer services implementing the business rules.
//!
//! Services coordinate repository calls and validation and expose a clean
//! API to the HTTP handlers. The only service here is
//! [`services::shortener_service::ShortenerService`], which owns the
//! shorten / redirect / list use cases.

pub mod services;
