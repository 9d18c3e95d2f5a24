//! Submitted URL validation.
//!
//! Checks a shorten request for minimal well-formedness before anything is
//! stored. Validation is deliberately shallow: the URL must parse, carry an
//! `http` or `https` scheme, and name a host. The target is stored exactly
//! as submitted.

use url::Url;

/// Errors produced when a submitted URL fails validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidFormat(String),

    #[error("URL must include an http:// or https:// scheme")]
    UnsupportedScheme,

    #[error("Invalid URL: missing host")]
    MissingHost,
}

/// Validates a raw URL string.
///
/// # Errors
///
/// - [`UrlValidationError::InvalidFormat`] when the input does not parse as
///   an absolute URL (this covers scheme-less inputs like `example.com`)
/// - [`UrlValidationError::UnsupportedScheme`] for schemes other than
///   `http` / `https` (`ftp:`, `javascript:`, `data:`, ...)
/// - [`UrlValidationError::MissingHost`] when the host component is empty
pub fn validate_url(raw_url: &str) -> Result<(), UrlValidationError> {
    let parsed =
        Url::parse(raw_url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedScheme),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
