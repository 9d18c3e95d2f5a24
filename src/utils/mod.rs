//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - random short code generation
//! - [`url_validator`] - well-formedness checks for submitted URLs

pub mod code_generator;
pub mod url_validator;
