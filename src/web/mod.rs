//! Server-rendered web surface.
//!
//! Thin HTTP plumbing over the shortener service: the landing page with
//! the shorten form and mappings table, the form handler, and the redirect
//! endpoint. Templates live under `templates/` and render via askama.

pub mod handlers;
pub mod middleware;
