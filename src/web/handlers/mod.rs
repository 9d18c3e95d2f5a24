//! HTTP request handlers for the server-rendered web surface.

pub mod home;
pub mod redirect;
pub mod shorten;

pub use home::home_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
