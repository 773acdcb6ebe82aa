//! Translation modules
//!
//! The static language catalog and the client for the remote translation
//! endpoint. Translation itself happens on the server; this side only builds
//! the request and picks the translated string out of the response.

pub mod catalog;
pub mod client;

pub use client::{TranslateError, TranslationClient};
