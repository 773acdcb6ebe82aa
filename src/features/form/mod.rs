//! Form module - the transient state behind the translator screen
//!
//! This module provides:
//! - Source/target text with the character cap applied on every edit
//! - The selected language pair, swap and history reuse
//! - The translate phase machine that keeps one request in flight

pub mod state;

// Re-export commonly used types
pub use state::{FormState, Rejection, TranslationRequest, DEFAULT_MAX_CHARS};
