//! Feature modules backing the translator screen

pub mod form;
pub mod history;
