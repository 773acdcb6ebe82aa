use thiserror::Error;

use crate::features::history::HistoryRecord;
use crate::translation::catalog::{self, AUTO_DETECT, SWAP_FALLBACK};

/// Default cap on source text length, in characters
pub const DEFAULT_MAX_CHARS: usize = 500;

/// Lifecycle of the translate action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslatePhase {
    #[default]
    Idle,
    Translating,
    Done,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("a translation is already in flight")]
    AlreadyTranslating,
    #[error("no translation is in flight")]
    NotTranslating,
}

impl TranslatePhase {
    pub fn is_busy(self) -> bool {
        self == TranslatePhase::Translating
    }

    /// Idle, Done or Failed -> Translating
    pub fn begin(&mut self) -> Result<(), PhaseError> {
        if self.is_busy() {
            return Err(PhaseError::AlreadyTranslating);
        }
        *self = TranslatePhase::Translating;
        Ok(())
    }

    /// Translating -> Done or Failed
    pub fn finish(&mut self, succeeded: bool) -> Result<(), PhaseError> {
        if !self.is_busy() {
            return Err(PhaseError::NotTranslating);
        }
        *self = if succeeded {
            TranslatePhase::Done
        } else {
            TranslatePhase::Failed
        };
        Ok(())
    }
}

/// Why the form refused to produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    EmptySource,
    SameLanguage,
    AutoTarget,
}

/// Everything the translation client needs for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// The live translator form
#[derive(Debug, Clone)]
pub struct FormState {
    source_text: String,
    target_text: String,
    source_lang: String,
    target_lang: String,
    max_chars: usize,
    phase: TranslatePhase,
}

impl FormState {
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        max_chars: usize,
    ) -> Self {
        Self {
            source_text: String::new(),
            target_text: String::new(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            max_chars: max_chars.max(1),
            phase: TranslatePhase::Idle,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn phase(&self) -> TranslatePhase {
        self.phase
    }

    pub fn phase_mut(&mut self) -> &mut TranslatePhase {
        &mut self.phase
    }

    /// Replace the source text, truncating anything past the cap
    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
        self.enforce_char_limit();
    }

    pub fn push_char(&mut self, c: char) {
        self.source_text.push(c);
        self.enforce_char_limit();
    }

    /// Append pasted text; whatever does not fit is dropped
    pub fn insert_str(&mut self, text: &str) {
        self.source_text.push_str(text);
        self.enforce_char_limit();
    }

    pub fn pop_char(&mut self) {
        self.source_text.pop();
    }

    pub fn clear_source(&mut self) {
        self.source_text.clear();
    }

    pub fn set_target_text(&mut self, text: impl Into<String>) {
        self.target_text = text.into();
    }

    pub fn cycle_source_lang(&mut self, step: isize) {
        self.source_lang =
            catalog::cycle(catalog::source_languages(), &self.source_lang, step).to_string();
    }

    pub fn cycle_target_lang(&mut self, step: isize) {
        self.target_lang =
            catalog::cycle(catalog::target_languages(), &self.target_lang, step).to_string();
    }

    pub fn char_count(&self) -> usize {
        self.source_text.chars().count()
    }

    /// Counter text, e.g. `42 / 500`
    pub fn char_count_label(&self) -> String {
        format!("{} / {}", self.char_count(), self.max_chars)
    }

    pub fn trimmed_source(&self) -> &str {
        self.source_text.trim()
    }

    /// Whether the translate control is enabled
    pub fn can_translate(&self) -> bool {
        !self.phase.is_busy() && !self.trimmed_source().is_empty()
    }

    /// Validate the form and build a request from it
    pub fn prepare_request(&self) -> Result<TranslationRequest, Rejection> {
        if self.phase.is_busy() {
            return Err(Rejection::Busy);
        }

        let text = self.trimmed_source();
        if text.is_empty() {
            return Err(Rejection::EmptySource);
        }
        if self.source_lang == self.target_lang {
            return Err(Rejection::SameLanguage);
        }
        if self.target_lang == AUTO_DETECT {
            return Err(Rejection::AutoTarget);
        }

        Ok(TranslationRequest {
            text: text.to_string(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        })
    }

    /// Exchange the language pair and move the translation into the source.
    ///
    /// Returns `false` without touching anything when the target is `auto`.
    pub fn swap(&mut self) -> bool {
        if self.target_lang == AUTO_DETECT {
            return false;
        }

        let previous_source = std::mem::take(&mut self.source_lang);
        self.source_lang = std::mem::take(&mut self.target_lang);
        self.target_lang = if previous_source == AUTO_DETECT {
            SWAP_FALLBACK.to_string()
        } else {
            previous_source
        };

        if !self.target_text.is_empty() {
            self.source_text = std::mem::take(&mut self.target_text);
            self.enforce_char_limit();
        }

        true
    }

    /// Load a history record back into the form
    pub fn apply_record(&mut self, record: &HistoryRecord) {
        self.target_text = record.translated_text.clone();
        self.source_lang = record.source_lang.clone();
        self.target_lang = record.target_lang.clone();
        self.set_source_text(record.source_text.clone());
    }

    fn enforce_char_limit(&mut self) {
        if let Some((byte_index, _)) = self.source_text.char_indices().nth(self.max_chars) {
            self.source_text.truncate(byte_index);
        }
    }
}
