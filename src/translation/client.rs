use anyhow::Context;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::catalog::AUTO_DETECT;

/// Public MyMemory endpoint
pub const DEFAULT_API_URL: &str = "https://api.mymemory.translated.net/get";

/// JSON pointer to the translated string in a MyMemory response
const TRANSLATED_TEXT_POINTER: &str = "/responseData/translatedText";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid translation request: {0}")]
    InvalidRequest(&'static str),
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("translation service returned {0}")]
    HttpStatus(StatusCode),
    #[error("translation service returned a non-JSON body: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("translation missing from service response")]
    MissingTranslation,
}

/// Adapter for the remote translation endpoint
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    api_url: String,
}

impl TranslationClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quick-translate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Translate `text` from `source_lang` (which may be `auto`) to `target_lang`.
    ///
    /// Makes exactly one request; nothing is retried.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::InvalidRequest("source text is empty"));
        }
        if target_lang == AUTO_DETECT {
            return Err(TranslateError::InvalidRequest(
                "auto-detect cannot be a target language",
            ));
        }

        let langpair = language_pair(source_lang, target_lang);
        debug!(%langpair, chars = text.chars().count(), "sending translation request");

        let response = self
            .http
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::HttpStatus(status));
        }

        let body = response.text().await?;
        extract_translation(&body)
    }
}

/// Build the `source|target` pair the endpoint expects
pub fn language_pair(source_lang: &str, target_lang: &str) -> String {
    format!("{source_lang}|{target_lang}")
}

/// Pull `responseData.translatedText` out of a response body
fn extract_translation(body: &str) -> Result<String, TranslateError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(TranslateError::Malformed)?;

    match json.pointer(TRANSLATED_TEXT_POINTER).and_then(|v| v.as_str()) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(TranslateError::MissingTranslation),
    }
}
