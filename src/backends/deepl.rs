/*!
 * DeepL backend adapter.
 *
 * Delegates translation requests to the DeepL REST API (v2). Requests are
 * sent with `preserve_formatting` enabled and sentence splitting restricted
 * to newlines, so the service does not reflow the fragments the translator
 * hands it. Transient failures (connection errors, rate limits, server
 * errors) are retried with exponential backoff.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use url::Url;

use crate::errors::BackendError;

use super::Backend;

/// Default API endpoint (the free-tier host; paid keys use api.deepl.com)
const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com";

/// Default max retries for API requests
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default initial backoff duration in milliseconds
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;

/// Configuration for the DeepL backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    /// DeepL authentication key
    pub auth_key: String,

    /// API endpoint; empty selects the default free-tier endpoint
    #[serde(default)]
    pub endpoint: String,

    /// Maximum number of retries for transient errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration for retry in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Optional formality setting (`more`, `less`, `prefer_more`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<String>,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_initial_backoff_ms() -> u64 {
    DEFAULT_INITIAL_BACKOFF_MS
}

impl DeepLConfig {
    /// Create a configuration with defaults for the given auth key
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            endpoint: String::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            formality: None,
        }
    }
}

/// DeepL-backed [`Backend`] implementation
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// Backend configuration
    config: DeepLConfig,
}

/// Request body for `POST /v2/translate`
#[derive(Debug, Serialize)]
struct TranslateRequest {
    /// Texts to translate; the adapter always sends exactly one
    text: Vec<String>,
    /// Upper-cased source language code
    source_lang: String,
    /// Upper-cased target language code
    target_lang: String,
    /// Keep whitespace and punctuation exactly as given
    preserve_formatting: bool,
    /// Only split sentences at newlines
    split_sentences: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<String>,
}

/// Response body of `POST /v2/translate`
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslationEntry>,
}

/// One translated text in the response
#[derive(Debug, Deserialize)]
struct TranslationEntry {
    text: String,
}

impl DeepL {
    /// Create a new DeepL backend with default settings
    pub fn new(auth_key: impl Into<String>) -> Self {
        Self::with_config(DeepLConfig::new(auth_key)).expect("default DeepL configuration is valid")
    }

    /// Create a new DeepL backend from the given configuration
    pub fn with_config(config: DeepLConfig) -> anyhow::Result<Self> {
        if !config.endpoint.is_empty() {
            Url::parse(&config.endpoint)
                .map_err(|err| anyhow::anyhow!("invalid DeepL endpoint {:?}: {err}", config.endpoint))?;
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    fn api_url(&self) -> String {
        let endpoint = if self.config.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            &self.config.endpoint
        };
        format!("{}/v2/translate", endpoint.trim_end_matches('/'))
    }

    fn build_request(&self, text: &str, source_lang: &str, target_lang: &str) -> TranslateRequest {
        TranslateRequest {
            text: vec![text.to_string()],
            source_lang: source_lang.to_uppercase(),
            target_lang: target_lang.to_uppercase(),
            preserve_formatting: true,
            split_sentences: "nonewlines".to_string(),
            formality: self.config.formality.clone(),
        }
    }

    /// Send a request to the DeepL API with retry logic
    async fn send_request_with_retry(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, BackendError> {
        let api_url = self.api_url();
        let mut attempts = 0;
        let mut last_error = None;

        while attempts <= self.config.max_retries {
            if attempts > 0 {
                let backoff_ms = self.config.initial_backoff_ms * 2u64.pow(attempts - 1);
                warn!("deepl: retrying request (attempt {attempts}) after {backoff_ms}ms");
                sleep(Duration::from_millis(backoff_ms)).await;
            }

            attempts += 1;

            match self.send_request(&api_url, request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    // Only retry on connection errors, rate limits and
                    // server errors.
                    match &err {
                        BackendError::ConnectionError(_) | BackendError::RateLimitExceeded(_) => {
                            last_error = Some(err);
                        }
                        BackendError::ApiError { status_code, .. } if *status_code >= 500 => {
                            last_error = Some(err);
                        }
                        _ => return Err(err),
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| BackendError::ConnectionError("all retry attempts failed".to_string())))
    }

    /// Send a single request to the DeepL API
    async fn send_request(
        &self,
        api_url: &str,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, BackendError> {
        let response = self
            .client
            .post(api_url)
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.config.auth_key),
            )
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    BackendError::ConnectionError(format!("request timed out: {err}"))
                } else if err.is_connect() {
                    BackendError::ConnectionError(format!("connection failed: {err}"))
                } else {
                    BackendError::RequestFailed(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to get error response text".to_string());

            return match status.as_u16() {
                429 | 456 => Err(BackendError::RateLimitExceeded(error_text)),
                401 | 403 => Err(BackendError::AuthenticationError(error_text)),
                _ => Err(BackendError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                }),
            };
        }

        response
            .json::<TranslateResponse>()
            .await
            .map_err(|err| BackendError::ParseError(err.to_string()))
    }
}

#[async_trait]
impl Backend for DeepL {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, BackendError> {
        let request = self.build_request(text, source_lang, target_lang);
        debug!(
            "deepl: translating {} bytes {} -> {}",
            text.len(),
            request.source_lang,
            request.target_lang
        );

        let response = self.send_request_with_retry(&request).await?;
        response
            .translations
            .into_iter()
            .next()
            .map(|entry| entry.text)
            .ok_or_else(|| BackendError::ParseError("empty translations array".to_string()))
    }
}
