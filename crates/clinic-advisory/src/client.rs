//! Advisory client: the two generative features with failures normalized.
//!
//! Neither public operation returns an error. A missing credential
//! short-circuits before the backend is touched; any backend or parsing
//! failure is logged and mapped to `None` or a fixed sentinel string.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use clinic_core::workflow::RegistrationForm;
use serde_json::Value;
use thiserror::Error;

use crate::config::AdvisoryConfig;
use crate::extraction::{parse_synthetic_patient, SyntheticPatient};
use crate::gemini::GeminiBackend;
use crate::prompts::{make_clinical_note_prompt, synthetic_patient_schema, SYNTHETIC_PATIENT_PROMPT};

/// Returned by `suggest_clinical_note` when no credential is configured.
pub const UNAVAILABLE_SENTINEL: &str = "AI Service Unavailable (Missing API Key)";

/// Returned by `suggest_clinical_note` when the call fails.
pub const FAILED_SENTINEL: &str = "Error generating clinical suggestion.";

/// Returned by `suggest_clinical_note` when the service replies with nothing.
pub const EMPTY_SENTINEL: &str = "No suggestion generated.";

/// Backend errors. Never surfaced by [`AdvisoryClient`].
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Cannot connect to generative service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Generative service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

/// One generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// JSON schema for a structured reply; `None` for free text
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

/// Transport to a generative text service.
///
/// One attempt per call; implementations do not retry.
#[allow(async_fn_in_trait)]
pub trait GenerativeBackend {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerationRequest,
    ) -> AdvisoryResult<String>;
}

/// Stateless adapter for patient autofill and clinical suggestions.
pub struct AdvisoryClient<B = GeminiBackend> {
    config: AdvisoryConfig,
    backend: B,
}

impl AdvisoryClient<GeminiBackend> {
    /// Client talking to the configured Gemini endpoint.
    pub fn from_config(config: AdvisoryConfig) -> Self {
        let backend = GeminiBackend::new(config.base_url());
        Self { config, backend }
    }
}

impl<B: GenerativeBackend> AdvisoryClient<B> {
    pub fn with_backend(config: AdvisoryConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Whether calls will reach the backend at all.
    pub fn is_available(&self) -> bool {
        self.config.has_credential()
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ask for a synthetic patient profile.
    ///
    /// `None` means "no autofill available": no credential, a failed call, or
    /// a reply that does not match the schema.
    pub async fn generate_synthetic_patient(&self) -> Option<SyntheticPatient> {
        let api_key = self.config.api_key()?;
        let request =
            GenerationRequest::structured(SYNTHETIC_PATIENT_PROMPT, synthetic_patient_schema());

        let text = match self
            .backend
            .generate(api_key, self.config.model(), &request)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "synthetic patient generation failed");
                return None;
            }
        };

        match parse_synthetic_patient(&text) {
            Ok(patient) => Some(patient),
            Err(e) => {
                tracing::error!(error = %e, "synthetic patient reply rejected");
                None
            }
        }
    }

    /// Fill `form` from a synthetic profile. Returns false and leaves the form
    /// untouched when none is available.
    pub async fn autofill_registration(&self, form: &mut RegistrationForm) -> bool {
        match self.generate_synthetic_patient().await {
            Some(patient) => {
                patient.fill(form);
                true
            }
            None => false,
        }
    }

    /// Ask for a diagnosis / tests / treatment suggestion.
    ///
    /// Always resolves to a string; failures become one of the sentinels.
    pub async fn suggest_clinical_note(&self, notes: &str, history: &str) -> String {
        let Some(api_key) = self.config.api_key() else {
            return UNAVAILABLE_SENTINEL.to_string();
        };
        let request = GenerationRequest::text(make_clinical_note_prompt(notes, history));

        match self
            .backend
            .generate(api_key, self.config.model(), &request)
            .await
        {
            Ok(text) if text.is_empty() => EMPTY_SENTINEL.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "clinical suggestion failed");
                FAILED_SENTINEL.to_string()
            }
        }
    }
}

/// Scripted backend for tests. Replies are consumed in order and every call
/// is counted.
#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<AdvisoryResult<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose first call returns `text`.
    pub fn replying(text: &str) -> Self {
        Self::new().then_reply(Ok(text.to_string()))
    }

    /// Backend whose first call fails with `error`.
    pub fn failing(error: AdvisoryError) -> Self {
        Self::new().then_reply(Err(error))
    }

    /// Queue another reply.
    pub fn then_reply(self, reply: AdvisoryResult<String>) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Number of times `generate` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl GenerativeBackend for MockBackend {
    async fn generate(
        &self,
        _api_key: &str,
        _model: &str,
        request: &GenerationRequest,
    ) -> AdvisoryResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(AdvisoryError::Http("no scripted reply".into())))
    }
}
