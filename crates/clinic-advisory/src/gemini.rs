//! Gemini `generateContent` backend over reqwest.
//!
//! Transport failures map onto [`AdvisoryError`]: refused connections become
//! `Connection`, non-2xx replies `Service`, and undecodable bodies
//! `ResponseParsing`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{AdvisoryError, AdvisoryResult, GenerationRequest, GenerativeBackend};

/// HTTP backend for the Gemini `generateContent` endpoint.
///
/// No request timeout is set; a call is bounded only by the transport.
pub struct GeminiBackend {
    base_url: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

/// Request body for /v1beta/models/{model}:generateContent
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

/// Response body from generateContent
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. Empty if none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn build_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        }),
    }
}

impl GenerativeBackend for GeminiBackend {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerationRequest,
    ) -> AdvisoryResult<String> {
        let url = self.endpoint(model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&build_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AdvisoryError::Connection(self.base_url.clone())
                } else {
                    AdvisoryError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AdvisoryError::ResponseParsing(e.to_string()))?;

        Ok(parsed.text())
    }
}
