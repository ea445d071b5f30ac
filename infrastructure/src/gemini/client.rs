//! HTTP generation client for the `generateContent` endpoint.

use super::error::ProviderHttpError;
use super::protocol::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use super::schema::{describe_in_prompt, to_response_schema};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use council_application::{
    GenerationClient, GenerationRequest, ProviderError, RawCitation, RawGeneration,
};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// [`GenerationClient`] backed by a Gemini-style REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(config: &FileProviderConfig) -> Result<Self, ProviderHttpError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProviderHttpError::MissingApiKey(config.api_key_env.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderHttpError::ClientBuild)?;

        info!(model = %config.model, "Generation client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send(&self, body: &GenerateContentRequest) -> Result<RawGeneration, ProviderHttpError> {
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        parse_response(&text)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawGeneration, ProviderError> {
        let body = build_request(request, self.temperature);
        debug!(
            model = %self.model,
            grounded = request.grounded,
            structured = request.schema.is_some(),
            prompt_bytes = request.prompt.len(),
            "generateContent"
        );
        self.send(&body).await.map_err(ProviderError::from)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Build the wire request.
///
/// The endpoint rejects `responseSchema` together with the search tool, so a
/// grounded structured request carries its schema in the prompt instead.
pub fn build_request(request: &GenerationRequest, temperature: Option<f32>) -> GenerateContentRequest {
    let mut prompt = request.prompt.clone();
    let mut config = GenerationConfig {
        temperature,
        ..Default::default()
    };

    if let Some(schema) = &request.schema {
        if request.grounded {
            prompt.push_str("\n\n");
            prompt.push_str(&describe_in_prompt(schema));
        } else {
            config.response_mime_type = Some("application/json".to_string());
            config.response_schema = Some(to_response_schema(schema));
        }
    }

    let tools = if request.grounded {
        vec![json!({ "google_search": {} })]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        contents: vec![Content::user(prompt)],
        system_instruction: request.system.as_deref().map(Content::system),
        tools,
        generation_config: (!config.is_empty()).then_some(config),
    }
}

/// Extract text and grounding citations from a successful response body.
pub fn parse_response(body: &str) -> Result<RawGeneration, ProviderHttpError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ProviderHttpError::Parse(e.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(ProviderHttpError::Blocked(reason));
    };

    let text = candidate
        .content
        .as_ref()
        .map(Content::joined_text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|r| matches!(*r, "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"))
        {
            return Err(ProviderHttpError::Blocked(reason.to_string()));
        }
    }

    let citations = candidate
        .grounding_metadata
        .map(|m| {
            m.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| RawCitation {
                    title: web.title,
                    uri: web.uri,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RawGeneration { text, citations })
}

fn status_error(status: u16, body: &str) -> ProviderHttpError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| match e.error.status {
            Some(code) => format!("{} ({})", e.error.message, code),
            None => e.error.message,
        })
        .unwrap_or_else(|_| body.chars().take(200).collect());
    ProviderHttpError::Status { status, message }
}
