//! Structured generation wrapper
//!
//! Turns free-form provider output into validated typed data. Provider
//! failures are surfaced untouched and never retried here; see
//! [`RetryPolicy`] for the caller-side policy.

use crate::ports::generation::{GenerationClient, GenerationRequest, ProviderError};
use council_domain::{Citation, SchemaViolation, StructuredOutput, StructuredOutputError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    #[error(transparent)]
    SchemaViolation(SchemaViolation),
}

impl GenerationError {
    pub fn is_provider(&self) -> bool {
        matches!(self, GenerationError::Provider(_))
    }
}

impl From<StructuredOutputError> for GenerationError {
    fn from(err: StructuredOutputError) -> Self {
        match err {
            StructuredOutputError::Malformed(msg) => GenerationError::MalformedOutput(msg),
            StructuredOutputError::Violation(v) => GenerationError::SchemaViolation(v),
        }
    }
}

/// A generated value and the sources it cites.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    /// Empty unless the request was grounded
    pub citations: Vec<Citation>,
}

/// Calls the provider and decodes its output.
pub struct StructuredGenerator<C: GenerationClient + ?Sized> {
    client: Arc<C>,
}

impl<C: GenerationClient + ?Sized> Clone for StructuredGenerator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: GenerationClient + ?Sized> StructuredGenerator<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Unconstrained call; the text is returned trimmed.
    pub async fn text(
        &self,
        request: &GenerationRequest,
    ) -> Result<Generated<String>, GenerationError> {
        let raw = self.client.generate(request).await?;
        Ok(Generated {
            value: raw.text.trim().to_string(),
            citations: resolve_citations(request, raw.citations),
        })
    }

    /// Schema-constrained call. The request's schema is replaced by `T`'s.
    pub async fn structured<T: StructuredOutput>(
        &self,
        request: &GenerationRequest,
    ) -> Result<Generated<T>, GenerationError> {
        let request = request.clone().with_schema(T::schema());
        let raw = self.client.generate(&request).await?;
        let value = T::decode(&raw.text).inspect_err(|e| {
            debug!(
                "{} output rejected: {} (raw: {})",
                self.client.name(),
                e,
                council_domain::core::string::truncate(&raw.text, 200)
            );
        })?;
        Ok(Generated {
            value,
            citations: resolve_citations(&request, raw.citations),
        })
    }
}

fn resolve_citations(
    request: &GenerationRequest,
    raw: Vec<crate::ports::generation::RawCitation>,
) -> Vec<Citation> {
    if !request.grounded {
        return Vec::new();
    }
    raw.iter()
        .filter_map(|c| Citation::resolve(c.title.as_deref(), c.uri.as_deref()))
        .collect()
}

/// Caller-side retry for provider failures.
///
/// Only [`GenerationError::Provider`] is retried; malformed or off-schema
/// output is returned on first sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, GenerationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(err) if err.is_provider() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "{} failed ({}), retry {}/{}",
                        what, err, attempt, self.max_retries
                    );
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::generation::{RawCitation, RawGeneration};
    use async_trait::async_trait;
    use council_domain::{PrognosisSnapshot, Schema};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct QueueClient {
        responses: Mutex<VecDeque<Result<RawGeneration, ProviderError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl QueueClient {
        fn new(responses: Vec<Result<RawGeneration, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerationClient for QueueClient {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<RawGeneration, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Other("script exhausted".to_string())))
        }
    }

    const PROGNOSIS: &str = r#"{"short_term": "stable", "long_term": "good", "key_factors": ["age"], "confidence": 0.7}"#;

    #[tokio::test]
    async fn test_structured_strips_fence_and_attaches_schema() {
        let client = QueueClient::new(vec![Ok(RawGeneration::text(format!(
            "```json\n{}\n```",
            PROGNOSIS
        )))]);
        let generator = StructuredGenerator::new(client.clone());

        let generated = generator
            .structured::<PrognosisSnapshot>(&GenerationRequest::new("p"))
            .await
            .unwrap();
        assert_eq!(generated.value.short_term, "stable");

        let sent = client.requests.lock().unwrap();
        assert_eq!(sent[0].schema, Some(PrognosisSnapshot::schema()));
    }

    #[tokio::test]
    async fn test_missing_field_is_schema_violation() {
        let client = QueueClient::new(vec![Ok(RawGeneration::text(
            r#"{"short_term": "stable", "long_term": "good", "key_factors": []}"#,
        ))]);
        let err = StructuredGenerator::new(client)
            .structured::<PrognosisSnapshot>(&GenerationRequest::new("p"))
            .await
            .unwrap_err();
        match err {
            GenerationError::SchemaViolation(v) => {
                assert_eq!(v.field, "confidence");
                assert_eq!(v.got, "missing");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_is_malformed() {
        let client = QueueClient::new(vec![Ok(RawGeneration::text("{\"short_term\": "))]);
        let err = StructuredGenerator::new(client)
            .structured::<PrognosisSnapshot>(&GenerationRequest::new("p"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_provider_error_passes_through_without_retry() {
        let client = QueueClient::new(vec![Err(ProviderError::Timeout)]);
        let err = StructuredGenerator::new(client.clone())
            .text(&GenerationRequest::new("p"))
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Provider(ProviderError::Timeout));
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_grounded_citations_are_resolved() {
        let raw = RawGeneration {
            text: "answer".to_string(),
            citations: vec![
                RawCitation {
                    title: Some("Sepsis guideline".to_string()),
                    uri: Some("https://example.org/sepsis".to_string()),
                },
                RawCitation {
                    title: Some("No link".to_string()),
                    uri: None,
                },
                RawCitation {
                    title: None,
                    uri: Some("https://example.org/untitled".to_string()),
                },
            ],
        };
        let client = QueueClient::new(vec![Ok(raw.clone()), Ok(raw)]);
        let generator = StructuredGenerator::new(client);

        let grounded = generator
            .text(&GenerationRequest::new("p").grounded(true))
            .await
            .unwrap();
        assert_eq!(grounded.citations.len(), 2);
        assert_eq!(grounded.citations[1].title, "https://example.org/untitled");

        let plain = generator.text(&GenerationRequest::new("p")).await.unwrap();
        assert!(plain.citations.is_empty());
    }

    #[tokio::test]
    async fn test_retry_policy_retries_provider_errors_only() {
        let client = QueueClient::new(vec![
            Err(ProviderError::Timeout),
            Ok(RawGeneration::text("second time lucky")),
        ]);
        let generator = StructuredGenerator::new(client.clone());
        let policy = RetryPolicy {
            max_retries: 1,
            backoff: Duration::ZERO,
        };
        let request = GenerationRequest::new("p");
        let text = policy
            .run("turn", || generator.text(&request))
            .await
            .unwrap();
        assert_eq!(text.value, "second time lucky");

        let client = QueueClient::new(vec![
            Ok(RawGeneration::text("not json")),
            Ok(RawGeneration::text(PROGNOSIS)),
        ]);
        let generator = StructuredGenerator::new(client.clone());
        let result = policy
            .run("prognosis", || generator.structured::<PrognosisSnapshot>(&request))
            .await;
        assert!(matches!(result, Err(GenerationError::MalformedOutput(_))));
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_schema_violation_display_passes_through() {
        let err = GenerationError::SchemaViolation(SchemaViolation {
            field: "action_plan".to_string(),
            expected: Schema::array(Schema::String).type_name(),
            got: "missing".to_string(),
        });
        assert!(err.to_string().contains("action_plan"));
    }
}
