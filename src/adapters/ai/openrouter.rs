//! OpenRouter client - structured-output calls to a hosted model.
//!
//! Both ports (question generation and analysis) go through the same
//! chat-completions endpoint with `response_format: json_schema`, so the
//! model either returns a schema-conforming object or the call fails.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenRouterConfig::new(api_key)
//!     .with_model("google/gemini-3-flash-preview")
//!     .with_max_retries(2);
//!
//! let client = OpenRouterClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::decision::{Analysis, Question};
use crate::domain::foundation::QuestionCount;
use crate::ports::{AiError, DecisionAnalyst, QuestionGenerator};

use super::prompts;
use super::schema;

/// Default model; the structured-output flows were tuned against it.
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// Configuration for the OpenRouter client.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenRouterConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenRouter API client implementing both AI ports.
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the HTTP client cannot be constructed
    pub fn new(config: OpenRouterConfig) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::InvalidRequest(format!("HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Runs one structured-output completion, retrying transient failures.
    ///
    /// Returns the raw JSON content of the first choice; schema parsing
    /// happens at the call sites where the expected shape is known.
    async fn structured_completion(
        &self,
        schema_name: &str,
        json_schema: Value,
        prompt: String,
    ) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name,
                    strict: true,
                    schema: json_schema,
                },
            },
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&request).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = retry_delay(&e, attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "transient model error, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, request: &ChatRequest<'_>) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AiError::network(format!("Connection failed: {e}"))
                } else {
                    AiError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::schema_mismatch(format!("Failed to parse response: {e}")))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::schema_mismatch("No choices in response"))?;

        if choice.finish_reason.as_deref() == Some("length") {
            return Err(AiError::schema_mismatch("reply truncated before completion"));
        }

        Ok(choice.message.content)
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AiError::AuthenticationFailed),
            429 => Err(AiError::rate_limited(parse_retry_after(&error_body))),
            400..=499 => Err(AiError::InvalidRequest(error_body)),
            500..=599 => Err(AiError::unavailable(format!(
                "Server error {status}: {error_body}"
            ))),
            _ => Err(AiError::network(format!(
                "Unexpected status {status}: {error_body}"
            ))),
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenRouterClient {
    async fn generate(
        &self,
        prompt: &str,
        count: QuestionCount,
    ) -> Result<Vec<Question>, AiError> {
        tracing::info!(count = count.value(), "generating question deck");
        let content = self
            .structured_completion(
                "decision_questions",
                schema::questions_schema(count.value()),
                prompts::question_generation(prompt, count.value()),
            )
            .await?;
        schema::parse_questions(&content, count.value())
    }
}

#[async_trait]
impl DecisionAnalyst for OpenRouterClient {
    async fn analyze(
        &self,
        prompt: &str,
        questions: &[Question],
        answers: &[bool],
    ) -> Result<Analysis, AiError> {
        if questions.len() != answers.len() {
            return Err(AiError::InvalidRequest(format!(
                "{} questions but {} answers",
                questions.len(),
                answers.len()
            )));
        }

        tracing::info!(answered = answers.len(), "requesting decision analysis");
        let content = self
            .structured_completion(
                "decision_analysis",
                schema::ANALYSIS_SCHEMA.clone(),
                prompts::analysis(prompt, questions, answers),
            )
            .await?;
        schema::parse_analysis(&content)
    }
}

/// Backoff for a retry attempt, honoring rate-limit hints up to a cap.
fn retry_delay(error: &AiError, attempt: u32) -> Duration {
    match error {
        AiError::RateLimited { retry_after_secs } => {
            Duration::from_secs(u64::from(*retry_after_secs).min(10))
        }
        _ => Duration::from_millis(500 * 2u64.pow(attempt.min(3))),
    }
}

/// Pulls a "try again in Xs" hint out of an error body, defaulting to 30s.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

// ════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
