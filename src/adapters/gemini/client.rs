//! Gemini API Client
//!
//! HTTP client for the Gemini `generateContent` endpoint, used as the launch
//! form's coin-idea assistant and for king-of-the-hill roasts.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::GeminiSection;
use crate::ports::idea_generator::{
    prompt_for_topic, roast_prompt, CoinIdea, IdeaError, IdeaGenerator,
};
use super::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// REST API base URL
    pub api_base_url: String,
    /// Model name
    pub model: String,
    /// API key
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Number of attempts
    pub max_retries: u32,
    /// Base delay for backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl GeminiConfig {
    /// Build from the `[gemini]` section; fails if no API key is available
    pub fn from_section(section: &GeminiSection) -> Result<Self, IdeaError> {
        let api_key = section.get_api_key().ok_or_else(|| {
            IdeaError::NotConfigured("set gemini.api_key, GEMINI_API_KEY or API_KEY".to_string())
        })?;

        Ok(Self {
            api_base_url: section.api_base_url.trim_end_matches('/').to_string(),
            model: section.model.clone(),
            api_key,
            timeout: Duration::from_secs(section.timeout_secs),
            max_retries: section.max_retries.max(1),
            retry_base_delay_ms: 500,
        })
    }
}

/// Gemini text-generation client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self, IdeaError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdeaError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create a client from the `[gemini]` config section
    pub fn from_section(section: &GeminiSection) -> Result<Self, IdeaError> {
        Self::with_config(GeminiConfig::from_section(section)?)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        )
    }

    /// Send a request and return the first candidate's text
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, IdeaError> {
        let url = self.endpoint();

        let response = self
            .execute_with_retry(|| async {
                self.http
                    .post(&url)
                    .header("x-goog-api-key", &self.config.api_key)
                    .json(request)
                    .send()
                    .await
                    .map_err(|e| IdeaError::Http(e.to_string()))
            })
            .await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| IdeaError::Parse(format!("Failed to parse JSON: {}", e)))?;

        body.text().ok_or(IdeaError::EmptyResponse)
    }

    /// Execute request with retry logic and exponential backoff
    async fn execute_with_retry<F, Fut>(&self, request_fn: F) -> Result<reqwest::Response, IdeaError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, IdeaError>>,
    {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * 2u64.pow(attempt + 1),
                        );
                        tracing::warn!(
                            "Rate limited (429), backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error = Some(IdeaError::RateLimited);
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    if status.is_server_error() {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * (attempt as u64 + 1),
                        );
                        last_error = Some(IdeaError::Api(format!("Server error: {}", status)));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    if !status.is_success() {
                        let text = response.text().await.unwrap_or_default();
                        let message = serde_json::from_str::<ApiErrorBody>(&text)
                            .map(|b| b.error.describe())
                            .unwrap_or(text);
                        return Err(IdeaError::Api(format!("{}: {}", status, message)));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    tracing::debug!("Gemini request failed (attempt {}): {}", attempt + 1, e);
                    last_error = Some(e);
                    let backoff = Duration::from_millis(
                        self.config.retry_base_delay_ms * (attempt as u64 + 1),
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| IdeaError::Http("Max retries exceeded".to_string())))
    }
}

/// Parse the model's JSON answer into a coin idea
pub fn parse_coin_idea(text: &str) -> Result<CoinIdea, IdeaError> {
    // models occasionally wrap JSON in a markdown fence
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let idea: CoinIdea =
        serde_json::from_str(trimmed).map_err(|e| IdeaError::Parse(e.to_string()))?;

    if idea.name.trim().is_empty() || idea.ticker.trim().is_empty() {
        return Err(IdeaError::Parse("idea is missing a name or ticker".to_string()));
    }

    Ok(idea)
}

#[async_trait]
impl IdeaGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_coin_idea(&self, topic: &str) -> Result<CoinIdea, IdeaError> {
        let request = GenerateContentRequest::coin_idea(prompt_for_topic(topic));
        let text = self.generate(&request).await?;
        parse_coin_idea(&text)
    }

    async fn generate_roast(&self, token_name: &str) -> Result<String, IdeaError> {
        let request = GenerateContentRequest::text(roast_prompt(token_name));
        self.generate(&request).await
    }
}
