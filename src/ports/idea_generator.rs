//! Idea Generator Port
//!
//! Trait for the text-generation collaborator behind the launch form's
//! "AI assistant" and the board's king roast. Failures never leave this
//! boundary as errors: callers get an [`IdeaOutcome`] that says whether the
//! fallback was used.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Fallback roast when generation fails
pub const FALLBACK_ROAST: &str = "To the moon?";

/// Roast used when generation succeeds with an empty reply
pub const EMPTY_ROAST: &str = "LFG!";

/// Errors from an idea generator
#[derive(Debug, Error)]
pub enum IdeaError {
    /// No API key or endpoint configured
    #[error("Idea generator not configured: {0}")]
    NotConfigured(String),

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Rate limited by the provider
    #[error("Rate limited, try again later")]
    RateLimited,

    /// Provider returned an error status
    #[error("API error: {0}")]
    Api(String),

    /// Provider returned no text
    #[error("No text returned from generator")]
    EmptyResponse,

    /// Text was not a valid idea
    #[error("Failed to parse idea: {0}")]
    Parse(String),
}

/// A coin idea: name, ticker and launch description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinIdea {
    pub name: String,
    pub ticker: String,
    pub description: String,
}

impl CoinIdea {
    /// The fixed idea substituted when generation fails
    pub fn fallback() -> Self {
        Self {
            name: "Error Coin".to_string(),
            ticker: "ERR".to_string(),
            description: "The AI is sleeping. Be the creative one yourself!".to_string(),
        }
    }
}

/// Result of asking for a coin idea
#[derive(Debug, Clone, PartialEq)]
pub enum IdeaOutcome {
    /// The generator produced an idea
    Generated(CoinIdea),
    /// The generator failed; `idea` is the fixed fallback
    Fallback { idea: CoinIdea, reason: String },
}

impl IdeaOutcome {
    pub fn idea(&self) -> &CoinIdea {
        match self {
            IdeaOutcome::Generated(idea) => idea,
            IdeaOutcome::Fallback { idea, .. } => idea,
        }
    }

    pub fn into_idea(self) -> CoinIdea {
        match self {
            IdeaOutcome::Generated(idea) => idea,
            IdeaOutcome::Fallback { idea, .. } => idea,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, IdeaOutcome::Fallback { .. })
    }
}

/// Text-generation collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaGenerator: Send + Sync {
    /// Get the name of this generator
    fn name(&self) -> &str;

    /// Generate a coin idea for a topic (empty topic = surprise me)
    async fn generate_coin_idea(&self, topic: &str) -> Result<CoinIdea, IdeaError>;

    /// One-sentence hype or skepticism about a token launch
    async fn generate_roast(&self, token_name: &str) -> Result<String, IdeaError>;
}

/// Prompt sent for a coin idea
pub fn prompt_for_topic(topic: &str) -> String {
    format!(
        "Generate a creative, funny, and viral-worthy meme coin idea based on this topic: \"{}\". \
         If the topic is empty, come up with something random and internet-culture related.",
        topic.trim()
    )
}

/// Prompt sent for a launch roast
pub fn roast_prompt(token_name: &str) -> String {
    format!(
        "Write a very short, one-sentence \"degen\" style reaction to a new coin launch called \"{}\". \
         It should be either hype or skepticism, using crypto slang.",
        token_name
    )
}

/// Ask for a coin idea, substituting the fallback on any failure
pub async fn coin_idea_or_fallback(generator: &dyn IdeaGenerator, topic: &str) -> IdeaOutcome {
    match generator.generate_coin_idea(topic).await {
        Ok(idea) => IdeaOutcome::Generated(idea),
        Err(e) => {
            warn!("Failed to generate coin idea via {}: {}", generator.name(), e);
            IdeaOutcome::Fallback {
                idea: CoinIdea::fallback(),
                reason: e.to_string(),
            }
        }
    }
}

/// Ask for a roast, substituting fixed text on failure or empty output
pub async fn roast_or_fallback(generator: &dyn IdeaGenerator, token_name: &str) -> String {
    match generator.generate_roast(token_name).await {
        Ok(text) if text.trim().is_empty() => EMPTY_ROAST.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Failed to generate roast via {}: {}", generator.name(), e);
            FALLBACK_ROAST.to_string()
        }
    }
}

/// Generator that always fails as not configured. Used when no API key is set.
pub struct OfflineIdeaGenerator;

#[async_trait]
impl IdeaGenerator for OfflineIdeaGenerator {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate_coin_idea(&self, _topic: &str) -> Result<CoinIdea, IdeaError> {
        Err(IdeaError::NotConfigured("no API key set".to_string()))
    }

    async fn generate_roast(&self, _token_name: &str) -> Result<String, IdeaError> {
        Err(IdeaError::NotConfigured("no API key set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_idea_passes_through() {
        let mut mock = MockIdeaGenerator::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_generate_coin_idea()
            .withf(|topic| topic == "sad hamster")
            .times(1)
            .returning(|_| {
                Ok(CoinIdea {
                    name: "Sad Hamster".to_string(),
                    ticker: "HAMMY".to_string(),
                    description: "He is tired.".to_string(),
                })
            });

        let outcome = coin_idea_or_fallback(&mock, "sad hamster").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.idea().ticker, "HAMMY");
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let mut mock = MockIdeaGenerator::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_generate_coin_idea()
            .returning(|_| Err(IdeaError::RateLimited));

        let outcome = coin_idea_or_fallback(&mock, "anything").await;
        assert!(outcome.is_fallback());
        if let IdeaOutcome::Fallback { reason, .. } = &outcome {
            assert!(reason.contains("Rate limited"));
        }

        let idea = outcome.into_idea();
        assert_eq!(idea.name, "Error Coin");
        assert_eq!(idea.ticker, "ERR");
        assert_eq!(idea.description, "The AI is sleeping. Be the creative one yourself!");
    }

    #[tokio::test]
    async fn test_roast_fallbacks() {
        let mut mock = MockIdeaGenerator::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_generate_roast()
            .withf(|name| name == "Empty")
            .returning(|_| Ok("   ".to_string()));
        mock.expect_generate_roast()
            .withf(|name| name == "Broken")
            .returning(|_| Err(IdeaError::EmptyResponse));

        assert_eq!(roast_or_fallback(&mock, "Empty").await, EMPTY_ROAST);
        assert_eq!(roast_or_fallback(&mock, "Broken").await, FALLBACK_ROAST);
    }

    #[tokio::test]
    async fn test_offline_generator_falls_back() {
        let outcome = coin_idea_or_fallback(&OfflineIdeaGenerator, "").await;
        assert_eq!(outcome.idea(), &CoinIdea::fallback());
    }

    #[test]
    fn test_prompt_mentions_topic() {
        let prompt = prompt_for_topic("  frog wizard ");
        assert!(prompt.contains("\"frog wizard\""));
        assert!(roast_prompt("MEOW").contains("\"MEOW\""));
    }
}
