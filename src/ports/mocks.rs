use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::idea_generator::{CoinIdea, IdeaError, IdeaGenerator};

/// Mock idea generator that records calls and allows controlled responses
#[derive(Debug, Default, Clone)]
pub struct MockIdeas {
    calls: Arc<Mutex<Vec<String>>>,
    ideas: Arc<Mutex<HashMap<String, CoinIdea>>>,
    roasts: Arc<Mutex<HashMap<String, String>>>,
}

impl MockIdeas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the idea returned for a topic
    pub fn with_idea(self, topic: &str, idea: CoinIdea) -> Self {
        self.ideas.lock().unwrap().insert(topic.to_string(), idea);
        self
    }

    /// Builder method to set the roast returned for a token name
    pub fn with_roast(self, token_name: &str, roast: &str) -> Self {
        self.roasts.lock().unwrap().insert(token_name.to_string(), roast.to_string());
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdeaGenerator for MockIdeas {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_coin_idea(&self, topic: &str) -> Result<CoinIdea, IdeaError> {
        self.calls.lock().unwrap().push(format!("idea:{}", topic));
        self.ideas
            .lock()
            .unwrap()
            .get(topic)
            .cloned()
            .ok_or_else(|| IdeaError::Api("No response configured".to_string()))
    }

    async fn generate_roast(&self, token_name: &str) -> Result<String, IdeaError> {
        self.calls.lock().unwrap().push(format!("roast:{}", token_name));
        self.roasts
            .lock()
            .unwrap()
            .get(token_name)
            .cloned()
            .ok_or_else(|| IdeaError::Api("No response configured".to_string()))
    }
}
