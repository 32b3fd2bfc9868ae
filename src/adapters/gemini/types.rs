//! Gemini API Types
//!
//! Request and response bodies for the `generateContent` REST endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Plain text prompt
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: None,
        }
    }

    /// Prompt that must answer with a JSON coin idea
    pub fn coin_idea(prompt: impl Into<String>) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: coin_idea_schema(),
            }),
            ..Self::text(prompt)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

/// Structured-output schema for a coin idea
pub fn coin_idea_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {
                "type": "STRING",
                "description": "The name of the coin (e.g. Sad Hamster)"
            },
            "ticker": {
                "type": "STRING",
                "description": "The ticker symbol (e.g. HAMMY)"
            },
            "description": {
                "type": "STRING",
                "description": "A short, funny, lore-heavy description for the coin launch."
            }
        },
        "required": ["name", "ticker", "description"]
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl ApiErrorDetail {
    /// Message with the API's own error code, when it sent one
    pub fn describe(&self) -> String {
        if self.code == 0 {
            self.message.clone()
        } else {
            format!("{} (code {})", self.message, self.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_idea_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::coin_idea("hamster")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hamster");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["name", "ticker", "description"])
        );
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let body = serde_json::to_value(GenerateContentRequest::text("roast")).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"name\":"}, {"text": "\"X\"}"}], "role": "model"}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"name\":\"X\"}"));
    }

    #[test]
    fn test_error_body_describe() {
        let raw = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let body: ApiErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.error.describe(), "API key not valid (code 400)");

        let body: ApiErrorBody = serde_json::from_str(r#"{"error": {"message": "nope"}}"#).unwrap();
        assert_eq!(body.error.describe(), "nope");
    }

    #[test]
    fn test_empty_response_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());

        let raw = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(response.text().is_none());
    }
}
