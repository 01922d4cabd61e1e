use serde::{Deserialize, Serialize};

/// Gemini Generate Content Request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Contents (messages)
    pub contents: Vec<Content>,
    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generationConfig")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn asking for JSON output that matches `schema`
    pub fn structured(prompt: &str, schema: serde_json::Value) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                ..GenerationConfig::default()
            }),
        }
    }
}

/// Content block (message)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    #[serde(default)]
    pub role: String,
    /// Parts (text content)
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Part (text content)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationConfig {
    /// Response MIME type (e.g., "application/json" for JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: Option<String>,
    /// Response schema (OpenAPI-style schema for structured output)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "responseSchema")]
    pub response_schema: Option<serde_json::Value>,
}

/// Gemini Generate Content Response (non-streaming)
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidates; absent when the prompt was blocked
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Usage metadata
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when there is none
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Candidate response
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Usage metadata
#[derive(Debug, Clone, Deserialize)]
pub struct UsageMetadata {
    #[serde(default)]
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: u64,
    #[serde(default)]
    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: u64,
    #[serde(default)]
    #[serde(rename = "totalTokenCount")]
    pub total_token_count: u64,
}
