//! Gemini-backed planner implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{PlanError, PlanResult};
use crate::image::EncodedImage;

use super::Planner;

/// Planner backed by Google's Gemini `generateContent` API.
pub struct GeminiPlanner {
    client: reqwest::Client,
    config: PlannerConfig,
}

impl GeminiPlanner {
    pub fn new(config: PlannerConfig) -> PlanResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| PlanError::Configuration(error.to_string()))?;
        Ok(Self { client, config })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    parts: Option<Vec<GeminiPartResponse>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[async_trait]
impl Planner for GeminiPlanner {
    async fn generate(&self, prompt: &str, image: &EncodedImage) -> PlanResult<String> {
        if self.config.api_key.trim().is_empty() {
            return Err(PlanError::Configuration(
                "planner API key is not set (ARMPLAN_GEMINI_API_KEY)".to_string(),
            ));
        }

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![
                    GeminiPart::Text {
                        text: prompt.to_string(),
                    },
                    GeminiPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(self.build_url())
            .json(&body)
            .send()
            .await
            .map_err(|error| PlanError::ExternalService {
                status: error.status().map(|s| s.as_u16()).unwrap_or(0),
                body: error.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(PlanError::ExternalService {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&text)
            .map_err(|error| PlanError::EmptyResponse(format!("undecodable reply: {error}")))?;

        let candidate = parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or_else(|| {
                PlanError::EmptyResponse("planner returned no candidates".to_string())
            })?;

        candidate
            .content
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                PlanError::EmptyResponse("first candidate contained no text part".to_string())
            })
    }
}
