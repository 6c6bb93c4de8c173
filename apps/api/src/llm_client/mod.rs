//! LLM Client — the single point of entry for all model API calls in Applymail.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All LLM interactions MUST go through the `LanguageModel` trait defined here.
//!
//! One request per prompt. Failures are surfaced to the caller, never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Prompt blocked by the model API: {reason}")]
    Blocked { reason: String },
}

/// Which configured model a prompt is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Fast model, used for the single-prompt basic email.
    Flash,
    /// Analysis model, used for every advanced-mode prompt.
    Pro,
}

/// The model seam. `AppState` carries an `Arc<dyn LanguageModel>` so handlers
/// and the pipeline never know which backend answers.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` to the model for `tier` and returns its text output.
    async fn generate(&self, tier: ModelTier, prompt: &str) -> Result<String, LlmError>;
}

/// Calls the model and deserializes its text response as JSON.
/// The prompt must instruct the model to return valid JSON.
///
/// On a decode failure the raw output is logged and `LlmError::Parse` is returned.
pub async fn generate_json<T: DeserializeOwned>(
    llm: &dyn LanguageModel,
    tier: ModelTier,
    prompt: &str,
) -> Result<T, LlmError> {
    let raw = llm.generate(tier, prompt).await?;
    let text = strip_json_fences(&raw);

    serde_json::from_str(&text).map_err(|e| {
        warn!("Error parsing JSON: {e}");
        warn!("Raw response: {raw}");
        LlmError::Parse(e)
    })
}

/// Removes every ```json / ``` fence marker from LLM output and trims the rest.
///
/// Models occasionally wrap the JSON in prose plus a fenced block, so markers are
/// dropped wherever they appear rather than only at the edges.
pub fn strip_json_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Maps a non-2xx response to `LlmError::Api`, preferring the API's own message.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn into_text(self) -> Result<String, LlmError> {
        let Some(candidate) = self.candidates.and_then(|c| c.into_iter().next()) else {
            return match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(LlmError::Blocked { reason }),
                None => Err(LlmError::EmptyContent),
            };
        };

        let text: String = candidate
            .content
            .and_then(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

/// Gemini `generateContent` client. Holds one model name per tier.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    flash_model: String,
    pro_model: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.llm_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.gemini_api_base.trim_end_matches('/').to_string(),
            api_key: config.google_api_key.clone(),
            flash_model: config.flash_model.clone(),
            pro_model: config.pro_model.clone(),
        })
    }

    pub fn model_name(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Flash => &self.flash_model,
            ModelTier::Pro => &self.pro_model,
        }
    }

    fn endpoint(&self, tier: ModelTier) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base,
            self.model_name(tier)
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, tier: ModelTier, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(tier))
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let body: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                self.model_name(tier),
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        body.into_text()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test double
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Scripted model: answers with the first rule whose marker occurs in the prompt.
    /// Records every call so tests can assert on tiers and prompt contents.
    #[derive(Default)]
    pub struct ScriptedModel {
        rules: Vec<(String, Result<String, u16>)>,
        calls: Mutex<Vec<(ModelTier, String)>>,
    }

    impl ScriptedModel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(mut self, marker: &str, text: &str) -> Self {
            self.rules.push((marker.to_string(), Ok(text.to_string())));
            self
        }

        pub fn fail(mut self, marker: &str, status: u16) -> Self {
            self.rules.push((marker.to_string(), Err(status)));
            self
        }

        pub fn calls(&self) -> Vec<(ModelTier, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(&self, tier: ModelTier, prompt: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push((tier, prompt.to_string()));
            let rule = self
                .rules
                .iter()
                .find(|(marker, _)| prompt.contains(marker.as_str()));
            match rule {
                Some((_, Ok(text))) => Ok(text.clone()),
                Some((_, Err(status))) => Err(LlmError::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }
}
