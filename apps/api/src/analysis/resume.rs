//! Resume analysis — extracts a structured candidate profile from resume text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::fields::{opt_text, string_list};
use crate::analysis::prompts::RESUME_ANALYSIS_TEMPLATE;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, LanguageModel, LlmError, ModelTier};

pub const RESUME_PARSE_FAILURE: &str = "Failed to parse resume data";

/// The model's view of a resume. Only the fields the summaries render are typed;
/// the rest are carried through as raw JSON for the follow-up prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Value>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Value>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    /// Set only when the model's reply could not be decoded.
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeProfile {
    pub fn parse_failure() -> Self {
        Self {
            error: Some(RESUME_PARSE_FAILURE.to_string()),
            ..Self::default()
        }
    }

    /// Number of positions listed under `experience` (0 when absent or not a collection).
    pub fn experience_count(&self) -> usize {
        match &self.experience {
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            _ => 0,
        }
    }
}

/// Sends the resume to the analysis model. A reply that is not valid JSON
/// yields `ResumeProfile::parse_failure()`; transport errors propagate.
pub async fn analyze_resume(
    resume_text: &str,
    llm: &dyn LanguageModel,
) -> Result<ResumeProfile, LlmError> {
    let prompt = fill_template(
        RESUME_ANALYSIS_TEMPLATE,
        &[("resume_text", resume_text), ("json_only", JSON_ONLY_INSTRUCTION)],
    );

    match generate_json::<ResumeProfile>(llm, ModelTier::Pro, &prompt).await {
        Ok(profile) => Ok(profile),
        Err(LlmError::Parse(e)) => {
            warn!("Resume analysis returned undecodable JSON: {e}");
            Ok(ResumeProfile::parse_failure())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    const RESUME_REPLY: &str = r#"```json
    {
        "name": "Ada Lovelace",
        "contact_info": {"email": "ada@example.com", "phone": "+44 20 7946 0000"},
        "summary": "Systems engineer focused on reliable compilers.",
        "skills": {"technical": ["Rust", "Tokio"], "soft": ["Mentoring"]},
        "experience": [
            {"company": "Analytical Engines Ltd", "title": "Senior Engineer", "dates": "2019-2024"},
            {"company": "Difference Works", "title": "Engineer", "dates": "2015-2019"}
        ],
        "education": {"degree": "BSc Mathematics"},
        "projects": [],
        "strengths": ["Performance tuning", "Technical writing"],
        "languages": ["English", "French"]
    }
    ```"#;

    #[tokio::test]
    async fn test_analyze_resume_decodes_profile() {
        let model = ScriptedModel::new().reply("Analyze the following resume", RESUME_REPLY);
        let profile = analyze_resume("Ada Lovelace\nSenior Engineer", &model)
            .await
            .unwrap();

        assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.skills.as_ref().map(Vec::len), Some(3));
        assert_eq!(profile.experience_count(), 2);
        assert!(profile.error.is_none());
        // Unrequested keys survive for the match prompt.
        assert!(profile.extra.contains_key("languages"));
    }

    #[tokio::test]
    async fn test_analyze_resume_uses_pro_tier_and_embeds_text() {
        let model = ScriptedModel::new().reply("Analyze the following resume", "{}");
        analyze_resume("UNIQUE-RESUME-MARKER", &model).await.unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ModelTier::Pro);
        assert!(calls[0].1.contains("UNIQUE-RESUME-MARKER"));
        assert!(calls[0].1.contains(JSON_ONLY_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_analyze_resume_degrades_on_prose_reply() {
        let model = ScriptedModel::new().reply("Analyze the following resume", "I can't read this.");
        let profile = analyze_resume("text", &model).await.unwrap();
        assert_eq!(profile.error.as_deref(), Some(RESUME_PARSE_FAILURE));
        assert!(profile.name.is_none());
    }

    #[tokio::test]
    async fn test_analyze_resume_propagates_api_errors() {
        let model = ScriptedModel::new().fail("Analyze the following resume", 500);
        let result = analyze_resume("text", &model).await;
        assert!(matches!(result, Err(LlmError::Api { status: 500, .. })));
    }

    #[test]
    fn test_parse_failure_serializes_to_error_only() {
        let value = serde_json::to_value(ResumeProfile::parse_failure()).unwrap();
        assert_eq!(value, serde_json::json!({"error": RESUME_PARSE_FAILURE}));
    }

    #[test]
    fn test_experience_count_ignores_scalars() {
        let profile: ResumeProfile =
            serde_json::from_str(r#"{"experience": "Five years at Acme"}"#).unwrap();
        assert_eq!(profile.experience_count(), 0);
    }
}
