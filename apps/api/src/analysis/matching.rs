//! Skills matching — asks the model to compare a resume profile with a job profile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::fields::{opt_text, percentage, string_list};
use crate::analysis::job::JobProfile;
use crate::analysis::pretty_json;
use crate::analysis::prompts::SKILLS_MATCH_TEMPLATE;
use crate::analysis::resume::ResumeProfile;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, LanguageModel, LlmError, ModelTier};

pub const MATCH_PARSE_FAILURE: &str = "Failed to match skills";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillsMatch {
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub matching_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_experience: Option<Value>,
    /// 0 – 100, as estimated by the model. Not clamped.
    #[serde(default, deserialize_with = "percentage", skip_serializing_if = "Option::is_none")]
    pub overall_match_percentage: Option<f64>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub strengths_to_highlight: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub suggested_talking_points: Option<Vec<String>>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SkillsMatch {
    pub fn parse_failure() -> Self {
        Self {
            error: Some(MATCH_PARSE_FAILURE.to_string()),
            ..Self::default()
        }
    }
}

pub async fn match_skills(
    resume: &ResumeProfile,
    job: &JobProfile,
    llm: &dyn LanguageModel,
) -> Result<SkillsMatch, LlmError> {
    let resume_json = pretty_json(resume);
    let job_json = pretty_json(job);
    let prompt = fill_template(
        SKILLS_MATCH_TEMPLATE,
        &[
            ("resume_json", resume_json.as_str()),
            ("job_json", job_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    match generate_json::<SkillsMatch>(llm, ModelTier::Pro, &prompt).await {
        Ok(report) => Ok(report),
        Err(LlmError::Parse(e)) => {
            warn!("Skills match returned undecodable JSON: {e}");
            Ok(SkillsMatch::parse_failure())
        }
        Err(e) => Err(e),
    }
}
