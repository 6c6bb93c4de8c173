//! Job description analysis — extracts role, company and skill requirements.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::fields::{opt_text, string_list};
use crate::analysis::prompts::JOB_ANALYSIS_TEMPLATE;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, LanguageModel, LlmError, ModelTier};

pub const JOB_PARSE_FAILURE: &str = "Failed to parse job description data";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProfile {
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub job_summary: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub preferred_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Value>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobProfile {
    pub fn parse_failure() -> Self {
        Self {
            error: Some(JOB_PARSE_FAILURE.to_string()),
            ..Self::default()
        }
    }
}

/// Sends the job description to the analysis model. Undecodable replies
/// degrade to `JobProfile::parse_failure()`.
pub async fn analyze_job_description(
    job_description: &str,
    llm: &dyn LanguageModel,
) -> Result<JobProfile, LlmError> {
    let prompt = fill_template(
        JOB_ANALYSIS_TEMPLATE,
        &[
            ("job_description", job_description),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    match generate_json::<JobProfile>(llm, ModelTier::Pro, &prompt).await {
        Ok(profile) => Ok(profile),
        Err(LlmError::Parse(e)) => {
            warn!("Job description analysis returned undecodable JSON: {e}");
            Ok(JobProfile::parse_failure())
        }
        Err(e) => Err(e),
    }
}
