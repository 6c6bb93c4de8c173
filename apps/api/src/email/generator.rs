//! Email generation — turns the analyses (advanced) or the raw inputs (basic)
//! into a ready-to-send application email.

use serde::Serialize;
use tracing::debug;

use crate::analysis::job::JobProfile;
use crate::analysis::matching::SkillsMatch;
use crate::analysis::pretty_json;
use crate::analysis::resume::ResumeProfile;
use crate::email::prompts::{ADVANCED_EMAIL_TEMPLATE, BASIC_EMAIL_TEMPLATE};
use crate::email::tone::ToneChoice;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LanguageModel, LlmError, ModelTier};

/// Inputs the advanced prompt needs besides the three analyses.
#[derive(Debug, Clone)]
pub struct AdvancedEmailInput<'a> {
    pub resume: &'a ResumeProfile,
    pub job: &'a JobProfile,
    pub skills_match: &'a SkillsMatch,
    pub recipient_name: &'a str,
    pub tone: &'a ToneChoice,
    pub additional_info: &'a str,
}

/// Inputs for the single-prompt basic email.
#[derive(Debug, Clone)]
pub struct BasicEmailInput<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub user_name: &'a str,
    pub company_name: &'a str,
    pub job_role: &'a str,
}

/// Generated email split at its `Subject:` line, for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailParts {
    pub subject: Option<String>,
    pub body: String,
}

/// Analysis-driven email on the Pro model. Returns the model text unchanged.
pub async fn generate_email_advanced(
    input: &AdvancedEmailInput<'_>,
    llm: &dyn LanguageModel,
) -> Result<String, LlmError> {
    let resume_json = pretty_json(input.resume);
    let job_json = pretty_json(input.job);
    let match_json = pretty_json(input.skills_match);

    let prompt = fill_template(
        ADVANCED_EMAIL_TEMPLATE,
        &[
            ("tone_description", input.tone.description()),
            ("resume_json", resume_json.as_str()),
            ("job_json", job_json.as_str()),
            ("match_json", match_json.as_str()),
            ("recipient_name", input.recipient_name),
            ("additional_info", input.additional_info),
        ],
    );

    debug!("Advanced email prompt: {} chars", prompt.len());
    llm.generate(ModelTier::Pro, &prompt).await
}

/// Direct email from raw resume text and job description on the Flash model.
pub async fn generate_basic_email(
    input: &BasicEmailInput<'_>,
    llm: &dyn LanguageModel,
) -> Result<String, LlmError> {
    let prompt = fill_template(
        BASIC_EMAIL_TEMPLATE,
        &[
            ("user_name", input.user_name),
            ("company_name", input.company_name),
            ("job_role", input.job_role),
            ("resume_text", input.resume_text),
            ("job_description", input.job_description),
        ],
    );

    debug!("Basic email prompt: {} chars", prompt.len());
    llm.generate(ModelTier::Flash, &prompt).await
}

/// Splits a leading `Subject:` line (after optional blank lines and markdown
/// emphasis) from the rest of the email.
pub fn split_subject(email: &str) -> EmailParts {
    let trimmed = email.trim_start();
    let (first_line, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let first_line = first_line.trim().trim_matches('*').trim();

    let subject = first_line
        .get(..8)
        .filter(|prefix| prefix.eq_ignore_ascii_case("subject:"))
        .map(|_| first_line[8..].trim_matches('*').trim().to_string());

    match subject {
        Some(subject) => EmailParts {
            subject: Some(subject),
            body: rest.trim().to_string(),
        },
        None => EmailParts {
            subject: None,
            body: email.trim().to_string(),
        },
    }
}
