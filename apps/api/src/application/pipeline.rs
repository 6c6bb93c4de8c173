//! Application pipeline — from extracted resume text and a job description to
//! an email plus the three summaries shown in the form.
//!
//! Advanced: analyze resume ∥ analyze job → match skills → advanced email.
//! Basic: one direct email prompt on the fast model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::job::{analyze_job_description, JobProfile};
use crate::analysis::matching::{match_skills, SkillsMatch};
use crate::analysis::resume::{analyze_resume, ResumeProfile};
use crate::application::summary::{
    job_summary, match_summary, resume_summary, BASIC_JOB_SUMMARY, BASIC_MATCH_SUMMARY,
    BASIC_RESUME_SUMMARY,
};
use crate::email::generator::{
    generate_basic_email, generate_email_advanced, split_subject, AdvancedEmailInput,
    BasicEmailInput,
};
use crate::email::tone::ToneChoice;
use crate::errors::AppError;
use crate::llm_client::LanguageModel;

pub const DEFAULT_USER_NAME: &str = "Job Applicant";
pub const DEFAULT_COMPANY_NAME: &str = "the Company";
pub const DEFAULT_JOB_TITLE: &str = "the Position";
pub const DEFAULT_RECIPIENT: &str = "Hiring Manager";
pub const SUCCESS_STATUS: &str = "Success! Email generated.";

/// Everything the form submits, after the resume has been turned into text.
#[derive(Debug, Clone, Default)]
pub struct ApplicationRequest {
    pub resume_text: String,
    pub job_description: String,
    pub user_name: Option<String>,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub recipient_name: Option<String>,
    pub email_tone: Option<String>,
    pub additional_info: Option<String>,
    pub use_advanced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Advanced,
    Basic,
}

/// Structured analyses, returned only in advanced mode.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub resume: ResumeProfile,
    pub job: JobProfile,
    pub skills_match: SkillsMatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationOutcome {
    pub application_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: GenerationMode,
    pub status: String,
    pub resume_summary: String,
    pub job_summary: String,
    pub match_summary: String,
    pub email: String,
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisBundle>,
}

/// Blank or missing → `default`, otherwise the trimmed value.
fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

pub async fn process_application(
    request: &ApplicationRequest,
    llm: &dyn LanguageModel,
) -> Result<ApplicationOutcome, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("Please upload a resume file".to_string()));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide a job description".to_string(),
        ));
    }

    let application_id = Uuid::new_v4();
    let user_name = or_default(&request.user_name, DEFAULT_USER_NAME);
    let company_name = or_default(&request.company_name, DEFAULT_COMPANY_NAME);
    let job_title = or_default(&request.job_title, DEFAULT_JOB_TITLE);

    let (mode, summaries, email, analysis) = if request.use_advanced {
        let recipient_name = or_default(&request.recipient_name, DEFAULT_RECIPIENT);
        let tone = ToneChoice::parse(request.email_tone.as_deref());
        let additional_info = request.additional_info.as_deref().unwrap_or("").trim();

        // The two analyses are independent of each other.
        info!("[{application_id}] Analyzing resume...");
        info!("[{application_id}] Analyzing job description...");
        let (resume, job) = tokio::try_join!(
            analyze_resume(&request.resume_text, llm),
            analyze_job_description(&request.job_description, llm),
        )?;

        info!("[{application_id}] Matching skills...");
        let skills_match = match_skills(&resume, &job, llm).await?;

        info!("[{application_id}] Generating email...");
        let email = generate_email_advanced(
            &AdvancedEmailInput {
                resume: &resume,
                job: &job,
                skills_match: &skills_match,
                recipient_name,
                tone: &tone,
                additional_info,
            },
            llm,
        )
        .await?;

        let summaries = (
            resume_summary(&resume),
            job_summary(&job, job_title),
            match_summary(&skills_match),
        );
        let analysis = AnalysisBundle {
            resume,
            job,
            skills_match,
        };
        (GenerationMode::Advanced, summaries, email, Some(analysis))
    } else {
        info!("[{application_id}] Using basic email generation...");
        let email = generate_basic_email(
            &BasicEmailInput {
                resume_text: &request.resume_text,
                job_description: &request.job_description,
                user_name,
                company_name,
                job_role: job_title,
            },
            llm,
        )
        .await?;

        let summaries = (
            BASIC_RESUME_SUMMARY.to_string(),
            BASIC_JOB_SUMMARY.to_string(),
            BASIC_MATCH_SUMMARY.to_string(),
        );
        (GenerationMode::Basic, summaries, email, None)
    };

    let subject = split_subject(&email).subject;
    let (resume_summary, job_summary, match_summary) = summaries;

    info!(
        "[{application_id}] Generated {:?} email ({} chars)",
        mode,
        email.len()
    );

    Ok(ApplicationOutcome {
        application_id,
        generated_at: Utc::now(),
        mode,
        status: SUCCESS_STATUS.to_string(),
        resume_summary,
        job_summary,
        match_summary,
        email,
        subject,
        analysis,
    })
}
