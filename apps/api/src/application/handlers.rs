//! Axum route handlers for the form submission and the per-stage preview endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::job::{analyze_job_description, JobProfile};
use crate::analysis::matching::{match_skills, SkillsMatch};
use crate::analysis::resume::{analyze_resume, ResumeProfile};
use crate::application::pipeline::{process_application, ApplicationOutcome, ApplicationRequest};
use crate::errors::AppError;
use crate::resume::extract::{extract_resume_text, ResumeUpload};
use crate::state::AppState;

pub const UPLOAD_OK_STATUS: &str =
    "Resume uploaded successfully. Click 'Generate Email' when ready.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: ResumeProfile,
    pub job: JobProfile,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub file_name: String,
    pub characters: usize,
}

/// Multipart form as submitted by the page.
#[derive(Debug, Default)]
struct ApplicationForm {
    resume: Option<ResumeUpload>,
    job_description: Option<String>,
    user_name: Option<String>,
    company_name: Option<String>,
    job_title: Option<String>,
    recipient_name: Option<String>,
    email_tone: Option<String>,
    additional_info: Option<String>,
    use_advanced: Option<bool>,
}

impl ApplicationForm {
    async fn read(mut multipart: Multipart, limit: usize) -> Result<Self, AppError> {
        let reject = |e| AppError::from_multipart(e, limit);
        let mut form = ApplicationForm::default();

        while let Some(field) = multipart.next_field().await.map_err(reject)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(reject)?;
                    // Browsers send an empty part when no file was chosen.
                    if !data.is_empty() || !file_name.is_empty() {
                        form.resume = Some(ResumeUpload {
                            file_name,
                            content_type,
                            data,
                        });
                    }
                }
                "use_advanced" => {
                    form.use_advanced = Some(parse_flag(&field.text().await.map_err(reject)?)?)
                }
                other => {
                    let value = Some(field.text().await.map_err(reject)?);
                    match other {
                        "job_description" => form.job_description = value,
                        "user_name" => form.user_name = value,
                        "company_name" => form.company_name = value,
                        "job_title" => form.job_title = value,
                        "recipient_name" => form.recipient_name = value,
                        "email_tone" => form.email_tone = value,
                        "additional_info" => form.additional_info = value,
                        _ => tracing::debug!("Ignoring unknown form field '{other}'"),
                    }
                }
            }
        }

        Ok(form)
    }

    fn take_resume(&mut self) -> Result<ResumeUpload, AppError> {
        self.resume
            .take()
            .ok_or_else(|| AppError::Validation("Please upload a resume file".to_string()))
    }
}

/// Checkbox values: `true/on/1/yes` and `false/off/0/no` (case-insensitive).
fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        other => Err(AppError::Validation(format!(
            "use_advanced must be true or false, got '{other}'"
        ))),
    }
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// The form submission: extract the resume, then run the basic or advanced pipeline.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApplicationOutcome>, AppError> {
    let mut form = ApplicationForm::read(multipart, state.config.max_upload_bytes).await?;
    let upload = form.take_resume()?;

    let job_description = form.job_description.unwrap_or_default();
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide a job description".to_string(),
        ));
    }

    let resume_text = extract_resume_text(&upload).await?;

    let request = ApplicationRequest {
        resume_text,
        job_description,
        user_name: form.user_name,
        company_name: form.company_name,
        job_title: form.job_title,
        recipient_name: form.recipient_name,
        email_tone: form.email_tone,
        additional_info: form.additional_info,
        use_advanced: form.use_advanced.unwrap_or(true),
    };

    let outcome = process_application(&request, state.llm.as_ref()).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/resumes/upload
///
/// Checks that an uploaded resume yields text before the user submits the full form.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut form = ApplicationForm::read(multipart, state.config.max_upload_bytes).await?;
    let upload = form.take_resume()?;
    let text = extract_resume_text(&upload).await?;

    Ok(Json(UploadResponse {
        status: UPLOAD_OK_STATUS.to_string(),
        file_name: upload.file_name,
        characters: text.chars().count(),
    }))
}

/// POST /api/v1/analyze/resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<ResumeProfile>, AppError> {
    require_text(&request.resume_text, "resume_text")?;
    let profile = analyze_resume(&request.resume_text, state.llm.as_ref()).await?;
    Ok(Json(profile))
}

/// POST /api/v1/analyze/job
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobProfile>, AppError> {
    require_text(&request.job_description, "job_description")?;
    let profile = analyze_job_description(&request.job_description, state.llm.as_ref()).await?;
    Ok(Json(profile))
}

/// POST /api/v1/analyze/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<SkillsMatch>, AppError> {
    let report = match_skills(&request.resume, &request.job, state.llm.as_ref()).await?;
    Ok(Json(report))
}
