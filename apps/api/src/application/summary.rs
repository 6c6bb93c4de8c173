//! Markdown summaries shown next to the generated email.

use crate::analysis::fields::format_percentage;
use crate::analysis::job::JobProfile;
use crate::analysis::matching::SkillsMatch;
use crate::analysis::resume::ResumeProfile;

pub const BASIC_RESUME_SUMMARY: &str = "Basic mode: Resume analysis not performed";
pub const BASIC_JOB_SUMMARY: &str = "Basic mode: Job analysis not performed";
pub const BASIC_MATCH_SUMMARY: &str = "Basic mode: Skills matching not performed";

/// Joins a list with ", ". Absent lists render `fallback`; empty lists render "".
fn join_or(list: Option<&Vec<String>>, fallback: &str) -> String {
    list.map(|items| items.join(", "))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn resume_summary(resume: &ResumeProfile) -> String {
    let count = resume.experience_count();
    format!(
        "**Name:** {}\n\n**Skills:** {}\n\n**Experience:** {} position{}\n\n",
        resume.name.as_deref().unwrap_or("Not found"),
        join_or(resume.skills.as_ref(), "Not found"),
        count,
        if count == 1 { "" } else { "s" },
    )
}

/// `form_job_title` is used when the model did not return a title.
pub fn job_summary(job: &JobProfile, form_job_title: &str) -> String {
    let mut out = format!(
        "**Position:** {}\n\n",
        job.job_title.as_deref().unwrap_or(form_job_title)
    );
    if let Some(company) = &job.company_name {
        out.push_str(&format!("**Company:** {company}\n\n"));
    }
    out.push_str(&format!(
        "**Required Skills:** {}\n\n",
        join_or(job.required_skills.as_ref(), "Not found")
    ));
    out
}

pub fn match_summary(skills_match: &SkillsMatch) -> String {
    let pct = skills_match
        .overall_match_percentage
        .map(format_percentage)
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "**Match Percentage:** {pct}%\n\n**Matching Skills:** {}\n\n**Missing Skills:** {}\n\n",
        join_or(skills_match.matching_skills.as_ref(), "None"),
        join_or(skills_match.missing_skills.as_ref(), "None"),
    )
}
