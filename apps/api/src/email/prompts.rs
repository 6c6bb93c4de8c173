// All LLM prompt templates for the email module.

/// Advanced email. Replace: {tone_description}, {resume_json}, {job_json},
/// {match_json}, {recipient_name}, {additional_info}
pub const ADVANCED_EMAIL_TEMPLATE: &str = r#"Generate a {tone_description} job application email for the following scenario:

Resume Information:
{resume_json}

Job Information:
{job_json}

Skills Match Analysis:
{match_json}

Recipient: {recipient_name}
Additional Information to Include: {additional_info}

The email should:
1. Have an attention-grabbing subject line
2. Start with a professional greeting
3. Include a strong opening paragraph explaining interest in the position
4. Highlight 3-4 of the candidate's most relevant skills and experiences for this specific job
5. Address any potential skill gaps with transferable skills or eagerness to learn
6. Include a brief paragraph on why the candidate is interested in this specific company
7. End with a clear call to action and professional closing
8. Be concise (no more than 300-400 words total)

Format the response with "Subject:" at the top followed by the email body."#;

/// Basic email. Replace: {user_name}, {company_name}, {job_role},
/// {resume_text}, {job_description}
pub const BASIC_EMAIL_TEMPLATE: &str = r#"You are a professional mail writer.

Write a personalized email that {user_name} can send to a hiring manager at {company_name} for the role of {job_role}.
Use the resume content and job description below to tailor the email. The tone should be professional, polite, and confident.

--- RESUME ---
{resume_text}

--- JOB DESCRIPTION ---
{job_description}

--- EMAIL FORMAT ---
Subject: Application for {job_role} at {company_name}

[Write the full email body here]"#;
