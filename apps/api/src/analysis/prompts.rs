// All LLM prompt templates for the analysis module.
// Placeholders are filled with llm_client::prompts::fill_template.

/// Resume analysis. Replace `{resume_text}` and `{json_only}`.
pub const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze the following resume and extract key information in a structured JSON format.
Include the following fields:
1. name: The candidate's full name
2. contact_info: Email and phone number if present
3. summary: A brief professional summary
4. skills: List of technical and soft skills
5. experience: List of work experiences with company, title, dates, and achievements
6. education: Academic background
7. projects: Any mentioned projects with descriptions
8. strengths: The candidate's 3-5 main professional strengths based on the resume

Resume:
{resume_text}

{json_only}"#;

/// Job description analysis. Replace `{job_description}` and `{json_only}`.
pub const JOB_ANALYSIS_TEMPLATE: &str = r#"Analyze the following job description and extract key information in a structured JSON format.
Include the following fields:
1. company_name: The company posting the job (if mentioned)
2. job_title: The position title
3. location: Job location (remote, hybrid, or physical location) if mentioned
4. job_summary: A brief summary of the role
5. required_skills: List of required technical and soft skills
6. preferred_skills: List of preferred or nice-to-have skills
7. responsibilities: Key job responsibilities
8. qualifications: Required education and experience
9. keywords: 5-10 important keywords from the job description

Job Description:
{job_description}

{json_only}"#;

/// Skills match. Replace `{resume_json}`, `{job_json}` and `{json_only}`.
pub const SKILLS_MATCH_TEMPLATE: &str = r#"Compare the candidate's skills and qualifications with the job requirements and provide an analysis in JSON format.

Resume Data:
{resume_json}

Job Data:
{job_json}

Generate a JSON response with the following fields:
1. matching_skills: List of skills the candidate has that match the job requirements
2. missing_skills: List of required skills the candidate appears to be missing
3. relevant_experience: List of candidate experiences relevant to this job
4. overall_match_percentage: Estimated percentage match between the candidate and job (0-100)
5. strengths_to_highlight: Key strengths from the resume that should be emphasized in the application
6. suggested_talking_points: Specific resume elements to mention in the application email

{json_only}"#;
