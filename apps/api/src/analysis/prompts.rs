// Prompt constants for CV analysis.

/// Instruction sent after the CV attachment and the job description.
/// `llm_client::prompts::JSON_ONLY_RULES` is appended before sending.
pub const ANALYSIS_PROMPT: &str = r#"You are a professional resume optimizer.
Analyze the candidate's CV PDF and the job description.

Return a JSON object with EXACT fields:

{
  "skills_to_highlight": [],
  "suggested_changes": [],
  "missing_skills": [],
  "match_score": 0,
  "recommendations": "",
  "improved_cv_text": ""
}

Rules:
- skills_to_highlight, suggested_changes and missing_skills are arrays of strings.
- match_score is an integer from 0 to 100.
- recommendations is a single string.
- improved_cv_text must contain the full rewritten CV optimized for the job, as plain text."#;

/// Prefix for the job description part.
pub const JOB_DESCRIPTION_HEADER: &str = "Job description:\n";
