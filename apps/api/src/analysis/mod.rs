//! CV Analysis: asks the generative model to score a CV against a job description
//! and rewrite it, then validates the reply before anyone downstream sees it.
//!
//! A reply that does not parse, lacks a field, carries a mistyped field, or puts
//! `match_score` outside 0–100 is rejected whole as `MalformedAnalysisResponse`.
//! The raw reply is logged at error level in that case. Nothing is retried.

pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::analysis::prompts::{ANALYSIS_PROMPT, JOB_DESCRIPTION_HEADER};
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_RULES;
use crate::llm_client::{strip_json_fences, GenerativeModel, Part};

pub const PDF_MIME_TYPE: &str = "application/pdf";
const MAX_MATCH_SCORE: u8 = 100;

/// Structured fit analysis for one CV against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills_to_highlight: Vec<String>,
    pub suggested_changes: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0 – 100
    pub match_score: u8,
    pub recommendations: String,
    pub improved_cv_text: String,
}

impl AnalysisResult {
    fn validate(&self) -> Result<(), String> {
        if self.match_score > MAX_MATCH_SCORE {
            return Err(format!(
                "match_score {} is outside 0..={MAX_MATCH_SCORE}",
                self.match_score
            ));
        }
        Ok(())
    }
}

/// Sends the CV and job description to `model` and returns the validated analysis.
pub async fn analyze_cv(
    model: &dyn GenerativeModel,
    document: Vec<u8>,
    job_description: &str,
) -> Result<AnalysisResult, AppError> {
    let parts = build_parts(document, job_description);
    debug!(model = model.model_name(), "Requesting CV analysis");

    let raw = model.generate(&parts).await?;
    parse_analysis(&raw)
}

/// Attachment first, then the job description, then the fixed instruction.
pub fn build_parts(document: Vec<u8>, job_description: &str) -> Vec<Part> {
    vec![
        Part::InlineData {
            mime_type: PDF_MIME_TYPE.to_string(),
            data: document,
        },
        Part::Text(format!("{JOB_DESCRIPTION_HEADER}{job_description}")),
        Part::Text(format!("{ANALYSIS_PROMPT}\n{JSON_ONLY_RULES}")),
    ]
}

/// Strips code fences from `raw` and parses it as a complete `AnalysisResult`.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AppError> {
    let cleaned = strip_json_fences(raw);

    let result: AnalysisResult = serde_json::from_str(cleaned).map_err(|e| {
        error!(raw_response = raw, "Model returned an unparsable analysis");
        AppError::MalformedAnalysisResponse(format!("response is not valid analysis JSON: {e}"))
    })?;

    result.validate().map_err(|reason| {
        error!(raw_response = raw, reason = %reason, "Model returned an invalid analysis");
        AppError::MalformedAnalysisResponse(reason)
    })?;

    Ok(result)
}
