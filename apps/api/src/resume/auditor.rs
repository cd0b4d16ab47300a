//! ATS Auditor — scores a resume against a job description via one LLM call.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmGateway;
use crate::resume::decode::{decode_record, truncate_chars};
use crate::resume::models::{AuditResult, ResumeRecord};
use crate::resume::prompts::{fill, AUDIT_PROMPT_TEMPLATE, AUDIT_SYSTEM, JD_LIMIT};

/// Sole suggestion returned when there is nothing to compare against.
pub const NO_JD_SUGGESTION: &str = "No JD provided for comparison.";
/// Sentinel missing-keyword entry marking an undecodable audit response.
pub const PARSE_ERROR_SENTINEL: &str = "Error parsing audit";

/// Raw audit payload. Scores arrive as integers or floats and are clamped.
#[derive(Debug, Deserialize)]
struct RawAudit {
    score: f64,
    missing_keywords: Vec<String>,
    suggestions: Vec<String>,
}

impl From<RawAudit> for AuditResult {
    fn from(raw: RawAudit) -> Self {
        AuditResult {
            // Fractional scores are rounded rather than rejected.
            score: raw.score.round().clamp(0.0, 100.0) as u8,
            missing_keywords: raw.missing_keywords,
            suggestions: raw.suggestions,
        }
    }
}

/// Audits `resume` against `job_description`.
///
/// No job description: fixed perfect score without calling the LLM.
/// Undecodable response: score 0 with the parse-error sentinel.
pub async fn audit_resume(
    resume: &ResumeRecord,
    job_description: &str,
    llm: &dyn LlmGateway,
) -> AuditResult {
    if job_description.trim().is_empty() {
        return no_jd_result();
    }

    let prompt = fill(
        AUDIT_PROMPT_TEMPLATE,
        &[
            ("jd_text", truncate_chars(job_description, JD_LIMIT)),
            ("resume_text", comparison_text(resume).as_str()),
        ],
    );

    let response = match llm.complete(&with_json_only(AUDIT_SYSTEM), &prompt).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Audit call failed: {e}");
            None
        }
    };

    match decode_record::<RawAudit>(response.as_deref()) {
        Some(raw) => {
            let result = AuditResult::from(raw);
            info!(
                "ATS audit: score={} missing={} suggestions={}",
                result.score,
                result.missing_keywords.len(),
                result.suggestions.len()
            );
            result
        }
        None => {
            warn!("Audit response could not be decoded");
            parse_error_result()
        }
    }
}

pub fn no_jd_result() -> AuditResult {
    AuditResult {
        score: 100,
        missing_keywords: vec![],
        suggestions: vec![NO_JD_SUGGESTION.to_string()],
    }
}

pub fn parse_error_result() -> AuditResult {
    AuditResult {
        score: 0,
        missing_keywords: vec![PARSE_ERROR_SENTINEL.to_string()],
        suggestions: vec![],
    }
}

/// Skills plus, per job, the rewritten bullets when present, else the raw summary.
fn comparison_text(resume: &ResumeRecord) -> String {
    let mut text = String::from("Skills:\n");
    for (category, value) in resume.skills.iter() {
        text.push_str(&format!("- {category}: {value}\n"));
    }

    text.push_str("Experience:\n");
    for job in &resume.experience {
        if job.enhanced_bullets.is_empty() {
            text.push_str(&format!("- {}\n", job.summary_input));
        } else {
            for bullet in &job.enhanced_bullets {
                text.push_str(&format!("- {bullet}\n"));
            }
        }
    }
    text
}
