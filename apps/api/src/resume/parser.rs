//! Resume Parser — raw extracted text to a structured `ResumeRecord` via one LLM call.

use tracing::{info, warn};

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmGateway;
use crate::resume::decode::{decode_record, truncate_chars};
use crate::resume::models::ResumeRecord;
use crate::resume::prompts::{fill, PARSE_PROMPT_TEMPLATE, PARSE_SYSTEM, RESUME_TEXT_LIMIT};

/// Parses raw resume text.
///
/// Never fails: a failed call or an undecodable response yields
/// `ResumeRecord::default()`, which callers should surface as a probable
/// parse failure rather than an empty resume.
pub async fn parse_resume(raw_text: &str, llm: &dyn LlmGateway) -> ResumeRecord {
    let prompt = fill(
        PARSE_PROMPT_TEMPLATE,
        &[("raw_text", truncate_chars(raw_text, RESUME_TEXT_LIMIT))],
    );

    let response = match llm.complete(&with_json_only(PARSE_SYSTEM), &prompt).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Resume parse call failed: {e}");
            None
        }
    };

    match decode_record::<ResumeRecord>(response.as_deref()) {
        Some(mut record) => {
            // Only the rewriter writes bullets.
            for job in &mut record.experience {
                job.enhanced_bullets.clear();
            }
            info!(
                "Parsed resume: {} education, {} skill categories, {} experience entries",
                record.education.len(),
                record.skills.len(),
                record.experience.len()
            );
            record
        }
        None => {
            warn!("Resume parse response was not a usable record; returning empty resume");
            ResumeRecord::default()
        }
    }
}
