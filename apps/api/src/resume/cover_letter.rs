//! Cover Letter Composer — one LLM call producing narrative text.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmGateway;
use crate::resume::decode::{decode_record, truncate_chars};
use crate::resume::models::ResumeRecord;
use crate::resume::prompts::{fill, COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, JD_LIMIT};

#[derive(Debug, Deserialize)]
struct CoverLetterPayload {
    cover_letter: String,
}

/// Composes a cover letter. Always returns renderable text: the decoded
/// `cover_letter` field, else the raw response verbatim, else an empty string
/// when the call itself failed.
pub async fn compose_cover_letter(
    resume: &ResumeRecord,
    job_description: &str,
    llm: &dyn LlmGateway,
) -> String {
    let jd_text = if job_description.trim().is_empty() {
        ""
    } else {
        truncate_chars(job_description, JD_LIMIT)
    };
    let prompt = fill(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("candidate", candidate_summary(resume).as_str()),
            ("jd_text", jd_text),
        ],
    );

    let response = match llm.complete(&with_json_only(COVER_LETTER_SYSTEM), &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Cover letter call failed: {e}");
            return String::new();
        }
    };

    match decode_record::<CoverLetterPayload>(Some(&response)) {
        Some(payload) => {
            info!("Composed cover letter ({} chars)", payload.cover_letter.len());
            payload.cover_letter
        }
        None => {
            warn!("Cover letter response was not the expected JSON; returning raw text");
            response
        }
    }
}

/// Name plus the rewritten bullets of each job.
fn candidate_summary(resume: &ResumeRecord) -> String {
    let mut summary = format!("Name: {}\nExperience:\n", resume.full_name);
    for job in &resume.experience {
        summary.push_str(&format!("{} at {}:\n", job.role, job.company));
        for bullet in &job.enhanced_bullets {
            summary.push_str(&format!("- {bullet}\n"));
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGateway;
    use crate::resume::models::ExperienceEntry;

    fn resume() -> ResumeRecord {
        ResumeRecord {
            full_name: "Grace Hopper".into(),
            experience: vec![ExperienceEntry {
                role: "Engineer".into(),
                company: "Navy".into(),
                enhanced_bullets: vec!["Built the first compiler used by 100 teams".into()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_decoded_cover_letter() {
        let llm = ScriptedGateway::replying([r#"{"cover_letter": "Dear Hiring Manager,\n..."}"#]);
        let letter = compose_cover_letter(&resume(), "Compiler engineer", &llm).await;
        assert_eq!(letter, "Dear Hiring Manager,\n...");

        let (_, user) = &llm.calls()[0];
        assert!(user.starts_with("Candidate: Name: Grace Hopper"));
        assert!(user.contains("- Built the first compiler used by 100 teams"));
        assert!(user.ends_with("JD: Compiler engineer"));
    }

    #[tokio::test]
    async fn test_non_json_response_is_returned_verbatim() {
        let raw = "Dear team, I am excited to apply.";
        let llm = ScriptedGateway::replying([raw]);
        assert_eq!(compose_cover_letter(&resume(), "jd", &llm).await, raw);
    }

    #[tokio::test]
    async fn test_wrong_json_shape_is_returned_verbatim() {
        let raw = r#"{"letter": "Dear team"}"#;
        let llm = ScriptedGateway::replying([raw]);
        assert_eq!(compose_cover_letter(&resume(), "jd", &llm).await, raw);
    }

    #[tokio::test]
    async fn test_blank_jd_is_sent_as_empty() {
        let llm = ScriptedGateway::replying([r#"{"cover_letter": "Dear team"}"#]);
        compose_cover_letter(&resume(), " \n\t", &llm).await;
        assert!(llm.calls()[0].1.ends_with("JD: "));
    }

    #[tokio::test]
    async fn test_failed_call_returns_empty_text() {
        let llm = ScriptedGateway::new([None::<&str>]);
        assert_eq!(compose_cover_letter(&resume(), "jd", &llm).await, "");
    }
}
