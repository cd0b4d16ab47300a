//! Bullet Rewriter — rewrites every experience entry's bullets for a target role.
//!
//! Flow per pass: resolve JD context → for each entry in order:
//!   render forbidden verbs → build prompts → LLM call → tolerant decode
//!   (or fallback bullets) → absorb leading verbs → overwrite `enhanced_bullets`.
//!
//! Entries are processed strictly in sequence: entry i's prompt depends on
//! the verbs produced by entries 0..i in the same pass.

use tracing::{debug, info, warn};

use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmGateway;
use crate::resume::decode::{decode_bullets, truncate_chars, BulletDecode};
use crate::resume::models::{ExperienceEntry, Tone};
use crate::resume::prompts::{
    fill, BULLETS_PER_ENTRY, GENERIC_JD_CONTEXT, JD_LIMIT, REWRITE_PROMPT_TEMPLATE,
    REWRITE_SYSTEM_TEMPLATE,
};
use crate::resume::tone::style_guide;
use crate::resume::verbs::ForbiddenVerbs;

/// Inputs shared by every entry of one pass.
#[derive(Debug, Clone)]
pub struct RewriteContext<'a> {
    pub target_role: &'a str,
    pub job_description: &'a str,
    pub tone: Tone,
}

impl RewriteContext<'_> {
    /// Truncated job description, or a generic placeholder when absent.
    fn jd_context(&self) -> &str {
        if self.job_description.trim().is_empty() {
            GENERIC_JD_CONTEXT
        } else {
            truncate_chars(self.job_description, JD_LIMIT)
        }
    }
}

/// Runs one rewrite pass. Order is preserved and every entry comes back with
/// a non-empty `enhanced_bullets`, whatever the gateway returns.
pub async fn rewrite_entries(
    mut entries: Vec<ExperienceEntry>,
    ctx: &RewriteContext<'_>,
    llm: &dyn LlmGateway,
) -> Vec<ExperienceEntry> {
    if entries.is_empty() {
        return entries;
    }

    info!(
        "Rewriting {} entries for role '{}' ({:?} tone)",
        entries.len(),
        ctx.target_role,
        ctx.tone
    );

    let style_block = style_guide(ctx.tone).render();
    let jd_context = ctx.jd_context();
    let mut forbidden = ForbiddenVerbs::default();
    let mut fallbacks = 0usize;

    for entry in entries.iter_mut() {
        let system = build_system_prompt(ctx.target_role, &style_block, jd_context, &forbidden, entry);
        let user = build_user_prompt(entry);
        debug!(
            "Rewrite prompt for '{}': system={} chars, user={} chars, forbidden={}",
            entry.role,
            system.len(),
            user.len(),
            forbidden.len()
        );

        let response = match llm.complete(&system, &user).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Rewrite call failed for '{}': {e}", entry.role);
                None
            }
        };

        let bullets = match decode_bullets(response.as_deref()) {
            BulletDecode::Bullets(bullets) => bullets,
            BulletDecode::Malformed => {
                warn!("Unusable rewrite response for '{}'; using fallback bullets", entry.role);
                fallbacks += 1;
                fallback_bullets(entry)
            }
        };

        forbidden.absorb(&bullets);
        entry.enhanced_bullets = bullets;
    }

    info!(
        "Rewrite pass complete: {} entries, {} fallbacks, {} distinct leading verbs",
        entries.len(),
        fallbacks,
        forbidden.len()
    );

    entries
}

/// Generic bullets used when a response cannot be decoded.
pub fn fallback_bullets(entry: &ExperienceEntry) -> Vec<String> {
    vec![
        format!("Managed {} responsibilities.", entry.role),
        "Optimized team workflows.".to_string(),
    ]
}

fn build_system_prompt(
    target_role: &str,
    style_block: &str,
    jd_context: &str,
    forbidden: &ForbiddenVerbs,
    entry: &ExperienceEntry,
) -> String {
    let forbidden_verbs = forbidden.render();
    let system = fill(
        REWRITE_SYSTEM_TEMPLATE,
        &[
            ("target_role", target_role),
            ("style_guide", style_block),
            ("jd_context", jd_context),
            ("forbidden_verbs", forbidden_verbs.as_str()),
            ("tech_stack", entry.tech_stack.as_str()),
        ],
    );
    with_json_only(&system)
}

fn build_user_prompt(entry: &ExperienceEntry) -> String {
    let bullet_count = BULLETS_PER_ENTRY.to_string();
    fill(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("bullet_count", bullet_count.as_str()),
            ("role", entry.role.as_str()),
            ("tech_stack", entry.tech_stack.as_str()),
            ("summary", entry.summary_input.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGateway;
    use crate::resume::verbs::leading_verb;

    fn entry(role: &str, summary: &str) -> ExperienceEntry {
        ExperienceEntry {
            role: role.to_string(),
            summary_input: summary.to_string(),
            ..Default::default()
        }
    }

    fn ctx(jd: &str, tone: Tone) -> RewriteContext<'_> {
        RewriteContext {
            target_role: "Platform Engineer",
            job_description: jd,
            tone,
        }
    }

    /// Extracts the bracketed forbidden-verb list from a system prompt.
    fn forbidden_list(system: &str) -> Vec<String> {
        let start = system.find("if possible: [").unwrap() + "if possible: [".len();
        let end = start + system[start..].find(']').unwrap();
        system[start..end]
            .split(", ")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_empty_entry_list_makes_no_calls() {
        let llm = ScriptedGateway::default();
        let out = rewrite_entries(vec![], &ctx("", Tone::Standard), &llm).await;
        assert!(out.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_second_entry_is_told_to_avoid_first_entry_verbs() {
        let llm = ScriptedGateway::replying([
            r#"{"bullets": ["Built a deploy pipeline cutting release time 40%", "Led migration of 12 services to Kubernetes", "Built dashboards used by 30 engineers"]}"#,
            r#"{"bullets": ["Mentored 5 engineers", "Scaled on-call rotation to 3 regions", "Drove 20% cost reduction"]}"#,
        ]);
        let entries = vec![entry("Engineer", "built stuff"), entry("Lead", "led team")];

        let out = rewrite_entries(entries, &ctx("Kubernetes, Go", Tone::Standard), &llm).await;

        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert!(forbidden_list(&calls[0].0).is_empty());
        assert_eq!(forbidden_list(&calls[1].0), vec!["Built", "Led"]);
        assert!(calls[1].0.contains("[Built, Led]"));
        assert_eq!(out[0].enhanced_bullets.len(), 3);
        assert_eq!(out[1].enhanced_bullets[0], "Mentored 5 engineers");
    }

    #[tokio::test]
    async fn test_forbidden_list_is_union_of_prior_entries_only() {
        let responses = [
            r#"["Built A 10%", "Shipped B 2x"]"#,
            r#"["Reduced C 5%", "Built D 3x"]"#,
            r#"["Automated E 50%"]"#,
        ];
        let llm = ScriptedGateway::replying(responses);
        let entries = vec![entry("A", ""), entry("B", ""), entry("C", "")];

        let out = rewrite_entries(entries, &ctx("jd", Tone::Standard), &llm).await;

        let mut expected: Vec<String> = Vec::new();
        for (i, (system, _)) in llm.calls().iter().enumerate() {
            let mut sorted = expected.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(forbidden_list(system), sorted, "entry {i}");
            for bullet in &out[i].enhanced_bullets {
                expected.extend(leading_verb(bullet));
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_response_uses_fallback_and_pass_continues() {
        let llm = ScriptedGateway::new([
            Some("I'd be happy to help! Here are some bullets..."),
            None,
            Some(r#"{"items": ["Deployed X to 4 regions"]}"#),
        ]);
        let entries = vec![entry("Analyst", ""), entry("Intern", ""), entry("SRE", "")];

        let out = rewrite_entries(entries, &ctx("", Tone::Standard), &llm).await;

        assert_eq!(
            out[0].enhanced_bullets,
            vec!["Managed Analyst responsibilities.", "Optimized team workflows."]
        );
        assert_eq!(out[1].enhanced_bullets[0], "Managed Intern responsibilities.");
        assert_eq!(out[2].enhanced_bullets, vec!["Deployed X to 4 regions"]);
        // Fallback verbs feed the accumulator like any other bullets.
        assert_eq!(forbidden_list(&llm.calls()[2].0), vec!["Managed", "Optimized"]);
    }

    #[tokio::test]
    async fn test_rewrite_overwrites_existing_bullets() {
        let llm = ScriptedGateway::replying([r#"["Fresh bullet 1"]"#]);
        let mut stale = entry("Engineer", "built stuff");
        stale.enhanced_bullets = vec!["old one".into(), "old two".into()];

        let out = rewrite_entries(vec![stale], &ctx("", Tone::Standard), &llm).await;
        assert_eq!(out[0].enhanced_bullets, vec!["Fresh bullet 1"]);
    }

    #[tokio::test]
    async fn test_order_and_other_fields_are_preserved() {
        let llm = ScriptedGateway::replying([r#"["A 1"]"#, r#"["B 2"]"#]);
        let mut first = entry("First", "one");
        first.company = "Acme".into();
        let entries = vec![first, entry("Second", "two")];

        let out = rewrite_entries(entries, &ctx("", Tone::Standard), &llm).await;
        assert_eq!(out[0].role, "First");
        assert_eq!(out[0].company, "Acme");
        assert_eq!(out[1].role, "Second");
    }

    #[tokio::test]
    async fn test_prompts_carry_entry_fields_tone_and_context() {
        let llm = ScriptedGateway::replying([r#"["X 1"]"#]);
        let mut e = entry("Backend Engineer", "wrote APIs");
        e.tech_stack = "Rust, Postgres".into();

        rewrite_entries(vec![e], &ctx("We need Postgres experts", Tone::Humanized), &llm).await;

        let (system, user) = &llm.calls()[0];
        assert!(system.contains("TARGET ROLE: Platform Engineer"));
        assert!(system.contains("HUMANIZER"));
        assert!(system.contains("We need Postgres experts"));
        assert!(system.contains("user's stack (Rust, Postgres)"));
        assert!(user.contains("Rewrite this job into 3 bullets."));
        assert!(user.contains("Role: Backend Engineer"));
        assert!(user.contains("Raw Summary: wrote APIs"));
    }

    #[tokio::test]
    async fn test_missing_jd_uses_generic_context_and_long_jd_is_truncated() {
        let llm = ScriptedGateway::replying([r#"["X 1"]"#, r#"["Y 1"]"#]);
        rewrite_entries(vec![entry("A", "")], &ctx("   ", Tone::Standard), &llm).await;
        assert!(llm.calls()[0].0.contains(GENERIC_JD_CONTEXT));

        let long_jd = "¤".repeat(JD_LIMIT + 100);
        rewrite_entries(vec![entry("B", "")], &ctx(&long_jd, Tone::Standard), &llm).await;
        assert_eq!(llm.calls()[1].0.matches('¤').count(), JD_LIMIT);
    }

    #[tokio::test]
    async fn test_empty_fields_still_get_a_rewrite_attempt() {
        let llm = ScriptedGateway::replying([r#"["Handled 3 things"]"#]);
        let out = rewrite_entries(vec![ExperienceEntry::default()], &ctx("", Tone::Standard), &llm).await;
        assert_eq!(llm.call_count(), 1);
        assert!(llm.calls()[0].1.contains("Tech Stack: \n"));
        assert_eq!(out[0].enhanced_bullets, vec!["Handled 3 things"]);
    }

    #[tokio::test]
    async fn test_identical_responses_give_identical_passes() {
        let script = [r#"["Built A 1", "Led B 2"]"#, "garbage", r#"{"bullets": ["Cut C 3"]}"#];
        let entries = vec![entry("A", "a"), entry("B", "b"), entry("C", "c")];

        let first_llm = ScriptedGateway::replying(script);
        let second_llm = ScriptedGateway::replying(script);
        let first = rewrite_entries(entries.clone(), &ctx("jd", Tone::Humanized), &first_llm).await;
        let second = rewrite_entries(first.clone(), &ctx("jd", Tone::Humanized), &second_llm).await;

        assert_eq!(first, second);
        assert_eq!(first_llm.calls(), second_llm.calls());
    }
}
