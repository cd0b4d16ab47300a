// All LLM prompt constants for the resume pipeline.
// Placeholders are `{name}` and are filled in a single pass by `fill`, so
// user text containing braces is never re-substituted.

/// Leading characters of extracted resume text sent to the parser.
pub const RESUME_TEXT_LIMIT: usize = 8000;
/// Leading characters of a job description sent to any prompt.
pub const JD_LIMIT: usize = 3000;
/// Context used by the rewriter when no job description was supplied.
pub const GENERIC_JD_CONTEXT: &str = "General industry standards for this role.";

/// Number of bullets requested per experience entry.
pub const BULLETS_PER_ENTRY: usize = 3;

pub const PARSE_SYSTEM: &str = r#"You are a Resume Parser. Extract data into this exact JSON structure:
{
    "full_name": "Name",
    "contact_info": "Phone | Email | LinkedIn",
    "education": [{"school": "", "degree": "", "year": ""}],
    "skills": { "Languages": "...", "Frameworks": "..." },
    "experience": [
        {
            "role": "Job Title",
            "company": "Company Name",
            "duration": "Dates",
            "location": "City",
            "tech_stack": "Tools used",
            "summary_input": "Full original text"
        }
    ]
}"#;

/// Replace: {raw_text}
pub const PARSE_PROMPT_TEMPLATE: &str = "Parse this:\n{raw_text}";

/// Replace: {target_role}, {style_guide}, {jd_context}, {forbidden_verbs}, {tech_stack}
pub const REWRITE_SYSTEM_TEMPLATE: &str = r#"You are an expert Resume Writer optimizing for a specific Job Description.
TARGET ROLE: {target_role}

{style_guide}
JOB DESCRIPTION (JD) CONTEXT:
{jd_context}

CRITICAL RULES:
1. UNIQUE ACTION VERBS: Do NOT use these words if possible: [{forbidden_verbs}].
2. KEYWORD INJECTION: If the JD mentions specific skills matching the user's stack ({tech_stack}), include them.
3. METRICS: Every bullet point must have a quantifiable result."#;

/// Replace: {bullet_count}, {role}, {tech_stack}, {summary}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite this job into {bullet_count} bullets.

Role: {role}
Tech Stack: {tech_stack}
Raw Summary: {summary}

Output format: JSON list of strings (e.g. { "bullets": ["..."] })"#;

pub const AUDIT_SYSTEM: &str = r#"You are an ATS (Applicant Tracking System) Scanner.
Your job is to compare a Resume against a Job Description (JD).
OUTPUT FORMAT (JSON):
{
    "score": <integer 0-100>,
    "missing_keywords": ["keyword1", "keyword2"],
    "suggestions": ["suggestion1", "suggestion2"]
}"#;

/// Replace: {jd_text}, {resume_text}
pub const AUDIT_PROMPT_TEMPLATE: &str = "JOB DESCRIPTION: {jd_text}\nRESUME: {resume_text}";

pub const COVER_LETTER_SYSTEM: &str = "Write a professional cover letter connecting the \
    candidate's experience to the JD. Return JSON: { \"cover_letter\": \"text...\" }";

/// Replace: {candidate}, {jd_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "Candidate: {candidate}\nJD: {jd_text}";

/// Substitutes `{key}` placeholders in one left-to-right pass.
/// Unknown `{...}` sequences (such as literal JSON) are copied unchanged.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find(|(key, _)| {
            tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}')
        });
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
