// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every system prompt: the gateway requests `json_object`
/// output, but some providers only honour it when the prompt agrees.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";

/// Joins a system prompt body with the JSON-only instruction.
pub fn with_json_only(body: &str) -> String {
    format!("{}\n\n{}", body.trim_end(), JSON_ONLY_INSTRUCTION)
}
