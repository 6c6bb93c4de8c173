// Structured extraction via the model: resume profile, job profile, skills match.
// All LLM calls go through llm_client — no direct API calls here.
//
// A reply that is not valid JSON degrades to a profile carrying only an
// `error` marker so the advanced pipeline can still produce an email.

pub mod fields;
pub mod job;
pub mod matching;
pub mod prompts;
pub mod resume;

use serde::Serialize;

/// Pretty JSON for embedding a profile in a follow-up prompt.
pub fn pretty_json<T: Serialize>(value: &T) -> String {
    // Profiles are plain maps of strings and JSON values; serialization cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
