// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Closing instruction appended to every prompt that expects JSON back.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return only the JSON without any explanations or markdown formatting.";

/// Fills `{name}` placeholders in a template in a single pass.
///
/// Substituted values are never rescanned, so a resume that happens to contain
/// `{job_description}` stays literal. Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
