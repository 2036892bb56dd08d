// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// Appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_RULES: &str = "\
- Respond ONLY with valid JSON.
- Do NOT include any text outside the JSON object.
- Do NOT include explanations or apologies.";
