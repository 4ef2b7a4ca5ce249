//! Output contract shared by the prompt builder and the response normalizer.
//!
//! The model is told to append the monthly series inside a fenced block; the
//! normalizer looks for exactly that fence. Bump [`CONTRACT_VERSION`] whenever
//! the fence or the record shape changes.

pub const CONTRACT_VERSION: u32 = 1;

/// Language tag on the opening fence.
pub const FENCE_LANG: &str = "json";

pub const FENCE: &str = "```";

/// Shape of each record inside the fenced array, as shown to the model.
pub const SERIES_SCHEMA: &str =
    r#"[{"month": 1, "score": 75, "keyword": "키워드"}, ... {"month": 12, "score": 60, "keyword": "키워드"}]"#;

/// Opening marker, e.g. "```json".
pub fn opening_fence() -> String {
    format!("{}{}", FENCE, FENCE_LANG)
}

/// Regex matching the first fenced block lazily; group 1 is the payload.
pub fn fenced_block_pattern() -> String {
    format!(
        r"(?s){fence}{lang}\s*(.*?)\s*{fence}",
        fence = regex::escape(FENCE),
        lang = regex::escape(FENCE_LANG),
    )
}

/// Example block included in the system instruction.
pub fn example_block() -> String {
    format!("{}\n{}\n{}", opening_fence(), SERIES_SCHEMA, FENCE)
}
