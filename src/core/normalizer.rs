use crate::domain::contract;
use crate::domain::model::{MonthlyLuck, SajuResult};
use regex::Regex;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    FENCE_RE.get_or_init(|| Regex::new(&contract::fenced_block_pattern()).unwrap())
}

/// Splits raw model output into narrative text and the monthly series.
///
/// Only the first fenced block is considered. When its payload is a valid
/// `MonthlyLuck` array the block is cut out and the rest trimmed; when it is
/// not, the raw text is returned untouched (fence included) with an empty
/// series. Never fails.
pub fn normalize(raw: &str) -> SajuResult {
    let Some(caps) = fence_regex().captures(raw) else {
        return fallback(raw);
    };
    let (Some(block), Some(payload)) = (caps.get(0), caps.get(1)) else {
        return fallback(raw);
    };

    match serde_json::from_str::<Vec<MonthlyLuck>>(payload.as_str()) {
        Ok(monthly_luck) => {
            let mut narrative = String::with_capacity(raw.len() - block.len());
            narrative.push_str(&raw[..block.start()]);
            narrative.push_str(&raw[block.end()..]);

            tracing::debug!(
                "Extracted {} monthly luck records from fenced block",
                monthly_luck.len()
            );
            SajuResult {
                narrative_text: narrative.trim().to_string(),
                monthly_luck,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to parse monthly luck JSON: {}", e);
            fallback(raw)
        }
    }
}

fn fallback(raw: &str) -> SajuResult {
    SajuResult {
        narrative_text: raw.to_string(),
        monthly_luck: Vec::new(),
    }
}
