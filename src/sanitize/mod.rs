pub mod repair;

use serde_json::Value;
use tracing::debug;
use crate::error::{GenerationError, preview};
use crate::model::RoadmapResult;
use repair::repair_json;

/// Longest slice of raw completion text carried in an error.
pub const PREVIEW_LIMIT: usize = 300;

/// Recover a roadmap from raw completion text.
///
/// Strips fences and commentary, parses, repairs once if needed, then checks the
/// result has a non-empty `roadmap` list.
pub fn sanitize_and_parse(raw: &str) -> Result<RoadmapResult, GenerationError> {
    let payload = extract_payload(raw).ok_or_else(|| malformed("no JSON object found", raw))?;

    let value = match serde_json::from_str::<Value>(payload) {
        Ok(v) => v,
        Err(first) => {
            debug!(error = %first, "Direct parse failed, attempting repair");
            let repaired = repair_json(payload);
            serde_json::from_str::<Value>(&repaired)
                .map_err(|e| malformed(&format!("invalid JSON after repair: {}", e), raw))?
        }
    };

    validate_shape(&value).map_err(|reason| malformed(reason, raw))?;

    serde_json::from_value::<RoadmapResult>(value)
        .map_err(|e| malformed(&format!("roadmap does not match the node shape: {}", e), raw))
}

/// Trim, strip code fences, then cut from the first `{` to the last `}`.
pub fn extract_payload(raw: &str) -> Option<&str> {
    let text = strip_fences(raw.trim());
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn strip_fences(text: &str) -> &str {
    let mut text = text;
    if text.starts_with("```") {
        // Drop the fence line, including any language tag.
        text = match text.find('\n') {
            Some(nl) => &text[nl + 1..],
            None => text.trim_start_matches('`'),
        };
    }
    if let Some(stripped) = text.trim_end().strip_suffix("```") {
        text = stripped;
    }
    text.trim()
}

fn validate_shape(value: &Value) -> Result<(), &'static str> {
    let obj = value.as_object().ok_or("top-level JSON value is not an object")?;
    match obj.get("roadmap").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err("missing or empty roadmap field"),
    }
}

fn malformed(reason: &str, raw: &str) -> GenerationError {
    GenerationError::MalformedOutput {
        reason: reason.to_string(),
        preview: preview(raw, PREVIEW_LIMIT),
    }
}
