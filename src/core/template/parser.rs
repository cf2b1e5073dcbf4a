use crate::core::error::PipelineError;
use serde_json::Value;

/// Parse template text, salvaging trailing garbage once if the strict parse fails.
///
/// Storage buckets and copy/paste both tend to append junk after the document
/// (an HTML error page, a stray newline plus shell prompt). The salvage pass
/// keeps the first complete top-level JSON value and drops everything after it.
/// At most two parse attempts are made.
pub fn parse_with_recovery(raw: &str) -> Result<Value, PipelineError> {
    let text = raw.trim_start_matches('\u{feff}').trim();
    if text.is_empty() {
        return Err(PipelineError::InvalidJson(
            "template text is empty".to_string(),
        ));
    }

    let strict_error = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let Some(end) = salvage_end(text) else {
        return Err(PipelineError::InvalidJson(strict_error.to_string()));
    };

    tracing::debug!(
        original_len = text.len(),
        salvaged_len = end,
        "strict JSON parse failed; retrying with trailing content removed"
    );

    serde_json::from_str::<Value>(&text[..end])
        .map_err(|_| PipelineError::InvalidJson(strict_error.to_string()))
}

/// Byte offset just past the terminator of the leading JSON value.
///
/// Walks the text with a string-aware bracket counter and stops where the
/// outermost `{`/`[` closes. When the brackets never balance, falls back to the
/// last `}` or `]` in the text.
fn salvage_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    return Some(offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    text.rfind(&['}', ']'][..]).map(|idx| idx + 1)
}
