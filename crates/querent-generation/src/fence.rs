//! Markdown code-fence removal for model output.

const FENCE: &str = "```";

/// Strip one surrounding code fence from `raw`.
///
/// A leading fence line is dropped, and the last line is dropped when it is a
/// fence too. Fences inside the body are left alone. When the text opens with
/// a fence but has no newline, or nothing is left after stripping, the
/// trimmed input is returned as is.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed.to_string();
    }
    let Some((_, body)) = trimmed.split_once('\n') else {
        return trimmed.to_string();
    };

    let body = match body.rsplit_once('\n') {
        Some((head, last)) if last.trim().starts_with(FENCE) => head,
        None if body.trim().starts_with(FENCE) => "",
        _ => body,
    };

    let stripped = body.trim();
    if stripped.is_empty() {
        trimmed.to_string()
    } else {
        stripped.to_string()
    }
}
