const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [(&str, &str); 6] = [
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("secret=", "secret=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
    ("sk-", "sk-[REDACTED]"),
];

/// Shortens a prompt for the logs and masks anything that looks like a
/// credential. Truncation counts characters, so non-Latin text is safe.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}... ({} chars total)", &trimmed[..cut], total_chars),
        None => trimmed.to_string(),
    };

    redact_sensitive_patterns(&visible)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let mut result = text.to_string();

    for (marker, replacement) in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(marker) {
            let start = search_from + found;
            let value_start = start + marker.len();
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, replacement);
            search_from = start + replacement.len();
        }
    }

    result
}
