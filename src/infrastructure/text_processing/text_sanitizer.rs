use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Hyperlink-shaped tokens: optional scheme, then a label followed by one or
/// two dotted labels. Bare `word.word` tokens match too.
pub const NOISE_PATTERN: &str = r"(https://www\.|http://www\.|https://|http://)?[a-zA-Z0-9]{2,}(\.[a-zA-Z0-9]{2,})(\.[a-zA-Z0-9]{2,})?";

static NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NOISE_PATTERN).unwrap());

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Removes every substring matching [`NOISE_PATTERN`].
///
/// Deleting a match can join its neighbours into a new match
/// (`abhttp://cd.ef.gh.ij` leaves `ab.ij`), so removal repeats until the text
/// stops changing. Each pass shortens the text, which bounds the loop.
pub fn strip_noise(text: &str) -> String {
    let mut current = match NOISE.replace_all(text, "") {
        Cow::Borrowed(unchanged) => return unchanged.to_string(),
        Cow::Owned(stripped) => stripped,
    };

    loop {
        match NOISE.replace_all(&current, "") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(stripped) => current = stripped,
        }
    }
}

/// Layout cleanup for text pulled out of documents: NFKC (which splits
/// ligatures), re-joins words hyphenated across line breaks, collapses runs of
/// whitespace and keeps paragraph breaks. A hyphenated compound that happens
/// to break at its hyphen is joined as well (`self-\ncontained`).
pub fn tidy_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut result = String::with_capacity(de_hyphenated.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in de_hyphenated.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prev_was_blank = true;
        } else {
            if !first_content && prev_was_blank {
                result.push_str("\n\n");
            } else if !first_content {
                result.push('\n');
            }
            collapse_internal_whitespace(trimmed, &mut result);
            prev_was_blank = false;
            first_content = false;
        }
    }

    result.trim().to_string()
}

/// Full cleanup applied to one extracted document segment.
pub fn sanitize_segment(raw: &str) -> String {
    strip_noise(&tidy_extracted_text(raw))
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
