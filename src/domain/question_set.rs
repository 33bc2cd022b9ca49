use regex::Regex;
use std::sync::LazyLock;

pub const EXPECTED_QUESTION_COUNT: usize = 10;

static PAIR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*([QA])(\d+)\s*:").unwrap());

/// Read-only view over generated `Q<n>:` / `A<n>:` text.
///
/// The layout is requested from the model, never enforced: this type only
/// inspects it.
pub struct QuestionSet<'a> {
    text: &'a str,
}

impl<'a> QuestionSet<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Markers in document order, e.g. `('Q', 1), ('A', 1), ('Q', 2)`.
    pub fn markers(&self) -> Vec<(char, u32)> {
        PAIR_MARKER
            .captures_iter(self.text)
            .filter_map(|caps| {
                let tag = caps.get(1)?.as_str().chars().next()?;
                let number = caps.get(2)?.as_str().parse().ok()?;
                Some((tag, number))
            })
            .collect()
    }

    /// Number of consecutive `Qn:` followed by `An:` pairs with matching
    /// numbers.
    pub fn pair_count(&self) -> usize {
        self.markers()
            .chunks(2)
            .filter(|pair| matches!(pair, [('Q', q), ('A', a)] if q == a))
            .count()
    }

    pub fn is_well_formed(&self) -> bool {
        let markers = self.markers();
        markers.len() == EXPECTED_QUESTION_COUNT * 2
            && self.pair_count() == EXPECTED_QUESTION_COUNT
            && markers
                .chunks(2)
                .enumerate()
                .all(|(i, pair)| pair[0].1 as usize == i + 1)
    }
}
