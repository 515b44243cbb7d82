//! Review text normalization applied before vectorization

use std::sync::OnceLock;

use regex::Regex;

/// Anything that is not a letter, number, underscore or whitespace.
/// Combining marks and connector punctuation count as punctuation here.
const PUNCTUATION_PATTERN: &str = r"[^\p{L}\p{N}_\s]";

fn punctuation_regex() -> &'static Regex {
    static PUNCTUATION_RE: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION_RE
        .get_or_init(|| Regex::new(PUNCTUATION_PATTERN).expect("punctuation pattern is a valid regex"))
}

/// Lowercase the text and strip punctuation and symbols
pub fn clean_text(text: &str) -> String {
    punctuation_regex()
        .replace_all(&text.to_lowercase(), "")
        .into_owned()
}

/// Trim surrounding whitespace, returning `None` when nothing is left
pub fn normalize_review(review: Option<&str>) -> Option<&str> {
    review.map(str::trim).filter(|r| !r.is_empty())
}
