//! Hashtag classification
//!
//! A hashtag is `#` followed by one or more ASCII word characters.

use regex::Regex;
use std::sync::LazyLock;

/// Tag a post must carry to be relayed
pub const POETRY_TAG: &str = "#poetry";

/// Category used when a post has no second hashtag
pub const DEFAULT_CATEGORY: &str = "Throwetry";

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[A-Za-z0-9_]+").expect("valid hashtag regex"));

/// Returns every hashtag in `text`, in order of appearance
pub fn extract_hashtags(text: &str) -> Vec<&str> {
    HASHTAG_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// True when one of the tags is exactly `#poetry`, ignoring case
pub fn has_poetry_tag(tags: &[&str]) -> bool {
    tags.iter().any(|tag| tag.eq_ignore_ascii_case(POETRY_TAG))
}

/// Derives the display category from the second hashtag
///
/// The rule is positional: whatever tag comes second names the category,
/// whether or not the first one is `#poetry`. `#sONNET` becomes `Sonnet`.
pub fn derive_category(tags: &[&str]) -> String {
    match tags.get(1) {
        Some(tag) => capitalize(tag.trim_start_matches('#')).trim().to_string(),
        None => DEFAULT_CATEGORY.to_string(),
    }
}

/// Removes every hashtag from `text`
pub fn remove_hashtags(text: &str) -> String {
    HASHTAG_RE.replace_all(text, "").into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
