//! Pattern-based markup rewrites
//!
//! These are not a structural HTML parser. They target the stray spaces
//! inside tags left by the post editor, and the output is not sanitized.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script regex"));
static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*br\s*>").expect("valid line break regex"));
static SPACED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*(/?\s*[A-Za-z0-9_]+)\s*>").expect("valid spaced tag regex")
});
static SPACE_AFTER_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+").expect("valid trailing space regex"));
static SPACE_BEFORE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+<").expect("valid leading space regex"));
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"));

/// Reduces markup to plain text
///
/// `<script>` and `<style>` blocks are dropped with their content, then every
/// remaining tag is replaced by a single space so words on either side of a
/// tag stay apart.
pub fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_RE.replace_all(html, "");
    let without_styles = STYLE_BLOCK_RE.replace_all(&without_scripts, "");
    TAG_RE.replace_all(&without_styles, " ").into_owned()
}

/// Tidies editor markup
///
/// Rewrites run in order; line breaks must be normalized before inner tag
/// whitespace is removed:
/// 1. `< br >` and similar become `<br>`
/// 2. whitespace just inside a bare tag's brackets is removed
/// 3. whitespace right after `>` or right before `<` is removed
/// 4. runs of two or more whitespace characters become one space
/// 5. the result is trimmed
///
/// Applying it to its own output changes nothing.
pub fn clean_html_content(html: &str) -> String {
    let html = LINE_BREAK_RE.replace_all(html, "<br>");
    let html = SPACED_TAG_RE.replace_all(&html, "<${1}>");
    let html = SPACE_AFTER_TAG_RE.replace_all(&html, ">");
    let html = SPACE_BEFORE_TAG_RE.replace_all(&html, "<");
    let html = WHITESPACE_RUN_RE.replace_all(&html, " ");
    html.trim().to_string()
}
