//! Poetry module: turns raw posts into presentation-ready poems
//!
//! Classification is driven entirely by the hashtags the creator writes into
//! a post. A post is a poem when it carries `#poetry`; its second hashtag
//! names the category. Markup is tidied but not sanitized.

mod hashtags;
mod markup;

pub use hashtags::{
    derive_category, extract_hashtags, has_poetry_tag, remove_hashtags, DEFAULT_CATEGORY,
    POETRY_TAG,
};
pub use markup::{clean_html_content, strip_html};

use crate::upstream::{IncludedResource, RawPost};
use serde::{Deserialize, Serialize};

/// A poem as served to the front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    pub title: String,
    pub category: String,
    pub content: String,
}

/// Converts one post into a poem, or `None` when the post does not qualify
///
/// A post is skipped when its content is empty or when no hashtag in its
/// plain text equals `#poetry` (ignoring case). Hashtags are detected on the
/// stripped text but removed from the original markup.
pub fn structure_post(post: &RawPost) -> Option<PoemRecord> {
    let content = post.content()?;

    let plain_content = strip_html(content);
    let tags = extract_hashtags(&plain_content);
    if !has_poetry_tag(&tags) {
        return None;
    }

    let category = derive_category(&tags);
    let without_hashtags = remove_hashtags(content);
    let cleaned = clean_html_content(without_hashtags.trim());

    Some(PoemRecord {
        title: post.title().trim().to_string(),
        category,
        content: cleaned,
    })
}

/// Keeps the poetry posts of a fetch and normalizes them, preserving order
///
/// `included` is accepted for parity with the fetch result but is not
/// consulted. Posts that do not qualify are skipped silently; an empty
/// result is not an error.
pub fn structure_posts_data(posts: &[RawPost], included: &[IncludedResource]) -> Vec<PoemRecord> {
    tracing::debug!(
        "Structuring {} posts ({} included resources)",
        posts.len(),
        included.len()
    );

    let poems: Vec<PoemRecord> = posts
        .iter()
        .filter_map(|post| {
            let poem = structure_post(post);
            if poem.is_none() {
                tracing::trace!(
                    "Skipping post {} (published {}, public: {}): not a poetry post",
                    post.id,
                    post.published_at().unwrap_or("unknown"),
                    post.is_public()
                );
            }
            poem
        })
        .collect();

    tracing::info!("Total poems structured: {}", poems.len());
    poems
}
