//! The poetry feed: fetch every post, then keep and normalize the poems

use crate::poetry::{structure_posts_data, PoemRecord};
use crate::upstream::PostFetcher;
use crate::{UpstreamError, UpstreamResult};
use std::time::Duration;

/// Fetches a campaign's posts and returns its poems in post order
///
/// Any upstream failure fails the whole feed; no partial feed is returned.
pub async fn get_poetry_feed(
    fetcher: &PostFetcher,
    campaign_id: &str,
) -> UpstreamResult<Vec<PoemRecord>> {
    tracing::info!("Fetching posts for campaign {}", campaign_id);
    let collection = fetcher.fetch_all_posts(campaign_id).await?;
    tracing::info!("Fetched {} posts", collection.posts.len());

    Ok(structure_posts_data(
        &collection.posts,
        &collection.included,
    ))
}

/// Like [`get_poetry_feed`], abandoning the fetch once `limit` elapses
///
/// Pages fetched before the deadline are dropped.
pub async fn get_poetry_feed_with_timeout(
    fetcher: &PostFetcher,
    campaign_id: &str,
    limit: Duration,
) -> UpstreamResult<Vec<PoemRecord>> {
    match tokio::time::timeout(limit, get_poetry_feed(fetcher, campaign_id)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Feed fetch exceeded {:?}", limit);
            Err(UpstreamError::Timeout { limit })
        }
    }
}
