//! Cursor-paginated retrieval of a campaign's posts
//!
//! This module handles:
//! - Building the post listing URL with the fixed field and include sets
//! - Authorizing each request with the creator access token
//! - Following `meta.pagination.cursors.next` until upstream stops sending one
//! - Turning upstream error payloads into [`UpstreamError`]

use crate::config::{ApiConfig, Config};
use crate::upstream::client::build_http_client;
use crate::upstream::types::{ErrorBody, PostCollection, PostsPage};
use crate::{RelayError, UpstreamError, UpstreamResult};
use reqwest::Client;
use std::fmt;
use url::Url;

/// Post attributes requested on every page
pub const POST_FIELDS: &str =
    "app_id,app_status,content,embed_data,embed_url,is_paid,is_public,tiers,published_at,title,url";

/// Related resources included alongside posts
pub const INCLUDE: &str = "campaign,user";

/// Attributes requested for the included campaign
pub const CAMPAIGN_FIELDS: &str = "creation_name,summary,patron_count";

/// Attributes requested for the included user
pub const USER_FIELDS: &str = "full_name,vanity,url,image_url";

/// Query parameter carrying the pagination cursor
pub const CURSOR_PARAM: &str = "page[cursor]";

/// Fetches posts from the upstream post listing on behalf of one creator
///
/// The access token is injected at construction and never leaves this
/// struct except in the `Authorization` header.
#[derive(Clone)]
pub struct PostFetcher {
    client: Client,
    api_base: String,
    access_token: String,
    max_pages: Option<u32>,
}

impl fmt::Debug for PostFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostFetcher")
            .field("api_base", &self.api_base)
            .field("access_token", &"<redacted>")
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl PostFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client, api: &ApiConfig) -> Self {
        Self {
            client,
            api_base: api.base_url.trim_end_matches('/').to_string(),
            access_token: api.access_token().to_string(),
            max_pages: api.max_pages,
        }
    }

    /// Builds the HTTP client from the configuration and wraps it
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        let client = build_http_client(&config.user_agent, &config.api)?;
        Ok(Self::new(client, &config.api))
    }

    /// Returns the page-count safety limit, if any
    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Builds the listing URL for one page
    ///
    /// The cursor parameter is omitted for the first page.
    pub fn posts_url(&self, campaign_id: &str, cursor: Option<&str>) -> UpstreamResult<Url> {
        let mut url = Url::parse(&format!(
            "{}/api/oauth2/v2/campaigns/{}/posts",
            self.api_base, campaign_id
        ))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("fields[post]", POST_FIELDS);
            query.append_pair("include", INCLUDE);
            query.append_pair("fields[campaign]", CAMPAIGN_FIELDS);
            query.append_pair("fields[user]", USER_FIELDS);
            if let Some(cursor) = cursor {
                query.append_pair(CURSOR_PARAM, cursor);
            }
        }

        Ok(url)
    }

    /// Fetches and decodes a single page of the listing
    ///
    /// # Returns
    ///
    /// * `Ok(PostsPage)` - Upstream answered with a success status
    /// * `Err(UpstreamError::Status)` - Non-success status, with upstream's detail message
    /// * `Err(UpstreamError::Http)` - The request itself failed
    /// * `Err(UpstreamError::Decode)` - A success body that is not a post page
    pub async fn fetch_page(
        &self,
        campaign_id: &str,
        cursor: Option<&str>,
    ) -> UpstreamResult<PostsPage> {
        let url = self.posts_url(campaign_id, cursor)?;
        tracing::debug!("Fetch URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|source| UpstreamError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Http {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            tracing::error!("Patreon API error ({}): {}", status, body);
            // Non-JSON error bodies fall back to the generic detail
            let error: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                detail: error.detail(),
            });
        }

        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetches every page of the campaign's posts
    ///
    /// Pages are requested strictly in sequence since each request needs the
    /// previous page's cursor. Posts and included resources are accumulated
    /// in the order upstream returns them. A failure on any page fails the
    /// whole call and discards what was accumulated.
    ///
    /// Without `max-pages` the loop ends only when upstream stops returning a
    /// cursor. With it, a listing that still has a next cursor after the limit
    /// fails with [`UpstreamError::PageLimit`].
    pub async fn fetch_all_posts(&self, campaign_id: &str) -> UpstreamResult<PostCollection> {
        let mut collection = PostCollection::default();
        let mut cursor: Option<String> = None;
        let mut page_count: u32 = 0;

        loop {
            tracing::info!(
                "Fetching page {}. Next page cursor: {}",
                page_count + 1,
                cursor.as_deref().unwrap_or("none")
            );

            let page = self.fetch_page(campaign_id, cursor.as_deref()).await?;
            page_count += 1;

            let next = page.next_cursor().map(str::to_string);
            tracing::debug!(
                "Fetched page {} ({} posts, {} included)",
                page_count,
                page.data.len(),
                page.included.len()
            );

            collection.posts.extend(page.data);
            collection.included.extend(page.included);

            let Some(next) = next else {
                break;
            };

            if let Some(limit) = self.max_pages {
                if page_count >= limit {
                    tracing::warn!("Stopping pagination at the {} page limit", limit);
                    return Err(UpstreamError::PageLimit { limit });
                }
            }

            cursor = Some(next);
        }

        tracing::info!(
            "All pages fetched: {} posts over {} pages",
            collection.posts.len(),
            page_count
        );
        Ok(collection)
    }
}
