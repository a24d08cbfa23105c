//! Shared fixtures for the integration tests

use poetry_relay::config::{ApiConfig, Config, ServerConfig, UserAgentConfig};
use poetry_relay::upstream::{PostFetcher, CURSOR_PARAM};
use serde_json::{json, Value};
use wiremock::{Match, Request};

pub const CAMPAIGN_ID: &str = "1234567";
pub const ACCESS_TOKEN: &str = "test-token";
pub const ALLOWED_ORIGIN: &str = "https://poems.example.com";
pub const POSTS_PATH: &str = "/api/oauth2/v2/campaigns/1234567/posts";

/// Creates a test configuration pointing at the given upstream
pub fn create_test_config(base_url: &str, max_pages: Option<u32>) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            campaign_id: CAMPAIGN_ID.to_string(),
            access_token: Some(ACCESS_TOKEN.to_string()),
            max_pages,
            request_timeout_secs: 5,
            feed_timeout_secs: 10,
        },
        user_agent: UserAgentConfig {
            app_name: "PoetryRelay".to_string(),
            app_version: "1.0".to_string(),
            contact_email: "poet@example.com".to_string(),
        },
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            allowed_origin: ALLOWED_ORIGIN.to_string(),
        },
    }
}

pub fn create_fetcher(base_url: &str, max_pages: Option<u32>) -> PostFetcher {
    PostFetcher::from_config(&create_test_config(base_url, max_pages))
        .expect("Failed to build fetcher")
}

pub fn post_json(id: &str, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": "post",
        "attributes": {
            "title": title,
            "content": content,
            "published_at": "2024-03-01T12:00:00.000+00:00",
            "is_public": true,
            "is_paid": false,
            "url": format!("/posts/{}", id)
        }
    })
}

pub fn page_json(posts: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "data": posts,
        "included": [
            {"id": "77", "type": "campaign", "attributes": {"creation_name": "poems"}}
        ],
        "meta": {"pagination": {"cursors": {"next": next}}}
    })
}

/// Matches requests that carry no pagination cursor (the first page)
pub struct NoCursor;

impl Match for NoCursor {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == CURSOR_PARAM)
    }
}
