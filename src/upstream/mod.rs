//! Upstream module: retrieval of a campaign's posts from the Patreon API
//!
//! This module contains:
//! - HTTP client construction with the client-identifying User-Agent
//! - The JSON:API wire types for posts, included resources, and errors
//! - The cursor-paginated fetch loop

mod client;
mod fetcher;
mod types;

pub use client::{build_http_client, user_agent_string};
pub use fetcher::{
    PostFetcher, CAMPAIGN_FIELDS, CURSOR_PARAM, INCLUDE, POST_FIELDS, USER_FIELDS,
};
pub use types::{
    Cursors, ErrorBody, ErrorObject, IncludedResource, PageMeta, Pagination, PostAttributes,
    PostCollection, PostsPage, RawPost,
};
