//! Integration tests for the relay
//!
//! These tests use wiremock to stand in for the upstream post API and
//! exercise pagination, the feed pipeline, and the HTTP boundary end-to-end.

mod common;
mod feed_tests;
mod server_tests;
