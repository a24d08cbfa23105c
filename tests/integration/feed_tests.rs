use crate::common::*;
use poetry_relay::feed::{get_poetry_feed, get_poetry_feed_with_timeout};
use poetry_relay::UpstreamError;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_feed_keeps_poems_across_pages_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .and(NoCursor)
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                post_json("1", " Morning ", "<p>Light< br >falls</p> #poetry #haiku"),
                post_json("2", "Update", "<p>Studio news</p> #news"),
            ],
            Some("cursor-2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .and(query_param("page[cursor]", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                post_json("3", "Evening", "<p>Dusk</p>\n\n<p>again</p> #Poetry"),
                post_json("4", "Blank", ""),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher(&mock_server.uri(), None);
    let poems = get_poetry_feed(&fetcher, CAMPAIGN_ID).await.unwrap();

    assert_eq!(poems.len(), 2);

    assert_eq!(poems[0].title, "Morning");
    assert_eq!(poems[0].category, "Haiku");
    assert_eq!(poems[0].content, "<p>Light<br>falls</p>");

    assert_eq!(poems[1].title, "Evening");
    assert_eq!(poems[1].category, "Throwetry");
    assert_eq!(poems[1].content, "<p>Dusk</p><p>again</p>");
}

#[tokio::test]
async fn test_feed_without_poems_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![post_json("1", "Update", "<p>news</p> #news")],
            None,
        )))
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher(&mock_server.uri(), None);
    let poems = get_poetry_feed(&fetcher, CAMPAIGN_ID).await.unwrap();
    assert!(poems.is_empty());
}

#[tokio::test]
async fn test_feed_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![], None))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher(&mock_server.uri(), None);
    let err = get_poetry_feed_with_timeout(&fetcher, CAMPAIGN_ID, Duration::from_millis(200))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::Timeout { limit } if limit == Duration::from_millis(200)
    ));
    assert_eq!(err.to_string(), "Fetching posts timed out after 200ms");
}
