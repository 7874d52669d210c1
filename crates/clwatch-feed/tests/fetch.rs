//! Integration tests for `FeedClient` using wiremock HTTP mocks.

use clwatch_feed::{FeedClient, FeedError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dc="http://purl.org/dc/elements/1.1/"
         xmlns="http://purl.org/rss/1.0/">
  <channel><title>craigslist denver | cars &amp; trucks</title></channel>
  <item>
    <title>2016 VW GTI SE &amp;#x0024;17500</title>
    <link>https://denver.craigslist.org/cto/d/gti/7001.html</link>
    <description>Clean title, one owner.</description>
    <dc:date>2026-08-20T14:02:00-06:00</dc:date>
  </item>
</rdf:RDF>"#;

fn test_client() -> FeedClient {
    FeedClient::new(30, "clwatch/0.1 (test)").expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_listings_parses_feed_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/cta"))
        .and(query_param("format", "rss"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(FEED_BODY, "application/rss+xml"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/search/cta?format=rss&searchNearby=1", server.uri());
    let listings = test_client()
        .fetch_listings(&url)
        .await
        .expect("should fetch and parse");

    assert_eq!(listings.len(), 1);
    assert_eq!(
        listings[0].id,
        "https://denver.craigslist.org/cto/d/gti/7001.html"
    );
    assert_eq!(listings[0].title, "2016 VW GTI SE &#x0024;17500");
    assert_eq!(listings[0].summary, "Clean title, one owner.");
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/search/cta?format=rss", server.uri());
    let err = test_client().fetch_listings(&url).await.unwrap_err();
    assert!(matches!(err, FeedError::Http(_)), "got: {err:?}");
}
