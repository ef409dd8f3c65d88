mod common;

use common::articles_body;
use mockito::Matcher;
use news_summarizer::{news::record, NewsFetcher};
use serde_json::json;

fn search_query(topic: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), topic.into()),
        Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        Matcher::UrlEncoded("pageSize".into(), "5".into()),
    ])
}

#[tokio::test]
async fn test_fetch_news_returns_records_in_provider_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/everything")
        .match_query(search_query("bitcoin"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(articles_body(json!([
            {"source": {"id": null, "name": "Reuters"}, "author": "A", "title": "First",
             "description": "d1", "url": "https://a", "content": "c1"},
            {"source": {"name": "Bloomberg"}, "author": "B", "title": "Second",
             "description": "d2", "url": "https://b", "content": "c2"}
        ])))
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    let records = fetcher.fetch_news("bitcoin").await;

    mock.assert_async().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "First");
    assert_eq!(records[0].source_name, "Reuters");
    assert_eq!(records[1].title, "Second");
    assert_eq!(records[1].content, "c2");
}

#[tokio::test]
async fn test_fetch_news_substitutes_only_missing_fields() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/everything")
        .match_query(search_query("rust"))
        .with_status(200)
        .with_body(articles_body(json!([
            {"title": "Only a title", "description": "Present"}
        ])))
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    let records = fetcher.fetch_news("rust").await;

    assert_eq!(records.len(), 1);
    let article = &records[0];
    assert_eq!(article.title, "Only a title");
    assert_eq!(article.description, "Present");
    assert_eq!(article.source_name, record::UNKNOWN_SOURCE);
    assert_eq!(article.author, record::UNKNOWN_AUTHOR);
    assert_eq!(article.url, record::NO_URL);
    assert_eq!(article.content, record::NO_CONTENT);
}

#[tokio::test]
async fn test_fetch_news_caps_at_page_size() {
    let mut server = mockito::Server::new_async().await;
    let articles: Vec<_> = (0..7).map(|i| json!({"title": format!("t{i}")})).collect();
    server
        .mock("GET", "/everything")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(articles_body(json!(articles)))
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    let records = fetcher.fetch_news("markets").await;

    assert_eq!(records.len(), news_summarizer::news::PAGE_SIZE);
    assert_eq!(records[4].title, "t4");
}

#[tokio::test]
async fn test_non_200_degrades_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/everything")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status":"error","code":"apiKeyInvalid"}"#)
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    assert!(fetcher.fetch_news("bitcoin").await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_article_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/everything")
        .match_query(search_query("zzzqqqnonexistent"))
        .with_status(200)
        .with_body(articles_body(json!([])))
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    assert!(fetcher.fetch_news("zzzqqqnonexistent").await.is_empty());
}

#[tokio::test]
async fn test_network_failure_degrades_to_empty() {
    let fetcher =
        NewsFetcher::new(Some("test-key".to_string())).with_base_url("http://127.0.0.1:1");
    assert!(fetcher.fetch_news("bitcoin").await.is_empty());
}

#[tokio::test]
async fn test_invalid_json_degrades_to_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/everything")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let fetcher = NewsFetcher::new(Some("test-key".to_string())).with_base_url(server.url());
    assert!(fetcher.fetch_news("bitcoin").await.is_empty());
}
