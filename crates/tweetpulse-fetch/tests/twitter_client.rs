//! Integration tests for `TwitterSearchClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tweetpulse_fetch::{
    Accumulator, AccumulatorConfig, Credential, CredentialPool, FetchError, RoundRobinRotation,
    SearchClient, SearchError, SearchFilter, TwitterSearchClient,
};

const SEARCH_PATH: &str = "/tweets/search/recent";

fn test_client(base_url: &str) -> TwitterSearchClient {
    TwitterSearchClient::with_base_url(base_url, 5).expect("client construction should not fail")
}

fn tweets_body(count: usize) -> serde_json::Value {
    let data: Vec<serde_json::Value> = (0..count)
        .map(|n| {
            json!({
                "id": format!("{}", 1000 + n),
                "text": format!("english tweet number {n:03} talking about rust"),
                "edit_history_tweet_ids": [format!("{}", 1000 + n)]
            })
        })
        .collect();
    json!({ "data": data, "meta": { "result_count": count } })
}

/// A full page of non-English tweets that points at `next_token`.
fn foreign_page(next_token: &str) -> serde_json::Value {
    let data: Vec<serde_json::Value> = (0..10)
        .map(|n| {
            json!({
                "id": format!("{}", 2000 + n),
                "text": format!("[fr] un message en français numéro {n:03}")
            })
        })
        .collect();
    json!({ "data": data, "meta": { "result_count": 10, "next_token": next_token } })
}

fn tagged_detector(text: &str) -> String {
    if text.contains("[fr]") {
        "fra".to_owned()
    } else {
        "eng".to_owned()
    }
}

fn keyword(topic: &str) -> SearchFilter {
    SearchFilter::Keyword(topic.to_owned())
}

#[tokio::test]
async fn search_sends_bearer_token_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("query", "rust"))
        .and(query_param("max_results", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(&keyword("rust"), 20, None, &Credential::new("test-key"))
        .await
        .expect("search should succeed")
        .items;

    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0].full_text,
        "english tweet number 000 talking about rust"
    );
}

#[tokio::test]
async fn search_sends_pagination_token_and_returns_next_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("pagination_token", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "1", "text": "english tweet on the second page of results" }],
            "meta": { "result_count": 1, "next_token": "tok-2" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search(&keyword("rust"), 10, Some("tok-1"), &Credential::new("k"))
        .await
        .expect("search should succeed");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.next_cursor.as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn page_without_next_token_has_no_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param_is_missing("pagination_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await
        .unwrap();
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn hashtag_filter_queries_with_hash_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "#rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(
            &SearchFilter::Hashtag("rust".to_owned()),
            20,
            None,
            &Credential::new("k"),
        )
        .await
        .unwrap()
        .items;
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn small_batches_request_api_minimum_and_truncate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("max_results", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(10)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(&keyword("rust"), 4, None, &Credential::new("k"))
        .await
        .unwrap()
        .items;
    assert_eq!(items.len(), 4);
}

#[tokio::test]
async fn long_form_posts_use_note_tweet_text() {
    let server = MockServer::start().await;
    let long_text = "a long-form post ".repeat(30);

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "1",
                "text": "a long-form post a long-form…",
                "note_tweet": { "text": long_text }
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await
        .unwrap()
        .items;
    assert_eq!(items[0].full_text, long_text);
}

#[tokio::test]
async fn response_without_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "result_count": 0 } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(&keyword("nothing"), 10, None, &Credential::new("k"))
        .await
        .unwrap()
        .items;
    assert!(items.is_empty());
}

#[tokio::test]
async fn errors_only_response_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "title": "Invalid Request", "detail": "query is too long" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await;
    assert!(
        matches!(result, Err(SearchError::Api(ref msg)) if msg.contains("query is too long")),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "17"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await;
    assert!(
        matches!(
            result,
            Err(SearchError::RateLimited {
                retry_after_secs: 17
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn rejected_credential_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search(&keyword("rust"), 10, None, &Credential::new("revoked"))
        .await;
    assert!(matches!(
        result,
        Err(SearchError::Unauthorized { status: 401 })
    ));
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await;
    assert!(matches!(
        result,
        Err(SearchError::UnexpectedStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .search(&keyword("rust"), 10, None, &Credential::new("k"))
        .await;
    assert!(matches!(result, Err(SearchError::Deserialize { .. })));
}

fn fast_config() -> AccumulatorConfig {
    AccumulatorConfig {
        batch_delay: Duration::ZERO,
        max_retries_per_batch: Some(3),
        ..AccumulatorConfig::default()
    }
}

#[tokio::test]
async fn accumulator_rotates_past_rejected_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer revoked"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(header("authorization", "Bearer valid"))
        .and(query_param("query", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(25)))
        .expect(1)
        .mount(&server)
        .await;

    let mut acc = Accumulator::new(
        test_client(&server.uri()),
        |_: &str| "eng".to_owned(),
        CredentialPool::new(["revoked", "valid"]).unwrap(),
        RoundRobinRotation::new(),
        fast_config(),
    );

    let document = acc.accumulate("rust", 20).await.expect("run should succeed");
    assert!(document.success);
    assert_eq!(document.tweets.len(), 20);
}

#[tokio::test]
async fn accumulator_reports_no_results_when_api_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": {} })))
        .expect(2)
        .mount(&server)
        .await;

    let mut acc = Accumulator::new(
        test_client(&server.uri()),
        |_: &str| "eng".to_owned(),
        CredentialPool::new(["k"]).unwrap(),
        RoundRobinRotation::new(),
        fast_config(),
    );

    let result = acc.accumulate("rust", 20).await;
    assert!(matches!(result, Err(FetchError::NoResults { .. })));
}

#[tokio::test]
async fn accumulator_follows_next_token_past_unqualified_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "rust"))
        .and(query_param_is_missing("pagination_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(foreign_page("tok-2")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query", "rust"))
        .and(query_param("pagination_token", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tweets_body(25)))
        .expect(1)
        .mount(&server)
        .await;

    let mut acc = Accumulator::new(
        test_client(&server.uri()),
        tagged_detector,
        CredentialPool::new(["k"]).unwrap(),
        RoundRobinRotation::new(),
        fast_config(),
    );

    let document = acc.accumulate("rust", 20).await.expect("run should succeed");
    assert_eq!(document.tweets.len(), 20);
    assert!(document.tweets.iter().all(|t| !t.text.contains("[fr]")));
}

#[tokio::test]
async fn accumulator_terminates_when_next_token_repeats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(foreign_page("stuck")))
        .expect(4)
        .mount(&server)
        .await;

    let mut acc = Accumulator::new(
        test_client(&server.uri()),
        tagged_detector,
        CredentialPool::new(["k"]).unwrap(),
        RoundRobinRotation::new(),
        fast_config(),
    );

    let result = tokio::time::timeout(Duration::from_secs(10), acc.accumulate("rust", 20))
        .await
        .expect("run must terminate");
    assert!(matches!(result, Err(FetchError::NoResults { .. })), "got: {result:?}");
}
