use std::time::Duration;

use groovify::{
    config::SpotifyConfig,
    error::GroovifyError,
    spotify::{AccessTokenCache, auth::EXPIRY_SKEW_SECS},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

// base64("test-id:test-secret")
const BASIC_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";

fn cache_for(server: &MockServer) -> AccessTokenCache {
    let config = SpotifyConfig::new("test-id", "test-secret")
        .with_token_url(format!("{}/api/token", server.uri()));
    AccessTokenCache::new(config)
}

fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": expires_in
    })
}

#[tokio::test]
async fn test_fetches_token_with_client_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let token = cache.access_token().await.unwrap();

    assert_eq!(token, "abc");
    let cached = cache.cached_token().unwrap();
    assert_eq!(cached.access_token, "abc");
    assert!(cached.expires_at > chrono::Utc::now() + chrono::Duration::seconds(3500));
}

#[tokio::test]
async fn test_fresh_token_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    assert_eq!(cache.access_token().await.unwrap(), "abc");
    assert_eq!(cache.access_token().await.unwrap(), "abc");
    assert_eq!(cache.clone().access_token().await.unwrap(), "abc");
}

#[tokio::test]
async fn test_token_inside_skew_window_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body("short", EXPIRY_SKEW_SECS - 5)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    cache.access_token().await.unwrap();
    cache.access_token().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("shared", 3600))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let (a, b) = tokio::join!(cache.access_token(), cache.access_token());

    assert_eq!(a.unwrap(), "shared");
    assert_eq!(b.unwrap(), "shared");
}

#[tokio::test]
async fn test_concurrent_tasks_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("shared", 3600))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.access_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "shared");
    }
}

#[tokio::test]
async fn test_concurrent_callers_all_observe_the_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("invalid_client")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let (a, b) = tokio::join!(cache.access_token(), cache.access_token());

    for result in [a, b] {
        match result {
            Err(GroovifyError::TokenRequest { status, body, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid_client");
            }
            other => panic!("expected token request error, got {:?}", other),
        }
    }
    assert!(cache.cached_token().is_none());
}

#[tokio::test]
async fn test_failed_refresh_can_be_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("second", 3600)))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let err = cache.access_token().await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(500));
    assert_eq!(
        err.to_string(),
        "Spotify token request failed (500 Internal Server Error)"
    );

    assert_eq!(cache.access_token().await.unwrap(), "second");
}

#[tokio::test]
async fn test_response_missing_fields_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let err = cache.access_token().await.unwrap_err();

    assert!(matches!(err, GroovifyError::UpstreamProtocol(_)));
    assert!(err.to_string().contains("missing expected fields"));
}

#[tokio::test]
async fn test_unrepresentable_expiry_is_protocol_error_and_not_sticky() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc", i64::MAX)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("second", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let err = cache.access_token().await.unwrap_err();
    assert!(matches!(err, GroovifyError::UpstreamProtocol(_)));
    assert!(err.to_string().contains("expires_in"));
    assert!(cache.cached_token().is_none());

    // The failed refresh must not stay pending; the next call asks again.
    assert_eq!(cache.access_token().await.unwrap(), "second");
}

#[tokio::test]
async fn test_fractional_expires_in_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "expires_in": 3600.0
        })))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    assert_eq!(cache.access_token().await.unwrap(), "abc");

    let cached = cache.cached_token().unwrap();
    assert!(cached.expires_at > chrono::Utc::now() + chrono::Duration::seconds(3500));
}

#[tokio::test]
async fn test_non_positive_expires_in_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc", 0)))
        .mount(&server)
        .await;

    let cache = cache_for(&server);
    let err = cache.access_token().await.unwrap_err();
    assert!(matches!(err, GroovifyError::UpstreamProtocol(_)));
}

#[tokio::test]
async fn test_missing_client_id_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("abc", 3600)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = SpotifyConfig::new("test-id", "test-secret")
        .with_token_url(format!("{}/api/token", server.uri()));
    config.client_id = None;
    let cache = AccessTokenCache::new(config);

    let err = cache.access_token().await.unwrap_err();
    assert!(
        matches!(err, GroovifyError::Configuration(ref m) if m.contains("SPOTIFY_CLIENT_ID"))
    );
}
