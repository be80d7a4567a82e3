//! Integration tests for `LineNotifyClient` using wiremock HTTP mocks.

use weatherline_core::{Error, LineNotifyClient, Notifier, NotifyApiError};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> LineNotifyClient {
    LineNotifyClient::with_base_url(base_url, "test-token")
}

#[tokio::test]
async fn send_posts_form_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notify"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("message=TEST+MESSAGE"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .send("TEST MESSAGE")
        .await
        .expect("200 is success whatever the body");
}

#[tokio::test]
async fn rejection_returns_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notify"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"status": 400, "message": "bad"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).send("hello").await.expect_err("400 must fail");

    match err {
        Error::Notify(NotifyApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreadable_error_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).send("hello").await.expect_err("500 must fail");
    assert!(matches!(err, Error::Decode { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let uri = closed_port_uri();

    let err = test_client(&uri).send("hello").await.expect_err("closed port must fail");
    assert!(matches!(err, Error::Transport(_)), "unexpected error: {err:?}");
}

/// A local URI nothing is listening on.
fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind an ephemeral port");
    let port = listener.local_addr().expect("bound address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
