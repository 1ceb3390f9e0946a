//! End-to-end calls through the reqwest transport against a mock server.

use integration_tests::*;
use mockito::{Matcher, Server};
use vkapi_client::{BlockingVkApi, HttpTransport};
use vkapi_core::models::secure::GetAppBalanceRequest;

fn client_for(server_url: &str, max_retries: u32) -> VkApi {
    let mut config = ClientConfig::default();
    config.base_url = server_url.to_string();
    config.language = Some("en".into());
    config.retry.max_retries = max_retries;
    config.retry.base_delay_ms = 1;
    config.retry.max_delay_ms = 5;

    VkApi::builder()
        .config(config)
        .access_token("service-token")
        .build()
        .expect("Failed to create VkApi")
}

#[tokio::test]
async fn test_wall_post_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/wall.post")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("owner_id".into(), "-1".into()),
            Matcher::UrlEncoded("message".into(), "Hello from tests".into()),
            Matcher::UrlEncoded("access_token".into(), "service-token".into()),
            Matcher::UrlEncoded("v".into(), "5.199".into()),
            Matcher::UrlEncoded("lang".into(), "en".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response":{"post_id":321}}"#)
        .create_async()
        .await;

    let api = client_for(&server.url(), 0);
    let post_id = api.wall().post_message(-1, "Hello from tests").await.unwrap();

    assert_eq!(post_id, 321);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_envelope_over_http() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/secure.getAppBalance")
        .with_status(200)
        .with_body(
            r#"{"error":{"error_code":5,"error_msg":"User authorization failed: invalid access_token","request_params":[{"key":"method","value":"secure.getAppBalance"}]}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let api = client_for(&server.url(), 3);
    let err = api.secure().app_balance().await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::UserAuthorizationFailed));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_are_retried_then_surfaced() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/secure.getAppBalance")
        .with_status(500)
        .with_body("internal error")
        .expect(3)
        .create_async()
        .await;

    let api = client_for(&server.url(), 2);
    let err = api.secure().app_balance().await.unwrap_err();

    match &err {
        Error::Network(network) => assert_eq!(network.status(), Some(500)),
        other => panic!("Expected network error, got: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/secure.getAppBalance")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .expect(1)
        .create_async()
        .await;

    let api = client_for(&server.url(), 3);
    let err = api.secure().app_balance().await.unwrap_err();

    assert!(matches!(err, Error::Response(_)));
}

#[tokio::test]
async fn test_with_shared_reqwest_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/secure.getAppBalance")
        .with_status(200)
        .with_body(r#"{"response":12}"#)
        .create_async()
        .await;

    let mut config = ClientConfig::default();
    config.base_url = server.url();
    let api = VkApi::builder()
        .config(config)
        .transport(HttpTransport::with_client(reqwest::Client::new()))
        .build()
        .unwrap();

    assert_eq!(api.secure().app_balance().await.unwrap(), 12);
    mock.assert_async().await;
}

#[test]
fn test_blocking_wrapper_over_http() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/secure.getAppBalance")
        .with_status(200)
        .with_body(r#"{"response":77}"#)
        .create();

    let api = client_for(&server.url(), 0);
    let blocking = BlockingVkApi::new(api).unwrap();

    assert_eq!(blocking.invoke(&GetAppBalanceRequest).unwrap(), 77);
    mock.assert();
}
