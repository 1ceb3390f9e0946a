use reqwest::Response;
use tracing::warn;
use url::Url;
use vkapi_core::constants::SECRET_PARAMS;
use vkapi_core::error::ErrorBuilder;
use vkapi_core::{ErrorContext, MethodName, ParameterBag, Result};

/// Standard HTTP response handling; returns the body of a 2xx response
pub(crate) async fn handle_http_response(response: Response, context: &str) -> Result<String> {
    let status = response.status();
    let url = response.url().clone();

    if status.is_success() {
        response
            .text()
            .await
            .map_err(|e| ErrorBuilder::network().connection(format!("{context}: {e}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        warn!(
            url = %redact_url(&url),
            status = %status,
            context = %context,
            "HTTP request failed"
        );

        Err(ErrorBuilder::network().http_request(
            format!("{context}: HTTP {status}: {body}"),
            Some(status.as_u16()),
        ))
    }
}

/// `{base}/{category.method}`
pub(crate) fn build_method_url(base_url: &str, method: &MethodName) -> Result<Url> {
    Url::parse(&format!("{}/{method}", base_url.trim_end_matches('/')))
        .context("Failed to construct method URL")
}

/// Parameters as `key=value` pairs with secrets masked, for logging
pub(crate) fn redact_params(params: &ParameterBag) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if SECRET_PARAMS.contains(&key) {
                format!("{key}=***")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn redact_url(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use reqwest::Client;

    #[tokio::test]
    async fn test_handle_http_response_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/users.get")
            .with_status(200)
            .with_body(r#"{"response":[]}"#)
            .create_async()
            .await;

        let client = Client::new();
        let response = client
            .post(format!("{}/users.get", server.url()))
            .send()
            .await
            .unwrap();

        let body = handle_http_response(response, "users.get").await.unwrap();
        assert_eq!(body, r#"{"response":[]}"#);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_handle_http_response_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/users.get")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = Client::new();
        let response = client
            .post(format!("{}/users.get", server.url()))
            .send()
            .await
            .unwrap();

        let err = handle_http_response(response, "users.get").await.unwrap_err();
        match &err {
            vkapi_core::Error::Network(network) => assert_eq!(network.status(), Some(502)),
            other => panic!("Expected network error, got: {other:?}"),
        }
        assert!(err.is_recoverable());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_handle_http_response_client_error_is_not_recoverable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/users.get")
            .with_status(404)
            .create_async()
            .await;

        let response = Client::new()
            .post(format!("{}/users.get", server.url()))
            .send()
            .await
            .unwrap();

        let err = handle_http_response(response, "users.get").await.unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_build_method_url() {
        let method: MethodName = "wall.post".parse().unwrap();
        let url = build_method_url("https://api.vk.com/method/", &method).unwrap();
        assert_eq!(url.as_str(), "https://api.vk.com/method/wall.post");

        let url = build_method_url("http://127.0.0.1:1234", &method).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/wall.post");

        let execute: MethodName = "execute".parse().unwrap();
        let url = build_method_url("https://api.vk.com/method/", &execute).unwrap();
        assert_eq!(url.as_str(), "https://api.vk.com/method/execute");
    }

    #[test]
    fn test_redact_params() {
        let params: ParameterBag = [
            ("owner_id", "1"),
            ("access_token", "secret"),
            ("captcha_key", "answer"),
        ]
        .into_iter()
        .collect();

        let rendered = redact_params(&params);
        assert_eq!(rendered, "owner_id=1&access_token=***&captcha_key=***");
        assert!(!rendered.contains("secret"));
    }
}
