use crate::config::ClientConfig;
use crate::error_handling::handle_http_response;
use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;
use url::Url;
use vkapi_core::error::{ErrorBuilder, NetworkError};
use vkapi_core::{ParameterBag, Result};

/// Performs one form-encoded POST and returns the raw response body.
///
/// Implementations must not retry; the dispatcher owns retry policy.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &Url, params: &ParameterBag) -> Result<String>;
}

/// Transport backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ErrorBuilder::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Reuse an existing client, e.g. one shared with the rest of an application
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &Url, params: &ParameterBag) -> Result<String> {
        trace!(url = %url, params = params.len(), "Sending request");

        let form: Vec<(&str, &str)> = params.iter().collect();
        let response = self
            .client
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NetworkError::Timeout.into()
                } else {
                    vkapi_core::Error::from(NetworkError::from(e))
                }
            })?;

        handle_http_response(response, url.path().trim_start_matches('/')).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_posts_form_encoded_params() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/wall.post")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("owner_id".into(), "-1".into()),
                Matcher::UrlEncoded("message".into(), "привет, мир".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"response":{"post_id":7}}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/wall.post", server.url())).unwrap();
        let params: ParameterBag = [("owner_id", "-1"), ("message", "привет, мир")]
            .into_iter()
            .collect();

        let body = transport.send(&url, &params).await.unwrap();
        assert!(body.contains("post_id"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_failure_maps_to_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/wall.post")
            .with_status(503)
            .create_async()
            .await;

        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/wall.post", server.url())).unwrap();

        let err = transport.send(&url, &ParameterBag::new()).await.unwrap_err();
        assert!(matches!(err, vkapi_core::Error::Network(_)));
        assert!(err.is_recoverable());
    }
}
