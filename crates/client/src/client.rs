use crate::captcha::CaptchaSolver;
use crate::categories::{Ads, Messages, Orders, Secure, Wall};
use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::token::{StaticToken, TokenProvider};
use crate::transport::{HttpTransport, Transport};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vkapi_core::{ApiRequest, MethodName, ParameterBag, Result, VkResponse};

/// Async VK API client.
///
/// Cheap to clone; clones share the transport, token provider and captcha
/// solver. Each call is independent, so one client can serve many concurrent
/// tasks.
#[derive(Clone)]
pub struct VkApi {
    dispatcher: Arc<Dispatcher>,
}

impl VkApi {
    /// Client with the given configuration, the default HTTP transport and no token
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> VkApiBuilder {
        VkApiBuilder::default()
    }

    /// Validate and send one typed request
    pub async fn invoke<R: ApiRequest>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Output> {
        let params = request.to_params()?;
        let method = MethodName::new(R::METHOD)?;
        let response = self
            .dispatcher
            .dispatch(&method, params, request.skip_authorization(), cancel)
            .await?;
        R::map_response(response)
    }

    /// Send an arbitrary method with a prepared parameter bag
    pub async fn call(
        &self,
        method: &MethodName,
        params: ParameterBag,
        skip_authorization: bool,
        cancel: &CancellationToken,
    ) -> Result<VkResponse> {
        self.dispatcher
            .dispatch(method, params, skip_authorization, cancel)
            .await
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn ads(&self) -> Ads<'_> {
        Ads::new(self)
    }

    pub fn messages(&self) -> Messages<'_> {
        Messages::new(self)
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    pub fn secure(&self) -> Secure<'_> {
        Secure::new(self)
    }

    pub fn wall(&self) -> Wall<'_> {
        Wall::new(self)
    }
}

impl fmt::Debug for VkApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VkApi")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Builder for [`VkApi`]
#[derive(Default)]
pub struct VkApiBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    token: Option<Arc<dyn TokenProvider>>,
    captcha: Option<Arc<dyn CaptchaSolver>>,
}

impl VkApiBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default reqwest transport
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Arc::new(StaticToken::new(token)));
        self
    }

    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token = Some(provider);
        self
    }

    pub fn captcha_solver<S: CaptchaSolver + 'static>(mut self, solver: S) -> Self {
        self.captcha = Some(Arc::new(solver));
        self
    }

    pub fn build(self) -> Result<VkApi> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };

        debug!(
            base_url = %config.base_url,
            api_version = %config.api_version,
            max_retries = config.retry.max_retries,
            "Building VK API client"
        );

        let dispatcher = Dispatcher::new(&config, transport, self.token, self.captcha);
        Ok(VkApi {
            dispatcher: Arc::new(dispatcher),
        })
    }
}
