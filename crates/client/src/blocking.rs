use crate::client::VkApi;
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;
use vkapi_core::error::ErrorBuilder;
use vkapi_core::{ApiRequest, MethodName, ParameterBag, Result, VkResponse};

/// Synchronous wrapper that drives [`VkApi`] on its own runtime.
///
/// Must not be used from inside an async context; blocking a runtime
/// worker on another runtime panics.
#[derive(Debug)]
pub struct BlockingVkApi {
    api: VkApi,
    runtime: Runtime,
}

impl BlockingVkApi {
    pub fn new(api: VkApi) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ErrorBuilder::internal(format!("Failed to start runtime: {e}")))?;
        Ok(Self { api, runtime })
    }

    pub fn invoke<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        self.invoke_with_cancellation(request, &CancellationToken::new())
    }

    /// Like [`invoke`](Self::invoke), aborting when `cancel` fires on another thread
    pub fn invoke_with_cancellation<R: ApiRequest>(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Output> {
        self.runtime.block_on(self.api.invoke(request, cancel))
    }

    pub fn call(
        &self,
        method: &MethodName,
        params: ParameterBag,
        skip_authorization: bool,
    ) -> Result<VkResponse> {
        self.runtime.block_on(self.api.call(
            method,
            params,
            skip_authorization,
            &CancellationToken::new(),
        ))
    }

    /// The wrapped async client
    pub fn inner(&self) -> &VkApi {
        &self.api
    }
}
