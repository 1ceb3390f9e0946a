//! Request dispatch: one method call from parameter bag to response node.

use crate::captcha::CaptchaSolver;
use crate::config::ClientConfig;
use crate::error_handling::{build_method_url, redact_params};
use crate::retry::{RetryDecision, RetryPolicy};
use crate::token::TokenProvider;
use crate::transport::Transport;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;
use vkapi_core::constants::{
    ACCESS_TOKEN_PARAM, CAPTCHA_KEY_PARAM, CAPTCHA_SID_PARAM, LANGUAGE_PARAM, VERSION_PARAM,
};
use vkapi_core::{parse_envelope, Error, MethodName, ParameterBag, Result, VkResponse};

pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    token: Option<Arc<dyn TokenProvider>>,
    captcha: Option<Arc<dyn CaptchaSolver>>,
    retry: RetryPolicy,
    base_url: String,
    api_version: String,
    language: Option<String>,
}

impl Dispatcher {
    pub(crate) fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        token: Option<Arc<dyn TokenProvider>>,
        captcha: Option<Arc<dyn CaptchaSolver>>,
    ) -> Self {
        Self {
            transport,
            token,
            captcha,
            retry: RetryPolicy::new(config.retry_config()),
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            language: config.language.clone(),
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send `method` and return its `response` node.
    ///
    /// Rate-limit errors, captcha errors (with a solver) and recoverable
    /// network errors are retried up to the configured maximum; the last
    /// error is returned once retries run out. Cancellation is checked before
    /// every attempt and raced against the request, the solver and the wait.
    pub async fn dispatch(
        &self,
        method: &MethodName,
        mut params: ParameterBag,
        skip_authorization: bool,
        cancel: &CancellationToken,
    ) -> Result<VkResponse> {
        let url = build_method_url(&self.base_url, method)?;
        let mut retries = 0u32;

        loop {
            if cancel.is_cancelled() {
                debug!(method = %method, "Call cancelled before sending");
                return Err(Error::Cancelled);
            }

            let wire = self.wire_params(&params, skip_authorization);
            debug!(
                method = %method,
                attempt = retries + 1,
                params = %redact_params(&wire),
                "Dispatching call"
            );

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(method = %method, "Call cancelled in flight");
                    return Err(Error::Cancelled);
                }
                outcome = self.attempt(&url, &wire) => outcome,
            };

            let error = match outcome {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            if retries >= self.retry.max_retries() {
                warn!(
                    method = %method,
                    retries,
                    error = %error,
                    "Giving up after retries"
                );
                return Err(error);
            }

            match self.retry.decide(&error, self.captcha.is_some()) {
                RetryDecision::Fail => return Err(error),
                RetryDecision::SolveCaptcha(challenge) => {
                    let Some(solver) = &self.captcha else {
                        return Err(error);
                    };
                    debug!(method = %method, sid = %challenge.sid, "Solving captcha");
                    let key = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(Error::Cancelled),
                        key = solver.solve(&challenge) => key?,
                    };
                    params.insert(CAPTCHA_SID_PARAM, challenge.sid);
                    params.insert(CAPTCHA_KEY_PARAM, key);
                }
                RetryDecision::Retry => {
                    let delay = self.retry.calculate_delay(retries);
                    warn!(
                        method = %method,
                        attempt = retries + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transient failure, retrying"
                    );
                    self.retry.wait(delay, cancel).await?;
                }
            }

            retries += 1;
        }
    }

    async fn attempt(&self, url: &Url, params: &ParameterBag) -> Result<VkResponse> {
        let body = self.transport.send(url, params).await?;
        parse_envelope(&body)?.into_result()
    }

    /// Caller parameters plus token, version and language
    fn wire_params(&self, params: &ParameterBag, skip_authorization: bool) -> ParameterBag {
        let mut wire = params.clone();
        if !skip_authorization {
            if let Some(token) = self.token.as_ref().and_then(|t| t.access_token()) {
                wire.insert(ACCESS_TOKEN_PARAM, token);
            }
        }
        wire.insert(VERSION_PARAM, self.api_version.as_str());
        if let Some(language) = &self.language {
            wire.insert(LANGUAGE_PARAM, language.as_str());
        }
        wire
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("language", &self.language)
            .field("has_token", &self.token.is_some())
            .field("has_captcha_solver", &self.captcha.is_some())
            .field("retry", self.retry.config())
            .finish()
    }
}
