//! Retry policy for transient failures.
//!
//! Three failure classes are retried: the rate-limit API error, the
//! captcha-required API error when a solver is configured, and recoverable
//! network errors. Everything else propagates on the first occurrence.
//! Delays grow exponentially and every wait honors the caller's cancellation
//! token.

use crate::captcha::CaptchaChallenge;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vkapi_core::constants::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_DELAY_MS, DEFAULT_MAX_RETRIES};
use vkapi_core::{Error, Result};

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; total attempts are `max_retries + 1`
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// What the dispatcher should do with a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    /// Retry after obtaining a captcha key for this challenge
    SolveCaptcha(CaptchaChallenge),
    Fail,
}

#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Classify a failed attempt
    pub fn decide(&self, error: &Error, captcha_configured: bool) -> RetryDecision {
        match error {
            Error::Api(api) if api.is_rate_limit() => RetryDecision::Retry,
            Error::Api(api) if api.is_captcha() && captcha_configured => {
                match CaptchaChallenge::from_error(&api.error) {
                    Some(challenge) => RetryDecision::SolveCaptcha(challenge),
                    None => RetryDecision::Fail,
                }
            }
            other if other.is_recoverable() => RetryDecision::Retry,
            _ => RetryDecision::Fail,
        }
    }

    /// Delay before retry number `retry` (zero-based) using exponential backoff
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        let delay_ms = (self.config.base_delay.as_millis() as f64
            * self.config.backoff_multiplier.powi(retry as i32)) as u64;

        let mut delay = Duration::from_millis(delay_ms);

        if delay > self.config.max_delay {
            delay = self.config.max_delay;
        }

        if self.config.jitter {
            let jitter_range = delay.as_millis() as f64 * 0.1; // ±10% jitter
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            let jittered_ms = (delay.as_millis() as f64 + jitter).max(0.0) as u64;
            delay = Duration::from_millis(jittered_ms);
        }

        delay
    }

    /// Sleep for `delay`, returning `Error::Cancelled` as soon as the token fires
    pub async fn wait(&self, delay: Duration, cancel: &CancellationToken) -> Result<()> {
        debug!(delay_ms = delay.as_millis() as u64, "Waiting before retry");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkapi_core::error::{NetworkError, ResponseError};
    use vkapi_core::{classify, ArgumentError, VkError};

    fn policy(jitter: bool) -> RetryPolicy {
        RetryPolicy::new(RetryConfig {
            base_delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(5),
            jitter,
            ..Default::default()
        })
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay, Duration::from_millis(400));
        assert_eq!(config.max_delay, Duration::from_secs(10));
        assert_eq!(config.backoff_multiplier, 2.0);
        assert!(config.jitter);
    }

    #[test]
    fn test_calculate_delay() {
        let policy = policy(false);
        assert_eq!(policy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(400));
        assert_eq!(policy.calculate_delay(10), Duration::from_secs(5));
    }

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let policy = policy(true);
        for _ in 0..50 {
            let delay = policy.calculate_delay(1).as_millis();
            assert!((180..=220).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_decisions() {
        let policy = RetryPolicy::default();

        let rate_limit: Error = classify(VkError::new(6, "Too many requests per second")).into();
        assert_eq!(policy.decide(&rate_limit, false), RetryDecision::Retry);

        let server: Error = NetworkError::http_request("Bad gateway", Some(502)).into();
        assert_eq!(policy.decide(&server, false), RetryDecision::Retry);

        let not_found: Error = NetworkError::http_request("Not found", Some(404)).into();
        assert_eq!(policy.decide(&not_found, false), RetryDecision::Fail);

        let denied: Error = classify(VkError::new(15, "Access denied")).into();
        assert_eq!(policy.decide(&denied, true), RetryDecision::Fail);

        let malformed: Error = ResponseError::malformed("not json").into();
        assert_eq!(policy.decide(&malformed, true), RetryDecision::Fail);

        let argument: Error = ArgumentError::missing_required("owner_id").into();
        assert_eq!(policy.decide(&argument, true), RetryDecision::Fail);
    }

    #[test]
    fn test_captcha_decision_depends_on_solver() {
        let policy = RetryPolicy::default();
        let mut error = VkError::new(14, "Captcha needed");
        error.captcha_sid = Some("548747100691".into());
        error.captcha_img = Some("https://api.vk.com/captcha.php?sid=548747100691".into());
        let captcha: Error = classify(error).into();

        assert_eq!(policy.decide(&captcha, false), RetryDecision::Fail);
        match policy.decide(&captcha, true) {
            RetryDecision::SolveCaptcha(challenge) => assert_eq!(challenge.sid, "548747100691"),
            other => panic!("Expected captcha decision, got {other:?}"),
        }

        let without_sid: Error = classify(VkError::new(14, "Captcha needed")).into();
        assert_eq!(policy.decide(&without_sid, true), RetryDecision::Fail);
    }

    #[tokio::test]
    async fn test_wait_completes() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        assert!(policy.wait(Duration::from_millis(1), &cancel).await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_is_cancelled_promptly() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let result = policy.wait(Duration::from_secs(60), &cancel).await;
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
