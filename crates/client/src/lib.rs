pub mod blocking;
pub mod captcha;
pub mod categories;
pub mod client;
pub mod config;
pub mod dispatcher;
mod error_handling;
pub mod retry;
pub mod token;
pub mod transport;

pub use blocking::BlockingVkApi;
pub use captcha::{CaptchaChallenge, CaptchaSolver};
pub use client::{VkApi, VkApiBuilder};
pub use config::{ClientConfig, RetrySettings};
pub use dispatcher::Dispatcher;
pub use retry::{RetryConfig, RetryDecision, RetryPolicy};
pub use token::{SharedToken, StaticToken, TokenProvider};
pub use tokio_util::sync::CancellationToken;
pub use transport::{HttpTransport, Transport};
