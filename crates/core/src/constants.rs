/// Base URL every method name is appended to
pub const DEFAULT_BASE_URL: &str = "https://api.vk.com/method";

/// API version sent as `v` with every call
pub const DEFAULT_API_VERSION: &str = "5.199";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry in milliseconds
pub const DEFAULT_BASE_DELAY_MS: u64 = 400;

/// Upper bound for any single retry delay in milliseconds
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

pub const DEFAULT_USER_AGENT: &str = concat!("vkapi-rs/", env!("CARGO_PKG_VERSION"));

/// Parameter names appended by the dispatcher
pub const ACCESS_TOKEN_PARAM: &str = "access_token";
pub const VERSION_PARAM: &str = "v";
pub const LANGUAGE_PARAM: &str = "lang";
pub const CAPTCHA_SID_PARAM: &str = "captcha_sid";
pub const CAPTCHA_KEY_PARAM: &str = "captcha_key";

/// Parameters never written to logs
pub const SECRET_PARAMS: &[&str] = &[ACCESS_TOKEN_PARAM, CAPTCHA_KEY_PARAM];
