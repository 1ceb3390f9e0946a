//! Integration tests library for the VK API client
//!
//! This crate contains the scripted transport and fixtures shared by the
//! end-to-end tests under `tests/`.

pub mod common;

// Re-export commonly used types for tests
pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use std::time::Duration;
pub use vkapi_client::{CancellationToken, ClientConfig, VkApi};
pub use vkapi_core::{Error, ErrorKind, ParameterBag};
