use crate::params::ParameterBag;
use crate::response::VkResponse;
use crate::Result;
use std::fmt::Debug;

/// One remote endpoint, described as a request-configuration value.
///
/// `to_params` validates and serializes the fields; it runs before any
/// network activity, so a failure here never reaches the transport.
pub trait ApiRequest: Debug + Send + Sync {
    /// Typed result of a successful call
    type Output: Send;

    /// Remote method name, e.g. `wall.post`
    const METHOD: &'static str;

    /// Build the parameter bag for this call
    fn to_params(&self) -> Result<ParameterBag>;

    /// Map the `response` node to the typed result
    fn map_response(response: VkResponse) -> Result<Self::Output>;

    /// Send the call without `access_token`
    fn skip_authorization(&self) -> bool {
        false
    }
}

/// Construction from a response node where `null` means "absent"
pub trait FromResponse: Sized {
    fn from_response(response: &VkResponse) -> Result<Option<Self>>;
}
