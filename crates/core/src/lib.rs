pub mod constants;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod field_rules;
pub mod models;
pub mod params;
pub mod response;
pub mod traits;
pub mod types;

pub use envelope::{parse_envelope, Envelope};
pub use error::{
    classify, ApiError, ArgumentError, Error, ErrorCategory, ErrorContext, ErrorKind,
    NetworkError, ResponseError, Result, VkError,
};
pub use params::{ParameterBag, ToParam};
pub use response::VkResponse;
pub use traits::{ApiRequest, FromResponse};
pub use types::{MethodName, PostRef};
