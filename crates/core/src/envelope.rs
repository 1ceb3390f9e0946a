use crate::error::{classify, ErrorBuilder, RawVkError, Result, VkError};
use crate::response::VkResponse;
use serde_json::Value;
use tracing::trace;

/// Top-level body of an API reply
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(VkResponse),
    Failure(VkError),
}

impl Envelope {
    /// Success payload, or the failure classified by its code
    pub fn into_result(self) -> Result<VkResponse> {
        match self {
            Envelope::Success(response) => Ok(response),
            Envelope::Failure(error) => Err(classify(error).into()),
        }
    }
}

/// Split a raw body into success payload or error object.
///
/// An `error` node wins over a `response` node when both are present.
pub fn parse_envelope(body: &str) -> Result<Envelope> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ErrorBuilder::response().malformed(format!("invalid JSON: {e}")))?;

    let Value::Object(mut root) = root else {
        return Err(ErrorBuilder::response().malformed("top-level value is not an object"));
    };

    if let Some(error) = root.remove("error") {
        let raw: RawVkError = serde_json::from_value(error)
            .map_err(|e| ErrorBuilder::response().malformed(format!("invalid error node: {e}")))?;
        let error = VkError::from(raw);
        trace!(code = error.code, message = %error.message, "Parsed error envelope");
        return Ok(Envelope::Failure(error));
    }

    match root.remove("response") {
        Some(response) => Ok(Envelope::Success(VkResponse::new(response))),
        None => Err(ErrorBuilder::response().missing_envelope()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind, ResponseError};
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = parse_envelope(r#"{"response": [1, 2, 3]}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(VkResponse::new(json!([1, 2, 3]))));
    }

    #[test]
    fn test_primitive_success_envelope() {
        let response = parse_envelope(r#"{"response": 1}"#).unwrap().into_result().unwrap();
        assert!(response.as_bool().unwrap());
    }

    #[test]
    fn test_error_envelope() {
        let body = json!({
            "error": {
                "error_code": 600,
                "error_msg": "Permission denied. You have no access to operations specified with given object(s)",
                "request_params": [{"key": "method", "value": "ads.getCampaigns"}]
            }
        })
        .to_string();

        let Envelope::Failure(error) = parse_envelope(&body).unwrap() else {
            panic!("expected failure envelope");
        };
        assert_eq!(error.code, 600);
        assert_eq!(error.request_params.get("method"), Some("ads.getCampaigns"));

        let err = Envelope::Failure(error).into_result().unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::AdsAccessDenied));
    }

    #[test]
    fn test_unknown_code_envelope() {
        let err = parse_envelope(r#"{"error": {"error_code": 9999, "error_msg": "new"}}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Generic(9999)));
    }

    #[test]
    fn test_error_wins_over_response() {
        let envelope =
            parse_envelope(r#"{"response": 1, "error": {"error_code": 15, "error_msg": "no"}}"#)
                .unwrap();
        assert!(matches!(envelope, Envelope::Failure(VkError { code: 15, .. })));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_envelope("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Response(ResponseError::Malformed { .. })));

        let err = parse_envelope("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::Response(ResponseError::Malformed { .. })));

        let err = parse_envelope(r#"{"error": {"error_msg": "no code"}}"#).unwrap_err();
        assert!(matches!(err, Error::Response(ResponseError::Malformed { .. })));
    }

    #[test]
    fn test_missing_both_nodes() {
        let err = parse_envelope(r#"{"result": 1}"#).unwrap_err();
        assert!(matches!(err, Error::Response(ResponseError::MissingEnvelope)));
    }
}
