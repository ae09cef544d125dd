//! Client-facing error body.
//!
//! Serializes as `{"code": 100002, "message": "Internal server error"}` with an
//! optional `reference` link. The message is always the registered one; the
//! internal details of a `CodedError` never reach this type.

use crate::{registry, CodedError, ErrorCode, Registry};
use serde::{Deserialize, Serialize};

/// Error body returned alongside the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrResponse {
    /// Registered code, or `0` when the code was unknown.
    pub code: u32,
    /// Registered default message.
    pub message: String,
    /// Optional documentation link for the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ErrResponse {
    /// Status and body for `code`, resolved through the process-wide registry.
    pub fn for_code(code: u32) -> (u16, Self) {
        Self::from_registry(registry::global(), code)
    }

    /// Status and body for `code`, resolved through `registry`.
    pub fn from_registry(registry: &Registry, code: u32) -> (u16, Self) {
        let coder = registry.resolve(code);
        (coder.http_status().value(), Self::from(coder))
    }

    /// Status and body for a `CodedError`.
    pub fn from_error(err: &CodedError) -> (u16, Self) {
        let coder = err.coder();
        (coder.http_status().value(), Self::from(coder))
    }

    /// Attach a documentation link.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

impl From<&ErrorCode> for ErrResponse {
    fn from(coder: &ErrorCode) -> Self {
        Self {
            code: coder.code(),
            message: coder.message().to_owned(),
            reference: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{definitions, RegistryBuilder};

    #[test]
    fn body_for_registered_code() {
        let (status, body) = ErrResponse::for_code(definitions::ERR_USER_ALREADY_EXIST.code());
        assert_eq!(status, 400);
        assert_eq!(body.code, 110_002);
        assert_eq!(body.message, "User already exist");
        assert_eq!(body.reference, None);
    }

    #[test]
    fn body_for_unknown_code() {
        let (status, body) = ErrResponse::for_code(999_999);
        assert_eq!(status, 500);
        assert_eq!(body.code, 0);
        assert_eq!(body.message, "An internal server error occurred");
    }

    #[test]
    fn body_from_custom_registry() {
        let mut builder = RegistryBuilder::new();
        builder.register(120_001, 404, "Policy not found");
        let registry = builder.build();

        let (status, body) = ErrResponse::from_registry(&registry, 120_001);
        assert_eq!(status, 404);
        assert_eq!(body.message, "Policy not found");
    }

    #[test]
    fn body_from_error_hides_details() {
        let err = CodedError::from_code(&definitions::ERR_SIGNATURE_INVALID, "hmac mismatch for kid=7");
        let (status, body) = ErrResponse::from_error(&err);
        assert_eq!(status, 401);
        assert_eq!(body.message, "Signature is invalid");
        assert!(!body.message.contains("kid"));
    }

    #[test]
    fn json_shape() {
        let (_, body) = ErrResponse::for_code(definitions::ERR_UNKNOWN.code());
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"code":100002,"message":"Internal server error"}"#);

        let with_ref = body.with_reference("https://example.com/errors#100002");
        let value = serde_json::to_value(&with_ref).unwrap();
        assert_eq!(value["reference"], "https://example.com/errors#100002");

        let parsed: ErrResponse =
            serde_json::from_str(r#"{"code":110001,"message":"User not found"}"#).unwrap();
        assert_eq!(parsed.code, 110_001);
        assert_eq!(parsed.reference, None);
    }
}
