//! Error code identity - numeric code, HTTP status and default message.
//!
//! Every API error is identified by a six digit code of the form `SSMMNN`:
//!
//! - `SS`: service (`10` = shared/generic, `11` = identity service)
//! - `MM`: module inside the service (common, database, auth, ...)
//! - `NN`: sequence number inside the module
//!
//! # Namespace Structure
//!
//! - **COMMON** (100001-100099): success, unknown, bind, validation, token
//! - **DATABASE** (100101-100199): generic database failures
//! - **AUTH** (100201-100299): authentication and crypto failures
//! - **ENCODING** (100301-100399): JSON / YAML encoding and decoding
//! - **IAM_USER** (110001-110099): identity-service user errors
//! - **IAM_SECRET** (110101-110199): identity-service secret-key errors
//!
//! Codes are part of a versioned public contract with API clients. The ranges
//! above must not move.
//!
//! # Governance
//!
//! Namespaces are frozen: `ErrorNamespace` has a private field and only the
//! const instances in [`namespaces`] exist. `ErrorCode::const_new` asserts at
//! compile time that a code sits inside the namespace it is declared under and
//! that its HTTP status is one the API layer knows how to emit.
//!
//! # Example
//!
//! ```rust
//! use iam_codes::{define_error_codes, namespaces, ErrorCode};
//!
//! define_error_codes! {
//!     &namespaces::IAM_USER => {
//!         ERR_USER_LOCKED = (110010, 403, "User is locked"),
//!     }
//! }
//!
//! fn describe(code: &ErrorCode) -> String {
//!     format!("{} -> {} {}", code, code.http_status(), code.message())
//! }
//!
//! assert_eq!(describe(&ERR_USER_LOCKED), "110010 -> 403 User is locked");
//! ```

use crate::definitions::ranges;
use crate::registry::RegistrationError;
use std::fmt;

// ============================================================================
// HTTP Status (Validated Newtype)
// ============================================================================

/// HTTP status an error code maps to when surfaced over an API boundary.
///
/// Only the statuses the API layer actually emits are representable:
/// `200, 400, 401, 403, 404, 500`. Anything else is a configuration error.
///
/// # Example
///
/// ```rust
/// # use iam_codes::HttpStatus;
/// const NOT_FOUND: HttpStatus = HttpStatus::new(404);
/// assert_eq!(NOT_FOUND.reason(), "Not Found");
///
/// assert!(HttpStatus::checked_new(418).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HttpStatus(u16);

impl HttpStatus {
    /// 200 OK.
    pub const OK: Self = Self(200);
    /// 400 Bad Request.
    pub const BAD_REQUEST: Self = Self(400);
    /// 401 Unauthorized.
    pub const UNAUTHORIZED: Self = Self(401);
    /// 403 Forbidden.
    pub const FORBIDDEN: Self = Self(403);
    /// 404 Not Found.
    pub const NOT_FOUND: Self = Self(404);
    /// 500 Internal Server Error.
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Every status a code may be registered with.
    pub const PERMITTED: [u16; 6] = [200, 400, 401, 403, 404, 500];

    /// Whether `status` is in [`HttpStatus::PERMITTED`].
    #[inline]
    pub const fn is_permitted(status: u16) -> bool {
        matches!(status, 200 | 400 | 401 | 403 | 404 | 500)
    }

    /// Create a status with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics (a compile error in const contexts) if the status is not permitted.
    #[inline]
    pub const fn new(status: u16) -> Self {
        assert!(
            Self::is_permitted(status),
            "HTTP status must be one of 200, 400, 401, 403, 404, 500"
        );
        Self(status)
    }

    /// Create a status with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the status is not permitted.
    #[inline]
    pub fn checked_new(status: u16) -> Result<Self, HttpStatusError> {
        if Self::is_permitted(status) {
            Ok(Self(status))
        } else {
            Err(HttpStatusError::NotPermitted { value: status })
        }
    }

    /// Raw numeric status.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// `true` for 2xx.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Canonical reason phrase.
    pub const fn reason(self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

/// Error type for HTTP status validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpStatusError {
    /// Status is not one the API layer emits.
    NotPermitted { value: u16 },
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPermitted { value } => {
                write!(
                    f,
                    "HTTP status {} not permitted (expected one of 200, 400, 401, 403, 404, 500)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for HttpStatusError {}

// ============================================================================
// Error Namespace (Frozen Identity)
// ============================================================================

/// A named, inclusive range of the numeric code space.
///
/// Cannot be constructed outside this crate; the instances in [`namespaces`]
/// are the complete taxonomy.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ErrorNamespace {
    name: &'static str,
    start: u32,
    end: u32,
    _private: (),
}

impl ErrorNamespace {
    #[doc(hidden)]
    pub const fn __internal_new(name: &'static str, start: u32, end: u32) -> Self {
        assert!(start <= end, "Namespace range must not be empty");
        Self {
            name,
            start,
            end,
            _private: (),
        }
    }

    /// Namespace name, e.g. `"AUTH"`.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.name
    }

    /// First code in the range.
    #[inline]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Last code in the range (inclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Whether `code` falls inside this namespace.
    #[inline]
    pub const fn contains(&self, code: u32) -> bool {
        code >= self.start && code <= self.end
    }
}

impl fmt::Display for ErrorNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.start, self.end)
    }
}

/// Canonical namespace instances.
pub mod namespaces {
    use super::{ranges, ErrorNamespace};

    /// Generic errors: success, unknown, bind, validation, token-invalid.
    pub const COMMON: ErrorNamespace =
        ErrorNamespace::__internal_new("COMMON", ranges::COMMON_START, ranges::COMMON_END);

    /// Generic database errors.
    pub const DATABASE: ErrorNamespace =
        ErrorNamespace::__internal_new("DATABASE", ranges::DATABASE_START, ranges::DATABASE_END);

    /// Generic authentication and crypto errors.
    pub const AUTH: ErrorNamespace =
        ErrorNamespace::__internal_new("AUTH", ranges::AUTH_START, ranges::AUTH_END);

    /// Generic encoding/decoding errors (JSON, YAML).
    pub const ENCODING: ErrorNamespace =
        ErrorNamespace::__internal_new("ENCODING", ranges::ENCODING_START, ranges::ENCODING_END);

    /// Identity service: user errors.
    pub const IAM_USER: ErrorNamespace =
        ErrorNamespace::__internal_new("IAM_USER", ranges::IAM_USER_START, ranges::IAM_USER_END);

    /// Identity service: secret-key errors.
    pub const IAM_SECRET: ErrorNamespace = ErrorNamespace::__internal_new(
        "IAM_SECRET",
        ranges::IAM_SECRET_START,
        ranges::IAM_SECRET_END,
    );

    /// Every namespace, ordered by range.
    pub const ALL: [&ErrorNamespace; 6] =
        [&COMMON, &DATABASE, &AUTH, &ENCODING, &IAM_USER, &IAM_SECRET];

    /// Namespace whose range contains `code`.
    pub fn find(code: u32) -> Option<&'static ErrorNamespace> {
        ALL.into_iter().find(|ns| ns.contains(code))
    }
}

// ============================================================================
// Error Code (Primary Identity Type)
// ============================================================================

/// Code reserved for the unknown-code sentinel. Never registrable.
pub const RESERVED_CODE: u32 = 0;

/// Sentinel returned when a code has no registered entry.
///
/// Maps to 500 with a generic message, so an unmapped error surfaces as an
/// unexpected server failure rather than a crash.
pub const UNKNOWN: ErrorCode = ErrorCode {
    code: RESERVED_CODE,
    http_status: HttpStatus::INTERNAL_SERVER_ERROR,
    message: "An internal server error occurred",
};

/// A registered API error: numeric code, HTTP status and default message.
///
/// # Construction APIs
///
/// - `const_new`: for const catalog definitions (panics = compile error)
/// - `checked_new`: for runtime registration (returns `Result`, never panics)
///
/// Not `Copy`: catalog codes are consts used by reference. The registry keeps
/// its own clone of each entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    code: u32,
    http_status: HttpStatus,
    message: &'static str,
}

impl ErrorCode {
    /// Create an error code with compile-time validation.
    ///
    /// # Panics
    ///
    /// Panics if the code lies outside `namespace`. In const contexts this is
    /// a compile error.
    #[inline]
    pub const fn const_new(
        namespace: &'static ErrorNamespace,
        code: u32,
        http_status: HttpStatus,
        message: &'static str,
    ) -> Self {
        assert!(
            namespace.contains(code),
            "Error code outside of its namespace range"
        );
        Self {
            code,
            http_status,
            message,
        }
    }

    /// Create an error code with runtime validation.
    ///
    /// Not tied to a namespace: services may register codes outside the
    /// shared ranges.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::ReservedCode`] for code `0`
    /// - [`RegistrationError::StatusNotPermitted`] for an unknown status
    pub fn checked_new(
        code: u32,
        http_status: u16,
        message: &'static str,
    ) -> Result<Self, RegistrationError> {
        if code == RESERVED_CODE {
            return Err(RegistrationError::ReservedCode);
        }

        let http_status = HttpStatus::checked_new(http_status).map_err(|_| {
            RegistrationError::StatusNotPermitted {
                code,
                status: http_status,
            }
        })?;

        Ok(Self {
            code,
            http_status,
            message,
        })
    }

    /// Numeric code.
    #[inline]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// HTTP status this code maps to.
    #[inline]
    pub const fn http_status(&self) -> HttpStatus {
        self.http_status
    }

    /// Default human-readable message. Empty only for success.
    #[inline]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// `SS` part of `SSMMNN`.
    #[inline]
    pub const fn service(&self) -> u32 {
        self.code / 10_000
    }

    /// `MM` part of `SSMMNN`.
    #[inline]
    pub const fn module(&self) -> u32 {
        (self.code / 100) % 100
    }

    /// `NN` part of `SSMMNN`.
    #[inline]
    pub const fn sequence(&self) -> u32 {
        self.code % 100
    }

    /// Canonical namespace containing this code, if any.
    #[inline]
    pub fn namespace(&self) -> Option<&'static ErrorNamespace> {
        namespaces::find(self.code)
    }

    /// Whether this is the unknown-code sentinel.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.code == RESERVED_CODE
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl From<&ErrorCode> for u32 {
    fn from(code: &ErrorCode) -> Self {
        code.code
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_error_codes;

    // ========================================================================
    // HTTP Status
    // ========================================================================

    #[test]
    fn permitted_statuses_round_trip() {
        for status in HttpStatus::PERMITTED {
            assert_eq!(HttpStatus::checked_new(status).unwrap().value(), status);
        }
    }

    #[test]
    fn checked_status_rejects_unlisted() {
        assert_eq!(
            HttpStatus::checked_new(418),
            Err(HttpStatusError::NotPermitted { value: 418 })
        );
        assert!(HttpStatus::checked_new(0).is_err());
        assert!(HttpStatus::checked_new(503).is_err());
    }

    #[test]
    #[should_panic(expected = "HTTP status must be one of")]
    fn const_status_panics_at_runtime_when_invalid() {
        let _ = HttpStatus::new(302);
    }

    #[test]
    fn status_reason_phrases() {
        assert_eq!(HttpStatus::OK.reason(), "OK");
        assert_eq!(HttpStatus::UNAUTHORIZED.reason(), "Unauthorized");
        assert_eq!(HttpStatus::INTERNAL_SERVER_ERROR.reason(), "Internal Server Error");
        assert!(HttpStatus::OK.is_success());
        assert!(!HttpStatus::NOT_FOUND.is_success());
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    #[test]
    fn namespaces_are_disjoint_and_ordered() {
        for pair in namespaces::ALL.windows(2) {
            assert!(pair[0].end() < pair[1].start(), "{} overlaps {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn namespace_lookup_by_code() {
        assert_eq!(namespaces::find(100_001), Some(&namespaces::COMMON));
        assert_eq!(namespaces::find(100_206), Some(&namespaces::AUTH));
        assert_eq!(namespaces::find(110_102), Some(&namespaces::IAM_SECRET));
        assert_eq!(namespaces::find(100_100), None);
        assert_eq!(namespaces::find(999_999), None);
    }

    // ========================================================================
    // Error Code Construction
    // ========================================================================

    #[test]
    fn const_construction_and_parts() {
        const CODE: ErrorCode = ErrorCode::const_new(
            &namespaces::DATABASE,
            100_101,
            HttpStatus::new(500),
            "Database error",
        );
        assert_eq!(CODE.to_string(), "100101");
        assert_eq!(CODE.service(), 10);
        assert_eq!(CODE.module(), 1);
        assert_eq!(CODE.sequence(), 1);
        assert_eq!(CODE.namespace().map(ErrorNamespace::as_str), Some("DATABASE"));
    }

    #[test]
    #[should_panic(expected = "outside of its namespace")]
    fn const_construction_rejects_foreign_range() {
        let _ = ErrorCode::const_new(&namespaces::AUTH, 100_101, HttpStatus::OK, "");
    }

    #[test]
    fn checked_construction() {
        let code = ErrorCode::checked_new(120_001, 404, "Policy not found").unwrap();
        assert_eq!(code.http_status(), HttpStatus::NOT_FOUND);
        assert_eq!(code.namespace(), None);

        assert_eq!(
            ErrorCode::checked_new(0, 200, ""),
            Err(RegistrationError::ReservedCode)
        );
        assert_eq!(
            ErrorCode::checked_new(120_002, 409, "Conflict"),
            Err(RegistrationError::StatusNotPermitted {
                code: 120_002,
                status: 409
            })
        );
    }

    #[test]
    fn unknown_sentinel_shape() {
        assert!(UNKNOWN.is_unknown());
        assert_eq!(UNKNOWN.http_status().value(), 500);
        assert!(!UNKNOWN.message().is_empty());
        assert_eq!(UNKNOWN.namespace(), None);
    }

    #[test]
    fn macro_batch_definition() {
        define_error_codes! {
            &namespaces::IAM_SECRET => {
                SECRET_EXPIRED = (110_150, 400, "Secret expired"),
                SECRET_REVOKED = (110_151, 403, "Secret revoked"),
            }
        }

        assert_eq!(SECRET_EXPIRED.to_string(), "110150");
        assert_eq!(SECRET_REVOKED.http_status(), HttpStatus::FORBIDDEN);
        assert_eq!(u32::from(&SECRET_REVOKED), 110_151);
    }
}
