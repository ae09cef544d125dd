//! Declarative macros for defining, registering and raising coded errors.
//!
//! - [`define_error_code!`] / [`define_error_codes!`]: const catalog entries,
//!   validated at compile time.
//! - [`register_codes!`]: batch registration into a `RegistryBuilder`, for
//!   services extending the shared catalog at startup.
//! - [`coded_err!`]: build a `CodedError` with formatted internal details.
//!
//! ```rust
//! use iam_codes::{register_codes, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::with_builtin();
//! register_codes!(&mut builder => {
//!     120_001 => (404, "Policy not found"),
//!     120_002 => (400, "Policy already exist"),
//! });
//! assert_eq!(builder.build().http_status_for(120_002), 400);
//! ```

/// Define a single error code const.
///
/// # Example
///
/// ```rust
/// # use iam_codes::{define_error_code, namespaces};
/// define_error_code!(
///     /// Policy not found.
///     ERR_POLICY_NOT_FOUND,
///     &namespaces::IAM_USER,
///     110_050,
///     404,
///     "Policy not found"
/// );
/// assert_eq!(ERR_POLICY_NOT_FOUND.code(), 110_050);
/// ```
#[macro_export]
macro_rules! define_error_code {
    ($(#[$meta:meta])* $name:ident, $namespace:expr, $code:expr, $status:expr, $message:expr) => {
        $(#[$meta])*
        pub const $name: $crate::ErrorCode = $crate::ErrorCode::const_new(
            $namespace,
            $code,
            $crate::HttpStatus::new($status),
            $message,
        );
    };
}

/// Define multiple error codes within the same namespace.
///
/// Each entry is `NAME = (code, http_status, message)` and may carry doc
/// comments or other attributes.
///
/// # Example
///
/// ```rust
/// # use iam_codes::{define_error_codes, namespaces};
/// define_error_codes! {
///     &namespaces::IAM_SECRET => {
///         /// Secret expired.
///         ERR_SECRET_EXPIRED = (110_110, 400, "Secret expired"),
///         ERR_SECRET_REVOKED = (110_111, 403, "Secret revoked"),
///     }
/// }
/// ```
///
/// ```rust,compile_fail
/// # use iam_codes::{define_error_codes, namespaces};
/// // 100101 belongs to DATABASE, not AUTH
/// define_error_codes! {
///     &namespaces::AUTH => {
///         ERR_MISPLACED = (100_101, 401, "Misplaced"),
///     }
/// }
/// # fn main() { let _ = &ERR_MISPLACED; }
/// ```
#[macro_export]
macro_rules! define_error_codes {
    ($namespace:expr => {
        $( $(#[$meta:meta])* $name:ident = ($code:expr, $status:expr, $message:expr) ),+ $(,)?
    }) => {
        $(
            $crate::define_error_code!($(#[$meta])* $name, $namespace, $code, $status, $message);
        )+
    };
}

/// Register a batch of `code => (http_status, message)` entries.
///
/// # Panics
///
/// Panics on the first duplicate, reserved code or non-permitted status.
#[macro_export]
macro_rules! register_codes {
    ($builder:expr => { $( $code:expr => ($status:expr, $message:expr) ),* $(,)? }) => {{
        let builder: &mut $crate::RegistryBuilder = $builder;
        $(
            builder.register($code, $status, $message);
        )*
    }};
}

/// Create a `CodedError` with literal or formatted internal details.
///
/// The details never appear in the error's `Display` output.
///
/// ```rust
/// # use iam_codes::{coded_err, definitions};
/// let user = "alice";
/// let err = coded_err!(definitions::ERR_USER_NOT_FOUND.code(), "lookup of {} failed", user);
/// assert_eq!(err.http_status(), 404);
/// assert!(!err.to_string().contains("alice"));
/// ```
#[macro_export]
macro_rules! coded_err {
    ($code:expr, $details:literal $(,)?) => {
        $crate::CodedError::new($code, $details)
    };
    ($code:expr, $fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::CodedError::new($code, ::std::format!($fmt, $($arg),+))
    };
}

// ============================================================================
// Tests
// ============================================================================
