//! # IAM Codes
//!
//! Process-wide catalog of API error codes: every code maps to exactly one
//! HTTP status and one default message.
//!
//! ## Design
//!
//! 1. **Codes are a public contract** - numeric ranges per subsystem, never renumbered
//! 2. **Registration happens once** - a duplicate code aborts startup
//! 3. **The table is frozen after startup** - `RegistryBuilder` populates, `Registry` reads
//! 4. **Unknown codes never crash** - they resolve to a 500 sentinel
//! 5. **Clients see registered messages only** - internal details stay in logs
//!
//! ## Quick Start
//!
//! ```rust
//! use iam_codes::{definitions, http_status_for, lookup};
//!
//! assert_eq!(http_status_for(definitions::ERR_UNKNOWN.code()), 500);
//! assert_eq!(http_status_for(110_001), 404);
//!
//! // Unregistered codes fall back to 500 instead of failing
//! assert!(lookup(999_999).is_none());
//! assert_eq!(http_status_for(999_999), 500);
//! ```
//!
//! ## Extending the Catalog
//!
//! ```rust
//! use iam_codes::{install, Registry, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::with_builtin();
//! builder.register(120_001, 404, "Policy not found");
//! let registry: Registry = builder.build();
//!
//! // Must run before anything reads the process-wide registry.
//! if let Err(_already_initialized) = install(registry) {
//!     // keep the registry that is already live
//! }
//! ```
//!
//! ## Carrying Codes Through Errors
//!
//! ```rust
//! use iam_codes::{definitions, CodedError, Result};
//!
//! fn find_user(name: &str) -> Result<()> {
//!     Err(CodedError::from_code(&definitions::ERR_USER_NOT_FOUND, format!("no row for {}", name)))
//! }
//!
//! let err = find_user("alice").unwrap_err();
//! assert_eq!(err.http_status(), 404);
//! assert_eq!(err.to_string(), "User not found (110001)");
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: `InternalLog::format_for_trusted_debug` (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::result;
use zeroize::Zeroize;

pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod logging;
pub mod registry;
pub mod response;

pub use codes::*;
pub use logging::*;
pub use registry::*;
pub use response::*;

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, CodedError>;

// ============================================================================
// Internal Error Context
// ============================================================================

struct ErrorContext {
    details: Cow<'static, str>,
    source_text: Option<Cow<'static, str>>,
    metadata: SmallVec<[(&'static str, ContextField); 4]>,
}

impl ErrorContext {
    #[inline]
    fn new(details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            details: details.into(),
            source_text: None,
            metadata: SmallVec::new(),
        }
    }

    #[inline]
    fn add_metadata(&mut self, key: &'static str, value: impl Into<Cow<'static, str>>) {
        self.metadata.push((key, ContextField::from(value.into())));
    }
}

impl Zeroize for ErrorContext {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.details {
            s.zeroize();
        }
        if let Some(Cow::Owned(ref mut s)) = self.source_text {
            s.zeroize();
        }
        for (_, value) in &mut self.metadata {
            value.zeroize();
        }
        self.metadata.clear();
    }
}

impl Drop for ErrorContext {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// ============================================================================
// Coded Error
// ============================================================================

/// An error carrying a registered API code.
///
/// # Key Properties
///
/// - `Display` shows the registered message and code only, never details
/// - Unknown codes resolve to [`UNKNOWN`] (500) instead of failing
/// - Owned details, source text and metadata are zeroized on drop
/// - The wrapped source stays reachable via [`Error::source`]
#[must_use = "errors should be handled or returned"]
pub struct CodedError {
    code: u32,
    context: ErrorContext,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl CodedError {
    /// Create an error for `code` with internal details.
    #[inline]
    pub fn new(code: u32, details: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            context: ErrorContext::new(details),
            source: None,
        }
    }

    /// Create an error for a catalog code.
    #[inline]
    pub fn from_code(code: &ErrorCode, details: impl Into<Cow<'static, str>>) -> Self {
        Self::new(code.code(), details)
    }

    /// Wrap a lower-level error under `code`.
    ///
    /// The source's text is captured for internal logs only.
    pub fn wrap<E>(code: u32, details: impl Into<Cow<'static, str>>, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let mut err = Self::new(code, details);
        err.context.source_text = Some(Cow::Owned(source.to_string()));
        err.source = Some(Box::new(source));
        err
    }

    /// Add tracking metadata (request IDs, user IDs, etc.).
    #[inline]
    pub fn with_metadata(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.context.add_metadata(key, value);
        self
    }

    /// Raw code carried by this error.
    #[inline]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Registry entry for this error's code, or [`UNKNOWN`].
    #[inline]
    pub fn coder(&self) -> &'static ErrorCode {
        registry::resolve(self.code)
    }

    /// HTTP status to answer with.
    #[inline]
    pub fn http_status(&self) -> u16 {
        self.coder().http_status().value()
    }

    /// Whether the code is registered in the process-wide registry.
    #[inline]
    pub fn is_known(&self) -> bool {
        registry::lookup(self.code).is_some()
    }

    /// Create a structured internal log view borrowing from this error.
    ///
    /// ```rust
    /// # use iam_codes::{CodedError, definitions};
    /// let err = CodedError::from_code(&definitions::ERR_PASSWORD_INCORRECT, "user=alice");
    /// let log = err.internal_log();
    /// assert_eq!(log.details(), "user=alice");
    /// ```
    #[inline]
    pub fn internal_log(&self) -> InternalLog<'_> {
        InternalLog {
            code: self.code,
            coder: self.coder(),
            details: self.context.details.as_ref(),
            source: self.context.source_text.as_deref(),
            metadata: &self.context.metadata,
        }
    }

    /// Callback form of [`internal_log`](Self::internal_log).
    #[inline]
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InternalLog<'_>) -> R,
    {
        let log = self.internal_log();
        f(&log)
    }
}

impl Drop for CodedError {
    fn drop(&mut self) {
        // Source first: it may hold its own copy of sensitive text.
        self.source = None;
        self.context.zeroize();
    }
}

impl fmt::Debug for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodedError")
            .field("code", &self.code)
            .field("status", &self.http_status())
            .field("context", &"<REDACTED>")
            .field("source", &self.source.as_ref().map(|_| "<PRESENT>"))
            .finish()
    }
}

impl fmt::Display for CodedError {
    /// External display, safe for clients: `"{message} ({code})"`.
    ///
    /// Unregistered codes display as the unknown sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coder = self.coder();
        if coder.message().is_empty() {
            write!(f, "{}", coder)
        } else {
            write!(f, "{} ({})", coder.message(), coder)
        }
    }
}

impl Error for CodedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::io;

    #[test]
    fn display_uses_registered_message() {
        let err = CodedError::from_code(&definitions::ERR_TOKEN_INVALID, "kid=abc not trusted");
        assert_eq!(err.to_string(), "Token invalid (100005)");
        assert_eq!(err.http_status(), 403);
        assert!(err.is_known());
    }

    #[test]
    fn display_reveals_no_details() {
        let err = CodedError::wrap(
            definitions::ERR_DATABASE.code(),
            "dsn=postgres://admin:hunter2@db",
            io::Error::from(io::ErrorKind::ConnectionRefused),
        );
        let displayed = format!("{}", err);
        assert!(!displayed.contains("hunter2"));
        assert!(!displayed.contains("refused"));
        assert_eq!(displayed, "Database error (100101)");

        let debugged = format!("{:?}", err);
        assert!(!debugged.contains("hunter2"));
        assert!(debugged.contains("<REDACTED>"));
    }

    #[test]
    fn success_code_displays_bare_code() {
        let err = CodedError::from_code(&definitions::ERR_SUCCESS, "");
        assert_eq!(err.to_string(), "100001");
        assert_eq!(err.http_status(), 200);
    }

    #[test]
    fn unknown_code_falls_back_to_sentinel() {
        let err = CodedError::new(999_999, "raised by a plugin");
        assert!(!err.is_known());
        assert_eq!(err.http_status(), 500);
        assert!(err.coder().is_unknown());
        assert_eq!(err.to_string(), "An internal server error occurred (0)");
        assert_eq!(err.code(), 999_999);
    }

    #[test]
    fn source_is_exposed() {
        let err = CodedError::wrap(
            definitions::ERR_DECODING_JSON.code(),
            "request body",
            io::Error::new(io::ErrorKind::InvalidData, "trailing comma"),
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "trailing comma");
        assert_eq!(err.internal_log().source(), Some("trailing comma"));
    }

    #[test]
    fn metadata_spills_past_inline_capacity() {
        let mut err = CodedError::new(definitions::ERR_VALIDATION.code(), "bad input");
        for i in 0..8 {
            err = err.with_metadata("field", format!("f{}", i));
        }
        let log = err.internal_log();
        assert_eq!(log.metadata().len(), 8);
        assert_eq!(log.metadata()[7].1.as_str(), "f7");
    }

    #[test]
    fn with_internal_log_returns_closure_value() {
        let err = CodedError::from_code(&definitions::ERR_SECRET_NOT_FOUND, "secret=s-1");
        let status = err.with_internal_log(|log| log.status());
        assert_eq!(status, 404);
    }

    #[test]
    fn result_alias_propagates() {
        fn parse(input: &str) -> Result<u32> {
            input.parse::<u32>().map_err(|e| {
                CodedError::wrap(definitions::ERR_VALIDATION.code(), "parse id", e)
            })
        }

        fn handler(input: &str) -> Result<u32> {
            let id = parse(input)?;
            Ok(id + 1)
        }

        assert_eq!(handler("41").unwrap(), 42);
        assert_eq!(handler("x").unwrap_err().http_status(), 400);
    }
}
