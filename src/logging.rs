//! Structured log entry for internal diagnostics.
//!
//! # Properties
//!
//! - Borrows from `CodedError` with an explicit lifetime
//! - Cannot outlive the error that created it
//! - No heap allocations in accessors
//!
//! Clients only ever see the registered message of a code. Everything the
//! caller attached (details, source text, metadata) is reachable through this
//! view, which the host's logger consumes on the spot.

use crate::ErrorCode;
use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Maximum length for any individual field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Metadata value wrapper with zeroization for owned data.
///
/// Borrowed values are assumed static and are not zeroized.
#[derive(Debug)]
pub struct ContextField {
    value: Cow<'static, str>,
}

impl ContextField {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl From<&'static str> for ContextField {
    fn from(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl From<String> for ContextField {
    fn from(value: String) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl From<Cow<'static, str>> for ContextField {
    fn from(value: Cow<'static, str>) -> Self {
        Self { value }
    }
}

impl Zeroize for ContextField {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for ContextField {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Structured log entry borrowed from a `CodedError`.
///
/// # Example
///
/// ```rust
/// # use iam_codes::{CodedError, definitions};
/// let err = CodedError::from_code(&definitions::ERR_DATABASE, "insert into users failed");
/// let log = err.internal_log();
/// assert_eq!(log.status(), 500);
/// assert_eq!(log.details(), "insert into users failed");
/// ```
#[derive(Debug)]
pub struct InternalLog<'a> {
    pub code: u32,
    pub coder: &'a ErrorCode,
    pub details: &'a str,
    pub source: Option<&'a str>,
    pub metadata: &'a [(&'static str, ContextField)],
}

impl<'a> InternalLog<'a> {
    /// Format for human-readable logs in trusted debug contexts.
    ///
    /// Only available with the `trusted_debug` feature in debug builds.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut output);
        if self.coder.is_unknown() {
            output.push_str(" [UNREGISTERED]");
        }
        output
    }

    /// Write structured log data to a formatter.
    ///
    /// Output shape:
    /// `[100101] status=500 details='...' source='...' key='value'`
    ///
    /// Each field is truncated to 1024 bytes on a UTF-8 boundary.
    ///
    /// ```rust
    /// # use iam_codes::{CodedError, definitions};
    /// let err = CodedError::from_code(&definitions::ERR_BIND, "missing field `name`")
    ///     .with_metadata("request_id", "r-42");
    /// let mut buffer = String::new();
    /// err.internal_log().write_to(&mut buffer).unwrap();
    /// assert_eq!(
    ///     buffer,
    ///     "[100003] status=400 details='missing field `name`' request_id='r-42'"
    /// );
    /// ```
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] status={} details='{}'",
            self.code,
            self.coder.http_status(),
            truncate_with_indicator(self.details)
        )?;

        if let Some(source) = self.source {
            write!(f, " source='{}'", truncate_with_indicator(source))?;
        }

        for (key, value) in self.metadata {
            write!(f, " {}='{}'", key, truncate_with_indicator(value.as_str()))?;
        }

        Ok(())
    }

    /// Raw code carried by the error, registered or not.
    #[inline]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Resolved registry entry (the unknown sentinel when unregistered).
    #[inline]
    pub const fn coder(&self) -> &ErrorCode {
        self.coder
    }

    #[inline]
    pub const fn status(&self) -> u16 {
        self.coder.http_status().value()
    }

    #[inline]
    pub const fn details(&self) -> &str {
        self.details
    }

    #[inline]
    pub const fn source(&self) -> Option<&str> {
        self.source
    }

    #[inline]
    pub const fn metadata(&self) -> &[(&'static str, ContextField)] {
        self.metadata
    }
}

/// Truncate a string for display, marking the cut.
///
/// Returns `Cow::Borrowed` when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{definitions, CodedError};

    #[test]
    fn truncate_ascii() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN + 10);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn no_truncate_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn truncate_utf8_boundary() {
        let s = "й".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn context_field_zeroizes_owned() {
        let mut field = ContextField::from(String::from("secret-id"));
        field.zeroize();
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn context_field_keeps_borrowed() {
        let mut field = ContextField::from("static");
        field.zeroize();
        assert_eq!(field.as_str(), "static");
    }

    #[test]
    fn write_to_includes_source_and_metadata() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = CodedError::wrap(definitions::ERR_DATABASE.code(), "select failed", source)
            .with_metadata("table", "users")
            .with_metadata("attempt", String::from("2"));

        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();

        assert_eq!(
            buffer,
            "[100101] status=500 details='select failed' source='connection reset' \
             table='users' attempt='2'"
        );
    }

    #[test]
    fn unregistered_code_logs_raw_code_with_fallback_status() {
        let err = CodedError::new(424_242, "custom");
        let log = err.internal_log();

        assert_eq!(log.code(), 424_242);
        assert!(log.coder().is_unknown());
        assert_eq!(log.status(), 500);
    }

    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    #[test]
    fn trusted_debug_marks_unregistered_codes() {
        let known = CodedError::new(definitions::ERR_BIND.code(), "empty body");
        assert!(!known.internal_log().format_for_trusted_debug().contains("[UNREGISTERED]"));

        let unknown = CodedError::new(424_242, "custom");
        let output = unknown.internal_log().format_for_trusted_debug();
        assert!(output.starts_with("[424242] status=500"));
        assert!(output.ends_with(" [UNREGISTERED]"));
    }

    #[test]
    fn oversized_details_are_bounded() {
        let err = CodedError::new(definitions::ERR_VALIDATION.code(), "x".repeat(10_000));
        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();

        assert!(buffer.len() < 1200);
        assert!(buffer.contains(TRUNCATION_INDICATOR));
    }
}
