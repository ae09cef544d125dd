//! Code registry - the process-wide `code -> (status, message)` table.
//!
//! # Lifecycle
//!
//! The registry has two phases, and each phase is its own type:
//!
//! 1. **Populating** - [`RegistryBuilder`] owns `&mut` registration. Every code
//!    may be inserted once; a second insertion is a programming error and
//!    panics immediately.
//! 2. **Read-only** - [`RegistryBuilder::build`] consumes the builder and
//!    returns a [`Registry`] that only offers `&self` queries. It is `Send + Sync`
//!    and can be shared across threads without locking.
//!
//! # Process-wide Instance
//!
//! [`global()`] lazily builds [`Registry::builtin`] on first use. A service that
//! registers its own codes calls [`install`] during startup, before anything
//! reads the global.
//!
//! ```rust
//! use iam_codes::{definitions, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::with_builtin();
//! builder.register(120_001, 404, "Policy not found");
//! let registry = builder.build();
//!
//! assert_eq!(registry.http_status_for(120_001), 404);
//! assert_eq!(registry.http_status_for(definitions::ERR_UNKNOWN.code()), 500);
//! assert_eq!(registry.http_status_for(999_999), 500);
//! ```

use crate::codes::{ErrorCode, ErrorNamespace, RESERVED_CODE, UNKNOWN};
use crate::definitions;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Status returned for codes with no registered entry.
pub const FALLBACK_STATUS: u16 = 500;

// ============================================================================
// Registration Errors
// ============================================================================

/// Why a registration was rejected.
///
/// All variants are configuration defects found at startup, never transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The code is already present in the table.
    DuplicateCode { code: u32 },
    /// Code `0` belongs to the unknown-code sentinel.
    ReservedCode,
    /// The HTTP status is outside the permitted set.
    StatusNotPermitted { code: u32, status: u16 },
}

impl RegistrationError {
    /// Message safe for untrusted viewers; does not reveal the code involved.
    pub fn to_public(&self) -> &'static str {
        match self {
            Self::DuplicateCode { .. } => "Error code already registered",
            Self::ReservedCode => "Error code is reserved",
            Self::StatusNotPermitted { .. } => "Invalid HTTP status for error code",
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCode { code } => {
                write!(f, "error code {} already registered", code)
            }
            Self::ReservedCode => {
                write!(f, "error code {} is reserved for unknown errors", RESERVED_CODE)
            }
            Self::StatusNotPermitted { code, status } => {
                write!(
                    f,
                    "error code {} uses HTTP status {} (expected one of 200, 400, 401, 403, 404, 500)",
                    code, status
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

// ============================================================================
// Populating Phase
// ============================================================================

/// Write-once table under construction.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<u32, ErrorCode>,
}

impl RegistryBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with the shared catalog in [`definitions`].
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        definitions::register_builtin(&mut builder);
        builder
    }

    /// Register `code`, failing fast on any configuration defect.
    ///
    /// # Panics
    ///
    /// Panics if the code is already registered, is the reserved code `0`, or
    /// uses a status outside [`HttpStatus::PERMITTED`](crate::HttpStatus::PERMITTED).
    /// A duplicate would make status/message resolution depend on
    /// registration order, so startup must not continue.
    #[track_caller]
    pub fn register(&mut self, code: u32, http_status: u16, message: &'static str) {
        if let Err(err) = self.try_register(code, http_status, message) {
            panic!("error code registration failed: {}", err);
        }
    }

    /// Register `code`, reporting defects instead of panicking.
    ///
    /// On error the table is left unchanged.
    pub fn try_register(
        &mut self,
        code: u32,
        http_status: u16,
        message: &'static str,
    ) -> Result<(), RegistrationError> {
        let entry = ErrorCode::checked_new(code, http_status, message)?;
        self.insert(entry)
    }

    /// Register a const catalog definition.
    ///
    /// # Panics
    ///
    /// Same conditions as [`register`](Self::register).
    #[track_caller]
    pub fn register_code(&mut self, code: &ErrorCode) {
        if let Err(err) = self.try_register_code(code) {
            panic!("error code registration failed: {}", err);
        }
    }

    /// Fallible form of [`register_code`](Self::register_code).
    pub fn try_register_code(&mut self, code: &ErrorCode) -> Result<(), RegistrationError> {
        if code.code() == RESERVED_CODE {
            return Err(RegistrationError::ReservedCode);
        }
        self.insert(code.clone())
    }

    fn insert(&mut self, entry: ErrorCode) -> Result<(), RegistrationError> {
        match self.entries.entry(entry.code()) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateCode { code: entry.code() }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// Whether `code` has been registered so far.
    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of registered codes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the table. No further registration is possible.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

// ============================================================================
// Read-only Phase
// ============================================================================

/// Frozen code table.
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<u32, ErrorCode>,
}

impl Registry {
    /// The shared catalog from [`definitions`], frozen.
    ///
    /// Deterministic: every call yields an identical table.
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtin().build()
    }

    /// Registered entry for `code`, or `None` when the code is unknown.
    #[inline]
    pub fn lookup(&self, code: u32) -> Option<&ErrorCode> {
        self.entries.get(&code)
    }

    /// Registered entry for `code`, or the [`UNKNOWN`] sentinel.
    #[inline]
    pub fn resolve(&self, code: u32) -> &ErrorCode {
        self.lookup(code).unwrap_or(&UNKNOWN)
    }

    /// HTTP status for `code`; [`FALLBACK_STATUS`] when unknown.
    #[inline]
    pub fn http_status_for(&self, code: u32) -> u16 {
        self.lookup(code)
            .map_or(FALLBACK_STATUS, |entry| entry.http_status().value())
    }

    /// Default message for `code`; the generic sentinel message when unknown.
    #[inline]
    pub fn message_for(&self, code: u32) -> &'static str {
        self.resolve(code).message()
    }

    /// Whether `code` is registered.
    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of registered codes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorCode> + '_ {
        let mut entries: Vec<&ErrorCode> = self.entries.values().collect();
        entries.sort_unstable_by_key(|entry| entry.code());
        entries.into_iter()
    }

    /// Entries inside `namespace`, ordered by code.
    pub fn codes_in<'a>(&'a self, namespace: &ErrorNamespace) -> Vec<&'a ErrorCode> {
        self.iter()
            .filter(|entry| namespace.contains(entry.code()))
            .collect()
    }
}

// ============================================================================
// Process-wide Instance
// ============================================================================

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, built from [`Registry::builtin`] on first use
/// unless [`install`] ran earlier.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::builtin)
}

/// Install `registry` as the process-wide instance.
///
/// Must run during startup before the first call to [`global()`] (directly or
/// through [`lookup`], [`resolve`], [`http_status_for`] or a `CodedError`).
///
/// # Errors
///
/// Returns the registry back if the global is already initialized.
pub fn install(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// [`Registry::lookup`] on the process-wide instance.
#[inline]
pub fn lookup(code: u32) -> Option<&'static ErrorCode> {
    global().lookup(code)
}

/// [`Registry::resolve`] on the process-wide instance.
#[inline]
pub fn resolve(code: u32) -> &'static ErrorCode {
    global().resolve(code)
}

/// [`Registry::http_status_for`] on the process-wide instance.
#[inline]
pub fn http_status_for(code: u32) -> u16 {
    global().http_status_for(code)
}

// ============================================================================
// Tests
// ============================================================================
