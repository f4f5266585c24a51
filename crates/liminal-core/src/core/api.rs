// liminal-core/src/core/api.rs
// ============================================================================
// Module: Liminal Public API Envelope
// Description: The result-or-error shape every public entry point returns.
// Purpose: Convert internal errors to a typed envelope at the outermost boundary.
// Dependencies: serde, crate::core::invariant
// ============================================================================

//! ## Overview
//! The core propagates `Result` internally; this envelope exists only for
//! the public API surface, the single point at which internal errors are
//! converted for a host transport.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::invariant::InvariantId;

// ============================================================================
// SECTION: Error Code
// ============================================================================

/// Stable public error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The requested record or receipt does not exist.
    NotFound,
    /// A safety invariant fired.
    InvariantViolation,
    /// Any other failure, normalized at the boundary.
    Unknown,
}

/// Public-facing error shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// The invariant that fired, present only for `INVARIANT_VIOLATION`.
    pub invariant_id: Option<InvariantId>,
}

impl ApiError {
    /// Builds a `NOT_FOUND` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
            invariant_id: None,
        }
    }

    /// Builds an `INVARIANT_VIOLATION` error.
    #[must_use]
    pub fn invariant_violation(invariant_id: InvariantId, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvariantViolation,
            message: message.into(),
            invariant_id: Some(invariant_id),
        }
    }

    /// Builds an `UNKNOWN` error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Unknown,
            message: message.into(),
            invariant_id: None,
        }
    }
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// The envelope every public call returns: `{ok: true, data}` or
/// `{ok: false, error}`. A plain struct with a boolean discriminant is used,
/// rather than an internally tagged enum, so the wire shape's `ok` field is
/// a genuine JSON boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    /// Discriminant: `true` when `data` is populated, `false` when `error` is.
    pub ok: bool,
    /// The returned data, present only when `ok` is `true`.
    pub data: Option<T>,
    /// The structured error, present only when `ok` is `false`.
    pub error: Option<ApiError>,
}

impl<T> ApiResult<T> {
    /// Converts a `Result` into the envelope shape.
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Self {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

// ============================================================================
// SECTION: Message Channel Names
// ============================================================================

/// Opaque message-channel names the out-of-scope transport layer binds against.
pub mod channels {
    /// Create a browsing context.
    pub const CONTEXT_CREATE: &str = "CONTEXT_CREATE";
    /// Destroy a browsing context.
    pub const CONTEXT_DESTROY: &str = "CONTEXT_DESTROY";
    /// Rotate a browsing context.
    pub const CONTEXT_ROTATE: &str = "CONTEXT_ROTATE";
    /// Get a browsing context.
    pub const CONTEXT_GET: &str = "CONTEXT_GET";
    /// List browsing contexts.
    pub const CONTEXT_LIST: &str = "CONTEXT_LIST";
    /// Set the network proxy.
    pub const PROXY_SET: &str = "PROXY_SET";
    /// Get the network proxy.
    pub const PROXY_GET: &str = "PROXY_GET";
    /// Get a receipt.
    pub const RECEIPT_GET: &str = "RECEIPT_GET";
    /// Subscribe to receipt updates.
    pub const RECEIPT_SUBSCRIBE: &str = "RECEIPT_SUBSCRIBE";
    /// Push a receipt update.
    pub const RECEIPT_UPDATE: &str = "RECEIPT_UPDATE";
    /// Create a transaction.
    pub const TX_CREATE: &str = "TX_CREATE";
    /// Get a transaction.
    pub const TX_GET: &str = "TX_GET";
    /// Run the dry-run pipeline for a transaction.
    pub const TX_DRY_RUN: &str = "TX_DRY_RUN";
    /// Abort a transaction.
    pub const TX_ABORT: &str = "TX_ABORT";
    /// Fetch a transaction's receipt.
    pub const TX_RECEIPT: &str = "TX_RECEIPT";
    /// Connect a wallet.
    pub const WALLET_CONNECT: &str = "WALLET_CONNECT";
    /// Disconnect a wallet.
    pub const WALLET_DISCONNECT: &str = "WALLET_DISCONNECT";
    /// Request a signature.
    pub const WALLET_SIGN: &str = "WALLET_SIGN";
    /// Request multiple signatures.
    pub const WALLET_SIGN_ALL: &str = "WALLET_SIGN_ALL";
    /// Get wallet status.
    pub const WALLET_STATUS: &str = "WALLET_STATUS";
    /// Revoke wallet access.
    pub const WALLET_REVOKE: &str = "WALLET_REVOKE";
}
