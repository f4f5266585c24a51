// liminal-core/src/core/rail.rs
// ============================================================================
// Module: Liminal Private Rail
// Description: Capability and status shapes for the private-rail collaborator.
// Purpose: Describe what a private rail implementation can hide and whether it is ready.
// Dependencies: serde
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Readiness status of a private-rail implementation.
///
/// Precedence when multiple conditions apply: `DisabledByPolicy` always wins
/// over `NotAvailable` (see the strategy selector and default adapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RailStatus {
    /// No private rail implementation is wired in.
    NotAvailable,
    /// An implementation exists but is missing required configuration.
    NotConfigured,
    /// The rail is ready to carry a transaction.
    Ready,
    /// The rail is configured but momentarily unreachable.
    TemporarilyUnavailable,
    /// The execution policy has disabled the rail.
    DisabledByPolicy,
}

impl RailStatus {
    /// Whether the rail may be selected as a strategy right now.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

// ============================================================================
// SECTION: Capabilities
// ============================================================================

/// Capability flags and bounds reported by a private-rail implementation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RailCapabilities {
    /// Whether plain transfers are supported.
    pub supports_transfers: bool,
    /// Whether arbitrary program calls are supported.
    pub supports_program_calls: bool,
    /// Whether the sender address is hidden.
    pub hides_sender: bool,
    /// Whether the transferred amount is hidden.
    pub hides_amount: bool,
    /// Whether the recipient address is hidden.
    pub hides_recipient: bool,
    /// Whether a relayer is required to submit.
    pub requires_relayer: bool,
    /// Whether a zero-knowledge proof is required to submit.
    pub requires_zk_proof: bool,
    /// Optional maximum amount the rail will carry.
    pub max_amount: Option<f64>,
    /// Optional minimum amount the rail will carry.
    pub min_amount: Option<f64>,
}

impl RailCapabilities {
    /// Capabilities for an implementation that supports nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            supports_transfers: false,
            supports_program_calls: false,
            hides_sender: false,
            hides_amount: false,
            hides_recipient: false,
            requires_relayer: false,
            requires_zk_proof: false,
            max_amount: None,
            min_amount: None,
        }
    }
}

// ============================================================================
// SECTION: Prepare / Estimate / Validate Results
// ============================================================================

/// Outcome of `prepare`, `estimate`, or `validate` on a not-ready rail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailUnavailableResult {
    /// Status the rail reported at the time of the call.
    pub status: RailStatus,
    /// Reason string; contains the word "policy" when policy caused the block.
    pub reason: String,
}
