// liminal-core/src/core/invariant.rs
// ============================================================================
// Module: Liminal Invariants
// Description: Stable invariant identifiers and the violation shape gates emit.
// Purpose: Give every safety-gate denial a stable, auditable identity.
// Dependencies: serde
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Invariant Id
// ============================================================================

/// Stable identifier for a safety invariant a gate can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvariantId {
    /// The kill-switch is engaged; overrides every other condition.
    KillSwitchOverridesAll,
    /// The private rail is disabled by policy.
    PrivateRailDisabled,
    /// Submission was attempted without a successful signing result.
    NoSubmissionWithoutSigning,
    /// The selected strategy has no implementation (`S3_PRIVACY_RAIL` dry-run).
    StrategyNotImplemented,
    /// Submission is disabled by policy.
    PolicyBlockedSubmission,
}

impl InvariantId {
    /// Stable external string form, per the external interface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KillSwitchOverridesAll => "KILL_SWITCH_OVERRIDES_ALL",
            Self::PrivateRailDisabled => "PRIVATE_RAIL_DISABLED",
            Self::NoSubmissionWithoutSigning => "NO_SUBMISSION_WITHOUT_SIGNING",
            Self::StrategyNotImplemented => "STRATEGY_NOT_IMPLEMENTED",
            Self::PolicyBlockedSubmission => "POLICY_BLOCKED_SUBMISSION",
        }
    }
}

// ============================================================================
// SECTION: Severity / Violation
// ============================================================================

/// Severity of an invariant violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The operation is blocked outright.
    Blocking,
    /// The operation proceeds but the violation is recorded.
    Advisory,
}

/// A single structured invariant violation produced by a gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvariantViolation {
    /// Which invariant fired.
    pub invariant_id: InvariantId,
    /// Human-readable explanation.
    pub message: String,
    /// Severity of the violation.
    pub severity: Severity,
}

impl InvariantViolation {
    /// Builds a blocking violation for the given invariant.
    #[must_use]
    pub fn blocking(invariant_id: InvariantId, message: impl Into<String>) -> Self {
        Self {
            invariant_id,
            message: message.into(),
            severity: Severity::Blocking,
        }
    }
}
