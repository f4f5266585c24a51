// liminal-core/src/runtime/submission_gate.rs
// ============================================================================
// Module: Liminal Submission Gate
// Description: The final, order-sensitive checks a record must clear before submission.
// Purpose: Make kill-switch and policy denial impossible to bypass from any caller.
// Dependencies: crate::core, crate::runtime::policy
// ============================================================================

//! ## Overview
//! Checks run in a fixed order and stop at the first failure, matching the
//! external invariant that the kill-switch overrides everything else. A
//! caller that wants to submit must go through [`SubmissionGate::check`];
//! [`BlockedChainRpc`] wraps any [`ChainRpc`] so a caller that forgets to
//! call the gate first still cannot reach the collaborator while blocked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::invariant::InvariantId;
use crate::core::invariant::InvariantViolation;
use crate::core::invariant::Severity;
use crate::core::state::SubmissionResult;
use crate::core::state::TransactionRecord;
use crate::core::state::TxState;
use crate::core::strategy::Strategy;
use crate::core::time::Timestamp;
use crate::interfaces::ChainRpc;
use crate::interfaces::ChainRpcError;
use crate::runtime::policy::ExecutionPolicy;

// ============================================================================
// SECTION: Gate Result
// ============================================================================

/// A single reason submission was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateViolation {
    /// The kill-switch is engaged.
    KillSwitchEngaged,
    /// Submission is disabled by policy.
    SubmissionDisabledByPolicy,
    /// The record is not in the `SIGNED` state.
    NotSigned,
    /// The record's strategy is `S3PrivacyRail`, which has no submission path.
    StrategyNotSubmittable,
    /// The record has no successful signing result.
    NoSuccessfulSigningResult,
}

impl GateViolation {
    /// Human-readable explanation of the violation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::KillSwitchEngaged => "the kill-switch is engaged",
            Self::SubmissionDisabledByPolicy => "submission is disabled by policy",
            Self::NotSigned => "the record is not in the SIGNED state",
            Self::StrategyNotSubmittable => "S3 has no submission implementation",
            Self::NoSuccessfulSigningResult => "the record has no successful signing result",
        }
    }

    /// The stable invariant this violation corresponds to at the public boundary.
    #[must_use]
    pub const fn invariant_id(self) -> InvariantId {
        match self {
            Self::KillSwitchEngaged => InvariantId::KillSwitchOverridesAll,
            Self::SubmissionDisabledByPolicy => InvariantId::PolicyBlockedSubmission,
            Self::StrategyNotSubmittable => InvariantId::StrategyNotImplemented,
            Self::NotSigned | Self::NoSuccessfulSigningResult => InvariantId::NoSubmissionWithoutSigning,
        }
    }

    /// Severity of this violation. Every check this gate performs is an
    /// outright block; there is no advisory-only reason to deny submission.
    #[must_use]
    pub const fn severity(self) -> Severity {
        Severity::Blocking
    }

    /// Builds the structured, auditable violation a caller observes.
    #[must_use]
    pub fn to_invariant_violation(self) -> InvariantViolation {
        InvariantViolation {
            invariant_id: self.invariant_id(),
            message: self.message().to_string(),
            severity: self.severity(),
        }
    }
}

/// Result of evaluating the gate against a record.
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    /// Whether submission may proceed.
    pub allowed: bool,
    /// All violations found, in evaluation order. Empty when `allowed`.
    pub violations: Vec<InvariantViolation>,
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Evaluates whether a record may be submitted.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionGate {
    /// The execution policy consulted on every check.
    policy: ExecutionPolicy,
}

impl SubmissionGate {
    /// Builds a gate bound to the given policy.
    #[must_use]
    pub const fn new(policy: ExecutionPolicy) -> Self {
        Self {
            policy,
        }
    }

    /// Evaluates every check in order, collecting every violation encountered.
    ///
    /// Evaluation order: kill-switch, policy submission bit, record state,
    /// strategy, signing result. Later checks still run after an earlier one
    /// fails so a caller sees every reason at once.
    #[must_use]
    pub fn check(&self, record: &TransactionRecord) -> GateDecision {
        let mut checks = Vec::new();

        if self.policy.kill_switch_engaged() {
            checks.push(GateViolation::KillSwitchEngaged);
        }
        if !self.policy.submission_enabled() {
            checks.push(GateViolation::SubmissionDisabledByPolicy);
        }
        if record.state != TxState::Signed {
            checks.push(GateViolation::NotSigned);
        }
        if record.strategy_selection.as_ref().is_some_and(|selection| selection.strategy == Strategy::S3PrivacyRail) {
            checks.push(GateViolation::StrategyNotSubmittable);
        }
        if !record.signing_result.as_ref().is_some_and(|result| result.success) {
            checks.push(GateViolation::NoSuccessfulSigningResult);
        }

        let violations = checks.into_iter().map(GateViolation::to_invariant_violation).collect::<Vec<_>>();
        GateDecision {
            allowed: violations.is_empty(),
            violations,
        }
    }

    /// Asserts the gate currently blocks the given record, returning the
    /// violations found. Intended for callers that need to confirm a denial
    /// rather than merely observe it.
    ///
    /// # Errors
    ///
    /// Returns `Err` with an empty decision's opposite case: when the gate
    /// would in fact allow submission.
    pub fn assert_blocked(&self, record: &TransactionRecord) -> Result<Vec<InvariantViolation>, AssertBlockedError> {
        let decision = self.check(record);
        if decision.allowed {
            return Err(AssertBlockedError);
        }
        Ok(decision.violations)
    }
}

/// Raised by [`SubmissionGate::assert_blocked`] when the record is not blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("record is not blocked by the submission gate")]
pub struct AssertBlockedError;

// ============================================================================
// SECTION: Blocking RPC Proxy
// ============================================================================

/// Wraps a [`ChainRpc`] so every call is gated, regardless of what the caller
/// remembered to check beforehand.
pub struct BlockedChainRpc<'rpc> {
    /// The wrapped collaborator, only ever reached when the gate allows it.
    inner: &'rpc dyn ChainRpc,
    /// The gate every call is checked against first.
    gate: SubmissionGate,
}

impl<'rpc> BlockedChainRpc<'rpc> {
    /// Wraps `inner` behind `gate`.
    #[must_use]
    pub const fn new(inner: &'rpc dyn ChainRpc, gate: SubmissionGate) -> Self {
        Self {
            inner,
            gate,
        }
    }
}

impl ChainRpc for BlockedChainRpc<'_> {
    fn submit(&self, record: &TransactionRecord) -> Result<SubmissionResult, ChainRpcError> {
        let decision = self.gate.check(record);
        if !decision.allowed {
            let reasons = decision.violations.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join("; ");
            return Ok(SubmissionResult {
                success: false,
                tx_signature: None,
                error: Some(format!("submission blocked: {reasons}")),
                timestamp: Timestamp::now(),
            });
        }
        self.inner.submit(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::BlockedChainRpc;
    use super::SubmissionGate;
    use crate::core::identifiers::ContextId;
    use crate::core::identifiers::TxId;
    use crate::core::invariant::InvariantId;
    use crate::core::payload::Payload;
    use crate::core::state::SigningResult;
    use crate::core::state::SubmissionResult;
    use crate::core::state::TransactionRecord;
    use crate::core::state::TxState;
    use crate::core::strategy::CostImpact;
    use crate::core::strategy::Strategy;
    use crate::core::strategy::StrategySelection;
    use crate::core::time::Timestamp;
    use crate::interfaces::ChainRpc;
    use crate::interfaces::ChainRpcError;
    use crate::runtime::policy::ExecutionPolicy;

    fn signed_record() -> TransactionRecord {
        let payload = Payload {
            program_id: "Tokenkeg".into(),
            instruction_data: "03ab".into(),
            instruction_count: 1,
            accounts: vec!["S".into(), "R".into()],
            estimated_amount: 0.1,
            origin: "https://x".into(),
        };
        let mut record = TransactionRecord::new(TxId::new("tx_1"), ContextId::new("ctx_1"), payload, Timestamp::now());
        record.state = TxState::Signed;
        record.strategy_selection = Some(StrategySelection {
            strategy: Strategy::S0Normal,
            confidence: 0.9,
            rationale: "test".into(),
            alternatives: Vec::new(),
            privacy_level: 10,
            cost_impact: CostImpact::None,
        });
        record.signing_result = Some(SigningResult {
            success: true,
            signature: Some("sig".into()),
            error: None,
            timestamp: Timestamp::now(),
        });
        record
    }

    #[test]
    fn fully_valid_record_is_allowed() {
        let gate = SubmissionGate::new(ExecutionPolicy::permissive());
        let decision = gate.check(&signed_record());
        assert!(decision.allowed);
    }

    #[test]
    fn kill_switch_overrides_everything() {
        let gate = SubmissionGate::new(ExecutionPolicy::locked_down());
        let decision = gate.check(&signed_record());
        assert!(!decision.allowed);
        assert!(decision.violations.iter().any(|v| v.invariant_id == InvariantId::KillSwitchOverridesAll));
    }

    #[test]
    fn s3_strategy_is_never_submittable() {
        let gate = SubmissionGate::new(ExecutionPolicy::permissive());
        let mut record = signed_record();
        record.strategy_selection.as_mut().unwrap().strategy = Strategy::S3PrivacyRail;
        let decision = gate.check(&record);
        assert!(decision.violations.iter().any(|v| v.invariant_id == InvariantId::StrategyNotImplemented));
    }

    #[test]
    fn unsigned_state_is_rejected() {
        let gate = SubmissionGate::new(ExecutionPolicy::permissive());
        let mut record = signed_record();
        record.state = TxState::SignRequested;
        let decision = gate.check(&record);
        assert!(decision.violations.iter().any(|v| v.invariant_id == InvariantId::NoSubmissionWithoutSigning));
    }

    struct AlwaysSucceedsRpc;
    impl ChainRpc for AlwaysSucceedsRpc {
        fn submit(&self, _record: &TransactionRecord) -> Result<SubmissionResult, ChainRpcError> {
            Ok(SubmissionResult {
                success: true,
                tx_signature: Some("sig".into()),
                error: None,
                timestamp: Timestamp::now(),
            })
        }
    }

    #[test]
    fn blocked_proxy_never_reaches_inner_rpc_when_denied() {
        let gate = SubmissionGate::new(ExecutionPolicy::locked_down());
        let proxy = BlockedChainRpc::new(&AlwaysSucceedsRpc, gate);
        let result = proxy.submit(&signed_record()).unwrap();
        assert!(!result.success);
    }
}
