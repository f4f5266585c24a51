// liminal-core/src/runtime/rail_adapter.rs
// ============================================================================
// Module: Liminal Default Private Rail Adapter
// Description: The always-unavailable default implementation of the rail interface.
// Purpose: Satisfy the interface-only guarantee: never READY under this implementation.
// Dependencies: crate::core, crate::interfaces, crate::runtime::policy
// ============================================================================

//! ## Overview
//! `getStatus` must first consult the execution-policy manager; if the
//! private-rail policy bit is off it returns `DisabledByPolicy` before
//! considering any other signal. This default implementation never returns
//! `Ready` under any configuration: it is a concrete stand-in for a rail the
//! core does not implement, not a feature flag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::payload::Payload;
use crate::core::rail::RailCapabilities;
use crate::core::rail::RailStatus;
use crate::core::rail::RailUnavailableResult;
use crate::interfaces::EstimateResult;
use crate::interfaces::PrepareResult;
use crate::interfaces::PrivateRailAdapter;
use crate::interfaces::RailError;
use crate::interfaces::ValidationResult;
use crate::runtime::policy::ExecutionPolicy;

// ============================================================================
// SECTION: Default Adapter
// ============================================================================

/// Default private-rail adapter. Always reports unavailable.
///
/// Precedence: `DisabledByPolicy` wins over `NotAvailable` whenever both
/// apply, per the adopted reading of the rail's status precedence.
#[derive(Debug, Clone)]
pub struct DefaultPrivateRailAdapter {
    /// Shared execution policy consulted on every status check.
    policy: ExecutionPolicy,
}

impl DefaultPrivateRailAdapter {
    /// Creates a new default adapter bound to the given policy.
    #[must_use]
    pub const fn new(policy: ExecutionPolicy) -> Self {
        Self {
            policy,
        }
    }

    /// Builds the shared unavailable result for the current status.
    fn unavailable_result(&self) -> RailUnavailableResult {
        let status = self.current_status();
        let reason = match status {
            RailStatus::DisabledByPolicy => "private rail disabled by policy".to_string(),
            _ => "private rail has no implementation wired in".to_string(),
        };
        RailUnavailableResult {
            status,
            reason,
        }
    }

    /// Resolves the status without the fallible trait signature, since this
    /// implementation never fails to determine it.
    fn current_status(&self) -> RailStatus {
        if !self.policy.private_rail_enabled() {
            return RailStatus::DisabledByPolicy;
        }
        RailStatus::NotAvailable
    }
}

impl PrivateRailAdapter for DefaultPrivateRailAdapter {
    fn get_capabilities(&self) -> RailCapabilities {
        RailCapabilities::none()
    }

    fn get_status(&self) -> Result<RailStatus, RailError> {
        Ok(self.current_status())
    }

    fn prepare(&self, _payload: &Payload) -> Result<PrepareResult, RailError> {
        Ok(PrepareResult::Unavailable(self.unavailable_result()))
    }

    fn estimate(&self, _payload: &Payload) -> Result<EstimateResult, RailError> {
        Ok(EstimateResult::Unavailable(self.unavailable_result()))
    }

    fn validate(&self, _payload: &Payload) -> Result<ValidationResult, RailError> {
        Ok(ValidationResult::Unavailable(self.unavailable_result()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::DefaultPrivateRailAdapter;
    use crate::core::rail::RailStatus;
    use crate::interfaces::PrivateRailAdapter;
    use crate::runtime::policy::ExecutionPolicy;

    #[test]
    fn disabled_by_policy_wins_even_when_rail_enabled_flag_is_set() {
        let adapter = DefaultPrivateRailAdapter::new(ExecutionPolicy::permissive());
        assert_eq!(adapter.get_status().unwrap(), RailStatus::NotAvailable);

        let adapter = DefaultPrivateRailAdapter::new(ExecutionPolicy::locked_down());
        assert_eq!(adapter.get_status().unwrap(), RailStatus::DisabledByPolicy);
    }

    #[test]
    fn never_reports_ready() {
        let adapter = DefaultPrivateRailAdapter::new(ExecutionPolicy::permissive());
        assert!(!adapter.is_available().unwrap());
    }

    #[test]
    fn unavailable_reason_mentions_policy_when_policy_blocked() {
        let adapter = DefaultPrivateRailAdapter::new(ExecutionPolicy::locked_down());
        let result = adapter.validate(&sample_payload()).unwrap();
        match result {
            crate::interfaces::ValidationResult::Unavailable(unavailable) => {
                assert!(unavailable.reason.contains("policy"));
            }
            crate::interfaces::ValidationResult::Valid => unreachable!("expected unavailable"),
        }
    }

    fn sample_payload() -> crate::core::payload::Payload {
        crate::core::payload::Payload {
            program_id: "Tokenkeg".into(),
            instruction_data: "03ab".into(),
            instruction_count: 1,
            accounts: vec!["S".into()],
            estimated_amount: 0.1,
            origin: "https://x".into(),
        }
    }
}
