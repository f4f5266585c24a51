// liminal-core/src/runtime/dry_run.rs
// ============================================================================
// Module: Liminal Dry-Run Executor
// Description: Pure deterministic transaction execution simulator.
// Purpose: Produce a predicted outcome with no network or cryptographic activity.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The executor validates the payload first, then derives every field of
//! the result from the payload and strategy alone. It never reads the clock
//! for derived values; the caller supplies `now` only for the result's
//! timestamp field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::dry_run::DryRunResult;
use crate::core::identifiers::TxId;
use crate::core::payload::Payload;
use crate::core::strategy::CostImpact;
use crate::core::strategy::Strategy;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation and execution failures raised by the dry-run executor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DryRunError {
    /// Instruction data was empty.
    #[error("Empty instruction data")]
    EmptyInstructionData,
    /// The accounts list was empty.
    #[error("No accounts")]
    NoAccounts,
    /// The estimated amount was negative.
    #[error("negative estimated amount")]
    NegativeAmount,
    /// The strategy has no dry-run implementation.
    #[error("not yet implemented")]
    StrategyNotImplemented,
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Simulates execution of a payload under a chosen strategy.
///
/// # Errors
///
/// Returns a [`DryRunError`] variant when the payload fails validation or the
/// strategy has no simulator.
pub fn dry_run(id: &TxId, payload: &Payload, strategy: Strategy, now: Timestamp) -> Result<DryRunResult, DryRunError> {
    if payload.instruction_data.is_empty() {
        return Err(DryRunError::EmptyInstructionData);
    }
    if payload.accounts.is_empty() {
        return Err(DryRunError::NoAccounts);
    }
    if payload.estimated_amount < 0.0 {
        return Err(DryRunError::NegativeAmount);
    }
    if strategy == Strategy::S3PrivacyRail {
        return Err(DryRunError::StrategyNotImplemented);
    }

    let profile = strategy.profile();
    let is_private = strategy != Strategy::S0Normal;
    let simulated_rpc = simulated_rpc_name(strategy);
    let route = build_route(strategy, &simulated_rpc);
    let estimated_fee = estimate_fee(payload.instruction_count, profile.cost_impact);
    let simulated_execution_ms = estimate_execution_ms(profile.privacy_level);

    Ok(DryRunResult {
        id: id.clone(),
        success: true,
        simulated_rpc,
        is_private,
        strategy,
        route,
        estimated_fee,
        simulated_execution_ms,
        warnings: Vec::new(),
        timestamp: now,
        is_simulation: true,
    })
}

/// Deterministic simulated RPC name for a strategy.
fn simulated_rpc_name(strategy: Strategy) -> String {
    match strategy {
        Strategy::S0Normal => "public-rpc-01".to_string(),
        Strategy::S1RpcPrivacy => "privacy-rpc-01".to_string(),
        Strategy::S2EphemeralSender => "ephemeral-relay-01".to_string(),
        Strategy::S3PrivacyRail => unreachable!("S3 is rejected before this point"),
    }
}

/// Builds a route whose first hop is the client and last is the simulated RPC.
fn build_route(strategy: Strategy, simulated_rpc: &str) -> Vec<String> {
    let mut route = vec!["client".to_string()];
    if strategy == Strategy::S2EphemeralSender {
        route.push("ephemeral-relay".to_string());
    }
    route.push(simulated_rpc.to_string());
    route
}

/// Deterministic fee estimate as a function of instruction count and cost impact.
fn estimate_fee(instruction_count: u32, cost_impact: CostImpact) -> f64 {
    let base = 0.000_005 * f64::from(instruction_count.max(1));
    let multiplier = match cost_impact {
        CostImpact::None => 1.0,
        CostImpact::Low => 1.5,
        CostImpact::Medium => 2.5,
        CostImpact::High => 4.0,
    };
    base * multiplier
}

/// Deterministic simulated execution time as a function of privacy level.
fn estimate_execution_ms(privacy_level: u8) -> u32 {
    200 + u32::from(privacy_level) * 4
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::DryRunError;
    use super::dry_run;
    use crate::core::identifiers::TxId;
    use crate::core::payload::Payload;
    use crate::core::strategy::Strategy;
    use crate::core::time::Timestamp;

    fn payload() -> Payload {
        Payload {
            program_id: "Tokenkeg".into(),
            instruction_data: "03ab".into(),
            instruction_count: 1,
            accounts: vec!["S".into(), "R".into()],
            estimated_amount: 0.05,
            origin: "https://x".into(),
        }
    }

    #[test]
    fn successful_run_is_marked_as_simulation() {
        let result = dry_run(&TxId::new("tx_1"), &payload(), Strategy::S0Normal, Timestamp::now()).unwrap();
        assert!(result.is_simulation);
        assert!(result.success);
        assert_eq!(result.route.first().map(String::as_str), Some("client"));
        assert_eq!(result.route.last(), Some(&result.simulated_rpc));
    }

    #[test]
    fn empty_instruction_data_fails() {
        let mut p = payload();
        p.instruction_data = String::new();
        let err = dry_run(&TxId::new("tx_1"), &p, Strategy::S0Normal, Timestamp::now()).unwrap_err();
        assert_eq!(err, DryRunError::EmptyInstructionData);
    }

    #[test]
    fn empty_accounts_fails() {
        let mut p = payload();
        p.accounts = Vec::new();
        let err = dry_run(&TxId::new("tx_1"), &p, Strategy::S0Normal, Timestamp::now()).unwrap_err();
        assert_eq!(err, DryRunError::NoAccounts);
    }

    #[test]
    fn negative_amount_fails() {
        let mut p = payload();
        p.estimated_amount = -1.0;
        let err = dry_run(&TxId::new("tx_1"), &p, Strategy::S0Normal, Timestamp::now()).unwrap_err();
        assert_eq!(err, DryRunError::NegativeAmount);
    }

    #[test]
    fn s3_strategy_is_not_yet_implemented() {
        let err = dry_run(&TxId::new("tx_1"), &payload(), Strategy::S3PrivacyRail, Timestamp::now()).unwrap_err();
        assert_eq!(err, DryRunError::StrategyNotImplemented);
    }
}
