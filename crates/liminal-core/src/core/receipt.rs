// liminal-core/src/core/receipt.rs
// ============================================================================
// Module: Liminal Receipt
// Description: Public, read-only projection of a transaction record.
// Purpose: Give external consumers a stable view without exposing internal state.
// Dependencies: serde, crate::core
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::classification::Classification;
use crate::core::dry_run::DryRunResult;
use crate::core::identifiers::TxId;
use crate::core::rail::RailStatus;
use crate::core::risk::RiskScore;
use crate::core::state::SigningResult;
use crate::core::state::SubmissionResult;
use crate::core::state::TxState;
use crate::core::strategy::StrategySelection;

// ============================================================================
// SECTION: Receipt
// ============================================================================

/// Public, read-only projection of a transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction identifier.
    pub tx_id: TxId,
    /// Current state.
    pub state: TxState,
    /// Whether the transaction has been submitted.
    pub submitted: bool,
    /// Submission outcome, if any.
    pub submission_result: Option<SubmissionResult>,
    /// Signing outcome, if any.
    pub signing_result: Option<SigningResult>,
    /// Dry-run outcome, if any.
    pub dry_run_result: Option<DryRunResult>,
    /// Risk score, if computed.
    pub risk_score: Option<RiskScore>,
    /// Strategy selection, if computed.
    pub strategy_selection: Option<StrategySelection>,
    /// Classification, if computed.
    pub classification: Option<Classification>,
    /// Whether the private rail is currently available.
    pub private_rail_available: bool,
    /// Current private rail status.
    pub private_rail_status: RailStatus,
    /// Reason string accompanying the private rail status.
    pub private_rail_reason: String,
    /// Always `true`: receipts never certify on-chain confirmation by themselves.
    pub is_simulation: bool,
}
