// liminal-core/src/runtime/receipt.rs
// ============================================================================
// Module: Liminal Receipt Builder
// Description: Projects a transaction record into its public receipt shape.
// Purpose: Keep the receipt's rail-status framing in one place, away from orchestration.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A receipt never certifies on-chain confirmation by itself; `is_simulation`
//! is always `true` so a caller cannot mistake a receipt for chain-side
//! proof. The private-rail fields are resolved fresh from the adapter at
//! build time rather than cached on the record, since a rail's status can
//! change between pipeline stages and a receipt should reflect the present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::rail::RailStatus;
use crate::core::receipt::Receipt;
use crate::core::state::TransactionRecord;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the public receipt projection of `record`, given the private
/// rail's current status.
#[must_use]
pub fn build_receipt(record: TransactionRecord, rail_status: RailStatus) -> Receipt {
    let reason = if rail_status.is_ready() {
        "private rail is ready".to_string()
    } else {
        "private rail is not available".to_string()
    };
    Receipt {
        tx_id: record.id,
        state: record.state,
        submitted: record.submission_result.is_some(),
        submission_result: record.submission_result,
        signing_result: record.signing_result,
        dry_run_result: record.dry_run_result,
        risk_score: record.risk_score,
        strategy_selection: record.strategy_selection,
        classification: record.classification,
        private_rail_available: rail_status.is_ready(),
        private_rail_status: rail_status,
        private_rail_reason: reason,
        is_simulation: true,
    }
}
