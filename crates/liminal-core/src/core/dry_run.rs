// liminal-core/src/core/dry_run.rs
// ============================================================================
// Module: Liminal Dry-Run Result
// Description: Output shape of the deterministic simulated execution.
// Purpose: Carry a predicted outcome without network or cryptographic activity.
// Dependencies: serde
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::TxId;
use crate::core::strategy::Strategy;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Dry-Run Result
// ============================================================================

/// Deterministic simulated execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryRunResult {
    /// Transaction this result belongs to.
    pub id: TxId,
    /// Whether the simulation succeeded.
    pub success: bool,
    /// Simulated RPC node name.
    pub simulated_rpc: String,
    /// Whether the simulated RPC call is routed through a private endpoint.
    pub is_private: bool,
    /// Strategy the simulation was run under.
    pub strategy: Strategy,
    /// Simulated route, first element the client and last the RPC.
    pub route: Vec<String>,
    /// Estimated network fee in native chain units.
    pub estimated_fee: f64,
    /// Simulated execution time in milliseconds.
    pub simulated_execution_ms: u32,
    /// Non-fatal warnings surfaced during simulation.
    pub warnings: Vec<String>,
    /// When the simulation was produced.
    pub timestamp: Timestamp,
    /// Always `true`: dry-run results never reflect real chain state.
    pub is_simulation: bool,
}
