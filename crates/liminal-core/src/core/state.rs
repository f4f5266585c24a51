// liminal-core/src/core/state.rs
// ============================================================================
// Module: Liminal Transaction State
// Description: The transaction record, its state enum, and append-only history.
// Purpose: Define the central entity the state machine owns and mutates.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! A `TransactionRecord` is exclusively owned by the state machine store;
//! references handed to collaborators are read-only snapshots (`Clone`s).
//! Its `state_history` is append-only by construction: this module exposes
//! no API that removes or mutates an existing entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::classification::Classification;
use crate::core::dry_run::DryRunResult;
use crate::core::identifiers::ContextId;
use crate::core::identifiers::TxId;
use crate::core::payload::Payload;
use crate::core::risk::RiskScore;
use crate::core::strategy::StrategySelection;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Transaction State
// ============================================================================

/// A transaction's position in the pipeline state graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxState {
    /// Freshly created, not yet classified.
    New,
    /// Undergoing or past classification.
    Classify,
    /// Undergoing or past risk scoring.
    RiskScore,
    /// Undergoing or past strategy selection.
    StrategySelect,
    /// Prepared for dry-run.
    Prepare,
    /// Undergoing or past dry-run simulation.
    DryRun,
    /// Dry-run succeeded; awaiting an explicit sign request.
    SimulatedConfirm,
    /// Signing has been explicitly requested.
    SignRequested,
    /// Signing succeeded.
    Signed,
    /// Submitted to the chain RPC collaborator.
    Submit,
    /// Terminal: submission confirmed on-chain.
    Confirmed,
    /// Terminal: a stage or the submission failed.
    Failed,
    /// Terminal: aborted by the caller or a validation failure.
    Aborted,
}

impl TxState {
    /// Stable string identifier for this state, per the external interface.
    #[must_use]
    pub const fn as_external_str(self) -> &'static str {
        match self {
            Self::New => "TX_NEW",
            Self::Classify => "TX_CLASSIFY",
            Self::RiskScore => "TX_RISK_SCORE",
            Self::StrategySelect => "TX_STRATEGY_SELECT",
            Self::Prepare => "TX_PREPARE",
            Self::DryRun => "TX_DRY_RUN",
            Self::SimulatedConfirm => "TX_SIMULATED_CONFIRM",
            Self::SignRequested => "TX_SIGN_REQUESTED",
            Self::Signed => "TX_SIGNED",
            Self::Submit => "TX_SUBMIT",
            Self::Confirmed => "TX_CONFIRMED",
            Self::Failed => "TX_FAILED",
            Self::Aborted => "TX_ABORTED",
        }
    }

    /// Whether this state has no legal successors.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed | Self::Aborted)
    }
}

// ============================================================================
// SECTION: State History
// ============================================================================

/// One append-only entry in a record's state history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateHistoryEntry {
    /// The state entered.
    pub state: TxState,
    /// When the state was entered.
    pub timestamp: Timestamp,
    /// Optional reason, e.g. for aborts and failures.
    pub reason: Option<String>,
}

/// One entry in a record's stage-attempt audit trail, additive to `state_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Name of the pipeline stage attempted.
    pub stage: String,
    /// When the attempt was recorded.
    pub timestamp: Timestamp,
    /// Whether the stage succeeded.
    pub success: bool,
    /// Human-readable outcome summary.
    pub summary: String,
}

// ============================================================================
// SECTION: Transaction Record
// ============================================================================

/// The central per-transaction entity, exclusively owned by the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Schema version of the persisted shape, for forward-compatible hydration.
    pub schema_version: u32,
    /// Stable, globally unique identifier.
    pub id: TxId,
    /// Owning browsing-context identifier.
    pub context_id: ContextId,
    /// Current state; always equal to the last `state_history` entry's state.
    pub state: TxState,
    /// Append-only ordered state history.
    pub state_history: Vec<StateHistoryEntry>,
    /// Append-only ordered stage-attempt audit trail.
    pub audit_trail: Vec<AuditEntry>,
    /// The original payload, immutable after creation.
    pub payload: Payload,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record was last updated.
    pub updated_at: Timestamp,
    /// Classification stage output, once available.
    pub classification: Option<Classification>,
    /// Risk-scoring stage output, once available.
    pub risk_score: Option<RiskScore>,
    /// Strategy-selection stage output, once available.
    pub strategy_selection: Option<StrategySelection>,
    /// Dry-run stage output, once available.
    pub dry_run_result: Option<DryRunResult>,
    /// Signing stage output, once available.
    pub signing_result: Option<SigningResult>,
    /// Submission stage output, once available.
    pub submission_result: Option<SubmissionResult>,
    /// Reason the record was aborted, if it was.
    pub abort_reason: Option<String>,
}

impl TransactionRecord {
    /// Current persisted schema version.
    pub const SCHEMA_VERSION: u32 = 1;

    /// Creates a new record in [`TxState::New`].
    #[must_use]
    pub fn new(id: TxId, context_id: ContextId, payload: Payload, now: Timestamp) -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION,
            id,
            context_id,
            state: TxState::New,
            state_history: vec![StateHistoryEntry {
                state: TxState::New,
                timestamp: now,
                reason: None,
            }],
            audit_trail: Vec::new(),
            payload,
            created_at: now,
            updated_at: now,
            classification: None,
            risk_score: None,
            strategy_selection: None,
            dry_run_result: None,
            signing_result: None,
            submission_result: None,
            abort_reason: None,
        }
    }

    /// Whether the record's current state is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

// ============================================================================
// SECTION: Signing / Submission Results
// ============================================================================

/// Outcome of the wallet-signer collaborator boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningResult {
    /// Whether signing succeeded.
    pub success: bool,
    /// Opaque signature, when successful.
    pub signature: Option<String>,
    /// Failure reason, when unsuccessful.
    pub error: Option<String>,
    /// When the signing attempt completed.
    pub timestamp: Timestamp,
}

/// Outcome of the chain-RPC collaborator boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Whether submission succeeded.
    pub success: bool,
    /// Opaque on-chain transaction signature/hash, when successful.
    pub tx_signature: Option<String>,
    /// Failure reason, when unsuccessful.
    pub error: Option<String>,
    /// When the submission attempt completed.
    pub timestamp: Timestamp,
}
