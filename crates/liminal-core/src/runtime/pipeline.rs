// liminal-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Liminal Pipeline Orchestrator
// Description: Composition root wiring the state machine to its collaborators.
// Purpose: Drive a record through classify -> risk -> strategy -> dry-run -> sign -> submit.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! `PipelineOrchestrator` is generic over its four collaborators so a caller
//! can supply concrete implementations (a wired-up signer and chain RPC) or
//! test doubles without the orchestrator knowing the difference. Every
//! collaborator boundary crossing is wrapped with a typed error; nothing
//! panics on a collaborator failure.
//!
//! `run_dry_run_pipeline` is restart-safe: it drives from whatever state the
//! record is currently in rather than assuming it starts at `NEW`, so a
//! process that crashed mid-pipeline and reloaded from a snapshot resumes at
//! the next pending stage instead of repeating completed ones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ApiError;
use crate::core::classification::Classification;
use crate::core::identifiers::ContextId;
use crate::core::identifiers::TxId;
use crate::core::invariant::InvariantId;
use crate::core::invariant::InvariantViolation;
use crate::core::payload::Payload;
use crate::core::rail::RailCapabilities;
use crate::core::rail::RailStatus;
use crate::core::receipt::Receipt;
use crate::core::risk::ContextRisk;
use crate::core::risk::RiskInput;
use crate::core::state::TransactionRecord;
use crate::core::state::TxState;
use crate::core::time::Timestamp;
use crate::interfaces::ChainRpc;
use crate::interfaces::ChainRpcError;
use crate::interfaces::PrivateRailAdapter;
use crate::interfaces::RailError;
use crate::interfaces::SignerError;
use crate::interfaces::WalletSigner;
use crate::runtime::classifier;
use crate::runtime::dry_run::DryRunError;
use crate::runtime::dry_run::dry_run;
use crate::runtime::policy::ExecutionPolicy;
use crate::runtime::risk_scorer;
use crate::runtime::state_machine::StageOutputUpdate;
use crate::runtime::state_machine::StateMachine;
use crate::runtime::state_machine::StateMachineError;
use crate::runtime::strategy_selector::select_strategy;
use crate::runtime::submission_gate::SubmissionGate;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while driving a record through the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The state machine rejected an operation.
    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
    /// The private rail adapter failed.
    #[error(transparent)]
    Rail(#[from] RailError),
    /// The wallet signer failed.
    #[error(transparent)]
    Signer(#[from] SignerError),
    /// The chain RPC collaborator failed.
    #[error(transparent)]
    Rpc(#[from] ChainRpcError),
    /// Submission was attempted while blocked by the submission gate.
    #[error("submission blocked: {message}")]
    SubmissionBlocked {
        /// Every violation the gate found, in evaluation order.
        violations: Vec<InvariantViolation>,
        /// Human-readable, semicolon-joined rendering of `violations`.
        message: String,
    },
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::SubmissionBlocked { violations, message } => {
                let invariant_id = violations.first().map_or(InvariantId::NoSubmissionWithoutSigning, |violation| violation.invariant_id);
                Self::invariant_violation(invariant_id, message)
            }
            other => Self::unknown(other.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Risk Context
// ============================================================================

/// Caller-supplied context that the risk scorer needs beyond the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskContext {
    /// Trust level of the requesting origin, in `[0, 100]`.
    pub origin_trust: u8,
    /// Risk level of the browsing context.
    pub context_risk: ContextRisk,
    /// Whether the destination account is known/familiar.
    pub known_destination: bool,
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Drives transaction records through the full pipeline.
pub struct PipelineOrchestrator<Rail, Signer, Rpc, Store>
where
    Rail: PrivateRailAdapter,
    Signer: WalletSigner,
    Rpc: ChainRpc,
    Store: crate::interfaces::SnapshotStore,
{
    /// Canonical store of transaction records.
    state_machine: StateMachine,
    /// Private-rail collaborator consulted by strategy selection.
    rail: Rail,
    /// Wallet-signer collaborator crossed at `SIGN_REQUESTED`.
    signer: Signer,
    /// Chain-RPC collaborator crossed at `SUBMIT`.
    rpc: Rpc,
    /// Durable snapshot store persisted after every mutation.
    store: Store,
    /// Execution policy consulted by the submission gate.
    policy: ExecutionPolicy,
}

impl<Rail, Signer, Rpc, Store> PipelineOrchestrator<Rail, Signer, Rpc, Store>
where
    Rail: PrivateRailAdapter,
    Signer: WalletSigner,
    Rpc: ChainRpc,
    Store: crate::interfaces::SnapshotStore,
{
    /// Builds a fresh orchestrator, hydrating from the store if a snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the store's snapshot fails to load or is
    /// internally inconsistent.
    pub fn new(rail: Rail, signer: Signer, rpc: Rpc, store: Store, policy: ExecutionPolicy) -> Result<Self, PipelineError> {
        let mut state_machine = StateMachine::new();
        if let Ok(Some(records)) = store.load() {
            let _ = state_machine.hydrate(records);
        }
        Ok(Self {
            state_machine,
            rail,
            signer,
            rpc,
            store,
            policy,
        })
    }

    /// Creates a new transaction record in `NEW` and persists the updated set.
    pub fn create_transaction(&mut self, context_id: ContextId, payload: Payload) -> TransactionRecord {
        let record = self.state_machine.create(context_id, payload);
        self.persist();
        record
    }

    /// Drives the record from its current state through to `SIMULATED_CONFIRM`
    /// (success) or `FAILED`/`ABORTED` (failure), skipping stages already
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] on a state-machine or rail-adapter failure.
    pub fn run_dry_run_pipeline(&mut self, id: &TxId, risk_context: &RiskContext) -> Result<TransactionRecord, PipelineError> {
        loop {
            let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
            if record.is_terminal() {
                return Ok(record);
            }
            match record.state {
                TxState::New => self.run_classify_stage(id)?,
                TxState::Classify => self.run_risk_score_stage(id, risk_context)?,
                TxState::RiskScore => self.run_strategy_select_stage(id)?,
                TxState::StrategySelect => self.run_prepare_stage(id)?,
                TxState::Prepare => {
                    self.run_dry_run_stage(id)?;
                    let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
                    return Ok(record);
                }
                TxState::DryRun | TxState::SimulatedConfirm | TxState::SignRequested | TxState::Signed | TxState::Submit => {
                    return Ok(record);
                }
                TxState::Confirmed | TxState::Failed | TxState::Aborted => return Ok(record),
            }
        }
    }

    /// Runs classification and transitions `NEW` -> `CLASSIFY`.
    fn run_classify_stage(&mut self, id: &TxId) -> Result<(), PipelineError> {
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let classification = classifier::classify(&record.payload);
        self.state_machine.transition_to(id, TxState::Classify, None)?;
        self.state_machine.update_stage_output(
            id,
            StageOutputUpdate {
                classification: Some(classification),
                ..StageOutputUpdate::default()
            },
        )?;
        self.record_audit(id, "classify", true, "classification complete");
        self.persist();
        Ok(())
    }

    /// Runs risk scoring and transitions `CLASSIFY` -> `RISK_SCORE`.
    fn run_risk_score_stage(&mut self, id: &TxId, risk_context: &RiskContext) -> Result<(), PipelineError> {
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let Some(classification) = record.classification.clone() else {
            return Err(PipelineError::StateMachine(StateMachineError::NotFound(id.to_string())));
        };
        let input = RiskInput {
            origin_trust: risk_context.origin_trust,
            context_risk: risk_context.context_risk,
            tx_type: classification.tx_type,
            estimated_amount: record.payload.estimated_amount,
            known_destination: risk_context.known_destination,
            instruction_count: record.payload.instruction_count,
        };
        let risk_score = risk_scorer::score(&input, Timestamp::now());
        self.state_machine.transition_to(id, TxState::RiskScore, None)?;
        self.state_machine.update_stage_output(
            id,
            StageOutputUpdate {
                risk_score: Some(risk_score),
                ..StageOutputUpdate::default()
            },
        )?;
        self.record_audit(id, "risk_score", true, "risk scoring complete");
        self.persist();
        Ok(())
    }

    /// Runs strategy selection and transitions `RISK_SCORE` -> `STRATEGY_SELECT`.
    fn run_strategy_select_stage(&mut self, id: &TxId) -> Result<(), PipelineError> {
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let Some(risk_score) = record.risk_score.clone() else {
            return Err(PipelineError::StateMachine(StateMachineError::NotFound(id.to_string())));
        };
        let selection = select_strategy(&risk_score, &self.rail)?;
        self.state_machine.transition_to(id, TxState::StrategySelect, None)?;
        self.state_machine.update_stage_output(
            id,
            StageOutputUpdate {
                strategy_selection: Some(selection),
                ..StageOutputUpdate::default()
            },
        )?;
        self.record_audit(id, "strategy_select", true, "strategy selection complete");
        self.persist();
        Ok(())
    }

    /// Transitions `STRATEGY_SELECT` -> `PREPARE`.
    fn run_prepare_stage(&mut self, id: &TxId) -> Result<(), PipelineError> {
        self.state_machine.transition_to(id, TxState::Prepare, None)?;
        self.record_audit(id, "prepare", true, "prepared for dry-run");
        self.persist();
        Ok(())
    }

    /// Runs the dry-run simulation and transitions `PREPARE` -> `DRY_RUN` ->
    /// `SIMULATED_CONFIRM` on success or `FAILED` on validation failure.
    fn run_dry_run_stage(&mut self, id: &TxId) -> Result<(), PipelineError> {
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let Some(selection) = record.strategy_selection.clone() else {
            return Err(PipelineError::StateMachine(StateMachineError::NotFound(id.to_string())));
        };
        self.state_machine.transition_to(id, TxState::DryRun, None)?;
        match dry_run(id, &record.payload, selection.strategy, Timestamp::now()) {
            Ok(result) => {
                self.state_machine.update_stage_output(
                    id,
                    StageOutputUpdate {
                        dry_run_result: Some(result),
                        ..StageOutputUpdate::default()
                    },
                )?;
                self.state_machine.transition_to(id, TxState::SimulatedConfirm, None)?;
                self.record_audit(id, "dry_run", true, "dry-run succeeded");
            }
            Err(error) => {
                let reason = dry_run_failure_reason(&error);
                self.state_machine.abort(id, reason.clone())?;
                self.record_audit(id, "dry_run", false, reason);
            }
        }
        self.persist();
        Ok(())
    }

    /// Requests a signature for a record in `SIMULATED_CONFIRM`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] on a state-machine or signer failure.
    pub fn sign_transaction(&mut self, id: &TxId) -> Result<TransactionRecord, PipelineError> {
        self.state_machine.transition_to(id, TxState::SignRequested, None)?;
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let signing_result = self.signer.sign(&record)?;
        let success = signing_result.success;
        self.state_machine.update_stage_output(
            id,
            StageOutputUpdate {
                signing_result: Some(signing_result),
                ..StageOutputUpdate::default()
            },
        )?;
        let target = if success { TxState::Signed } else { TxState::Failed };
        let reason = if success { None } else { Some("signing failed".to_string()) };
        let record = self.state_machine.transition_to(id, target, reason)?;
        self.record_audit(id, "sign", success, if success { "signed" } else { "signing failed" });
        self.persist();
        Ok(record)
    }

    /// Submits a record in `SIGNED`, subject to the submission gate.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::SubmissionBlocked`] when the gate denies the
    /// attempt, or [`PipelineError`] on a state-machine or RPC failure.
    pub fn submit_transaction(&mut self, id: &TxId) -> Result<TransactionRecord, PipelineError> {
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let gate = SubmissionGate::new(self.policy);
        let decision = gate.check(&record);
        if !decision.allowed {
            let message = decision.violations.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join("; ");
            tracing::warn!(tx_id = %id, violations = %message, "submission blocked by gate");
            return Err(PipelineError::SubmissionBlocked {
                violations: decision.violations,
                message,
            });
        }

        self.state_machine.transition_to(id, TxState::Submit, None)?;
        let record = self.state_machine.get_transaction(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        let submission_result = self.rpc.submit(&record)?;
        let success = submission_result.success;
        self.state_machine.update_stage_output(
            id,
            StageOutputUpdate {
                submission_result: Some(submission_result),
                ..StageOutputUpdate::default()
            },
        )?;
        let target = if success { TxState::Confirmed } else { TxState::Failed };
        let reason = if success { None } else { Some("submission failed".to_string()) };
        let record = self.state_machine.transition_to(id, target, reason)?;
        self.record_audit(id, "submit", success, if success { "submitted" } else { "submission failed" });
        self.persist();
        Ok(record)
    }

    /// Aborts a record from any non-terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the record cannot be found or is already terminal.
    pub fn abort_transaction(&mut self, id: &TxId, reason: impl Into<String>) -> Result<TransactionRecord, PipelineError> {
        let record = self.state_machine.abort(id, reason)?;
        self.record_audit(id, "abort", true, "aborted");
        self.persist();
        Ok(record)
    }

    /// Builds the public receipt projection of a record.
    #[must_use]
    pub fn get_receipt_data(&self, id: &TxId) -> Option<Receipt> {
        let record = self.state_machine.get_transaction(id)?;
        let status = self.rail.get_status().unwrap_or(RailStatus::NotAvailable);
        Some(crate::runtime::receipt::build_receipt(record, status))
    }

    /// Returns a snapshot of a record.
    #[must_use]
    pub fn get_transaction(&self, id: &TxId) -> Option<TransactionRecord> {
        self.state_machine.get_transaction(id)
    }

    /// Returns every record owned by a context, in creation order.
    #[must_use]
    pub fn get_context_transactions(&self, context_id: &ContextId) -> Vec<TransactionRecord> {
        self.state_machine.get_context_transactions(context_id)
    }

    /// Clears every record owned by a context and persists the result.
    pub fn clear_context(&mut self, context_id: &ContextId) {
        self.state_machine.clear_context(context_id);
        self.persist();
    }

    /// Returns the private rail's current capabilities and status.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] when the rail cannot report its status.
    pub fn get_private_rail_info(&self) -> Result<(RailCapabilities, RailStatus), RailError> {
        Ok((self.rail.get_capabilities(), self.rail.get_status()?))
    }

    /// Appends an audit-trail entry, silently ignoring an unknown id, and
    /// emits a tracing span keyed by transaction id for the same transition.
    fn record_audit(&mut self, id: &TxId, stage: &str, success: bool, summary: impl Into<String>) {
        let summary = summary.into();
        if success {
            tracing::info!(tx_id = %id, stage, "{summary}");
        } else {
            tracing::warn!(tx_id = %id, stage, "{summary}");
        }
        let _ = self.state_machine.record_audit(
            id,
            crate::core::state::AuditEntry {
                stage: stage.to_string(),
                timestamp: Timestamp::now(),
                success,
                summary,
            },
        );
    }

    /// Persists the full record set, silently ignoring a store failure.
    fn persist(&mut self) {
        let records = self.state_machine.all_records();
        let _ = self.store.save(&records);
    }
}

/// Builds the human-readable failure reason for a dry-run error.
fn dry_run_failure_reason(error: &DryRunError) -> String {
    format!("dry-run failed: {error}")
}
