// liminal-core/src/runtime/state_machine.rs
// ============================================================================
// Module: Liminal State Machine
// Description: Canonical store of transaction records and the transition graph.
// Purpose: Own every mutation to a transaction record and its append-only history.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The state machine is the sole serialization point for transitions: two
//! concurrent callers racing to transition the same record will see exactly
//! one succeed, the other observing [`StateMachineError::InvalidStateTransition`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::ContextId;
use crate::core::Classification;
use crate::core::DryRunResult;
use crate::core::Payload;
use crate::core::RiskScore;
use crate::core::SigningResult;
use crate::core::StateHistoryEntry;
use crate::core::StrategySelection;
use crate::core::SubmissionResult;
use crate::core::Timestamp;
use crate::core::TransactionRecord;
use crate::core::TxId;
use crate::core::TxIdGenerator;
use crate::core::TxState;
use crate::core::state::AuditEntry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateMachineError {
    /// No record exists with the given id.
    #[error("transaction not found: {0}")]
    NotFound(String),
    /// The requested transition is not in the transition table.
    #[error("invalid state transition for {id}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        /// The record id.
        id: String,
        /// The state the record was in.
        from: TxState,
        /// The state transition that was rejected.
        to: TxState,
    },
}

// ============================================================================
// SECTION: Transition Table
// ============================================================================

/// Returns the legal successor states for `from`, per the fixed transition graph.
#[must_use]
pub fn legal_successors(from: TxState) -> &'static [TxState] {
    match from {
        TxState::New => &[TxState::Classify, TxState::Aborted],
        TxState::Classify => &[TxState::RiskScore, TxState::Aborted],
        TxState::RiskScore => &[TxState::StrategySelect, TxState::Aborted],
        TxState::StrategySelect => &[TxState::Prepare, TxState::Aborted],
        TxState::Prepare => &[TxState::DryRun, TxState::Aborted],
        TxState::DryRun => &[TxState::SimulatedConfirm, TxState::Aborted, TxState::Failed],
        TxState::SimulatedConfirm => &[TxState::SignRequested, TxState::Aborted],
        TxState::SignRequested => &[TxState::Signed, TxState::Aborted, TxState::Failed],
        TxState::Signed => &[TxState::Submit, TxState::Aborted],
        TxState::Submit => &[TxState::Confirmed, TxState::Failed, TxState::Aborted],
        TxState::Confirmed | TxState::Failed | TxState::Aborted => &[],
    }
}

/// Whether `to` is a legal successor of `from`. Abort is legal from every
/// non-terminal state, independent of the table above.
#[must_use]
pub fn is_legal_transition(from: TxState, to: TxState) -> bool {
    if to == TxState::Aborted {
        return !from.is_terminal();
    }
    legal_successors(from).contains(&to)
}

// ============================================================================
// SECTION: State Machine
// ============================================================================

/// In-memory canonical store of transaction records.
///
/// Holds a mapping from record id to record, and an auxiliary mapping from
/// context id to an ordered list of record ids for fast per-context
/// enumeration.
#[derive(Debug, Default)]
pub struct StateMachine {
    /// Records keyed by id.
    records: BTreeMap<TxId, TransactionRecord>,
    /// Record ids owned by each context, in creation order.
    by_context: BTreeMap<ContextId, Vec<TxId>>,
    /// Generator for new transaction ids.
    ids: TxIdGenerator,
}

impl StateMachine {
    /// Creates an empty state machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record in [`TxState::New`] and returns a snapshot of it.
    pub fn create(&mut self, context_id: ContextId, payload: Payload) -> TransactionRecord {
        let id = self.ids.issue();
        let record = TransactionRecord::new(id.clone(), context_id.clone(), payload, Timestamp::now());
        self.records.insert(id.clone(), record.clone());
        self.by_context.entry(context_id).or_default().push(id);
        record
    }

    /// Transitions a record to `target`, appending a history entry.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::NotFound`] when `id` is unknown, or
    /// [`StateMachineError::InvalidStateTransition`] when the transition is
    /// not legal from the record's current state.
    pub fn transition_to(
        &mut self,
        id: &TxId,
        target: TxState,
        reason: Option<String>,
    ) -> Result<TransactionRecord, StateMachineError> {
        let record = self.records.get_mut(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        if !is_legal_transition(record.state, target) {
            return Err(StateMachineError::InvalidStateTransition {
                id: id.to_string(),
                from: record.state,
                to: target,
            });
        }
        let now = Timestamp::now();
        record.state = target;
        record.state_history.push(StateHistoryEntry {
            state: target,
            timestamp: now,
            reason: reason.clone(),
        });
        record.updated_at = now;
        if target == TxState::Aborted {
            record.abort_reason = reason;
        }
        Ok(record.clone())
    }

    /// Applies a non-transitioning, non-history-affecting stage output update.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::NotFound`] when `id` is unknown.
    pub fn update_stage_output(
        &mut self,
        id: &TxId,
        update: StageOutputUpdate,
    ) -> Result<TransactionRecord, StateMachineError> {
        let record = self.records.get_mut(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        update.apply(record);
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Appends an audit-trail entry without touching state or history.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::NotFound`] when `id` is unknown.
    pub fn record_audit(&mut self, id: &TxId, entry: AuditEntry) -> Result<(), StateMachineError> {
        let record = self.records.get_mut(id).ok_or_else(|| StateMachineError::NotFound(id.to_string()))?;
        record.audit_trail.push(entry);
        Ok(())
    }

    /// Aborts a record from any non-terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::NotFound`] when `id` is unknown, or
    /// [`StateMachineError::InvalidStateTransition`] when the record is
    /// already terminal.
    pub fn abort(&mut self, id: &TxId, reason: impl Into<String>) -> Result<TransactionRecord, StateMachineError> {
        self.transition_to(id, TxState::Aborted, Some(reason.into()))
    }

    /// Returns a snapshot of a record.
    #[must_use]
    pub fn get_transaction(&self, id: &TxId) -> Option<TransactionRecord> {
        self.records.get(id).cloned()
    }

    /// Returns snapshots of every record owned by a context, in creation order.
    #[must_use]
    pub fn get_context_transactions(&self, context_id: &ContextId) -> Vec<TransactionRecord> {
        self.by_context
            .get(context_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    /// Whether a record is in a terminal state.
    #[must_use]
    pub fn is_terminal(&self, id: &TxId) -> Option<bool> {
        self.records.get(id).map(TransactionRecord::is_terminal)
    }

    /// Removes every record owned by a context.
    pub fn clear_context(&mut self, context_id: &ContextId) {
        if let Some(ids) = self.by_context.remove(context_id) {
            for id in ids {
                self.records.remove(&id);
            }
        }
    }

    /// Replaces the store's contents with a previously persisted record set.
    ///
    /// Each record's `state` must equal the last entry of its `state_history`;
    /// on violation, hydration is rejected wholesale and `Err` carries the
    /// ids that failed the consistency check.
    pub fn hydrate(&mut self, records: Vec<TransactionRecord>) -> Result<(), Vec<TxId>> {
        let mut inconsistent = Vec::new();
        for record in &records {
            let last = record.state_history.last().map(|entry| entry.state);
            if last != Some(record.state) {
                inconsistent.push(record.id.clone());
            }
        }
        if !inconsistent.is_empty() {
            return Err(inconsistent);
        }
        self.records.clear();
        self.by_context.clear();
        for record in records {
            self.by_context.entry(record.context_id.clone()).or_default().push(record.id.clone());
            self.records.insert(record.id.clone(), record);
        }
        Ok(())
    }

    /// Returns a snapshot of every record currently held, for persistence.
    #[must_use]
    pub fn all_records(&self) -> Vec<TransactionRecord> {
        self.records.values().cloned().collect()
    }
}

// ============================================================================
// SECTION: Stage Output Update
// ============================================================================

/// A partial update to a record's per-stage outputs. Never changes `state`
/// or `state_history`.
#[derive(Debug, Clone, Default)]
pub struct StageOutputUpdate {
    /// New classification output, if provided.
    pub classification: Option<Classification>,
    /// New risk score output, if provided.
    pub risk_score: Option<RiskScore>,
    /// New strategy selection output, if provided.
    pub strategy_selection: Option<StrategySelection>,
    /// New dry-run result output, if provided.
    pub dry_run_result: Option<DryRunResult>,
    /// New signing result output, if provided.
    pub signing_result: Option<SigningResult>,
    /// New submission result output, if provided.
    pub submission_result: Option<SubmissionResult>,
}

impl StageOutputUpdate {
    /// Applies every populated field to `record`, leaving unset fields untouched.
    fn apply(self, record: &mut TransactionRecord) {
        if let Some(value) = self.classification {
            record.classification = Some(value);
        }
        if let Some(value) = self.risk_score {
            record.risk_score = Some(value);
        }
        if let Some(value) = self.strategy_selection {
            record.strategy_selection = Some(value);
        }
        if let Some(value) = self.dry_run_result {
            record.dry_run_result = Some(value);
        }
        if let Some(value) = self.signing_result {
            record.signing_result = Some(value);
        }
        if let Some(value) = self.submission_result {
            record.submission_result = Some(value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::StateMachine;
    use super::StateMachineError;
    use crate::core::ContextId;
    use crate::core::Payload;
    use crate::core::TxState;

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
    fn invalid_transition_from_new_is_rejected() {
        let mut sm = StateMachine::new();
        let record = sm.create(ContextId::new("ctx"), payload());
        let err = sm.transition_to(&record.id, TxState::DryRun, None).unwrap_err();
        assert_eq!(
            err,
            StateMachineError::InvalidStateTransition {
                id: record.id.to_string(),
                from: TxState::New,
                to: TxState::DryRun,
            }
        );
    }

    #[test]
    fn abort_is_legal_from_any_non_terminal_state() {
        let mut sm = StateMachine::new();
        let record = sm.create(ContextId::new("ctx"), payload());
        sm.transition_to(&record.id, TxState::Classify, None).unwrap();
        sm.transition_to(&record.id, TxState::RiskScore, None).unwrap();
        let aborted = sm.abort(&record.id, "user cancelled").unwrap();
        assert_eq!(aborted.state, TxState::Aborted);
        assert_eq!(aborted.abort_reason.as_deref(), Some("user cancelled"));
    }

    #[test]
    fn terminal_state_has_no_legal_successors() {
        let mut sm = StateMachine::new();
        let record = sm.create(ContextId::new("ctx"), payload());
        sm.abort(&record.id, "x").unwrap();
        let err = sm.transition_to(&record.id, TxState::Classify, None).unwrap_err();
        assert!(matches!(err, StateMachineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn context_transactions_are_returned_in_creation_order() {
        let mut sm = StateMachine::new();
        let ctx = ContextId::new("ctx");
        let first = sm.create(ctx.clone(), payload());
        let second = sm.create(ctx.clone(), payload());
        let txs = sm.get_context_transactions(&ctx);
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, first.id);
        assert_eq!(txs[1].id, second.id);
    }
}
