// liminal-core/src/core/mod.rs
// ============================================================================
// Module: Liminal Core Types
// Description: Plain, serializable data shapes shared across the crate.
// Purpose: Re-export the transaction record, payload, and stage output types.
// Dependencies: serde
// ============================================================================

pub mod api;
pub mod classification;
pub mod dry_run;
pub mod identifiers;
pub mod invariant;
pub mod payload;
pub mod rail;
pub mod receipt;
pub mod risk;
pub mod state;
pub mod strategy;
pub mod time;

pub use api::ApiError;
pub use api::ApiResult;
pub use api::ErrorCode;
pub use classification::Classification;
pub use classification::ClassificationType;
pub use dry_run::DryRunResult;
pub use identifiers::ContextId;
pub use identifiers::TxId;
pub use identifiers::TxIdGenerator;
pub use invariant::InvariantId;
pub use invariant::InvariantViolation;
pub use invariant::Severity;
pub use payload::MetadataValue;
pub use payload::Payload;
pub use rail::RailCapabilities;
pub use rail::RailStatus;
pub use rail::RailUnavailableResult;
pub use receipt::Receipt;
pub use risk::ContextRisk;
pub use risk::RiskFactor;
pub use risk::RiskInput;
pub use risk::RiskLevel;
pub use risk::RiskScore;
pub use state::AuditEntry;
pub use state::SigningResult;
pub use state::StateHistoryEntry;
pub use state::SubmissionResult;
pub use state::TransactionRecord;
pub use state::TxState;
pub use strategy::CostImpact;
pub use strategy::STRATEGY_CATALOG;
pub use strategy::Strategy;
pub use strategy::StrategyAlternative;
pub use strategy::StrategyProfile;
pub use strategy::StrategySelection;
pub use time::Timestamp;
