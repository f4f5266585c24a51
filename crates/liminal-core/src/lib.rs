// liminal-core/src/lib.rs
// ============================================================================
// Module: Liminal Core
// Description: The backend-agnostic transaction governance engine.
// Purpose: Classify, score, route, simulate, sign-gate, and submit-gate transactions.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! Liminal core implements the transaction decision pipeline: classify a
//! submitted payload, score its risk, select a privacy strategy, simulate it,
//! and gate signing and submission behind a fail-closed execution policy.
//!
//! The crate never performs network I/O, cryptographic signing, or disk
//! access itself; those concerns are injected through the traits in
//! [`interfaces`] so a host application supplies the concrete wallet,
//! chain RPC, private rail, and persistence implementations.

pub mod core;
pub mod interfaces;
pub mod runtime;

pub use core::ApiError;
pub use core::ApiResult;
pub use core::Payload;
pub use core::Receipt;
pub use core::TransactionRecord;
pub use core::TxState;
pub use runtime::PipelineError;
pub use runtime::PipelineOrchestrator;
pub use runtime::RiskContext;
