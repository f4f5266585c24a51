// liminal-core/src/interfaces/mod.rs
// ============================================================================
// Module: Liminal Interfaces
// Description: Backend-agnostic traits for the core's external collaborators.
// Purpose: Define the narrow contract surfaces the pipeline calls into.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The core never opens a network socket, signs, or submits to a chain
//! itself. It consumes these concerns through the traits below, each paired
//! with a typed error. Implementations must be deterministic where the
//! calling stage requires determinism and must fail closed on ambiguous
//! input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::payload::Payload;
use crate::core::rail::RailCapabilities;
use crate::core::rail::RailStatus;
use crate::core::rail::RailUnavailableResult;
use crate::core::state::SigningResult;
use crate::core::state::SubmissionResult;
use crate::core::state::TransactionRecord;

// ============================================================================
// SECTION: Private Rail Adapter
// ============================================================================

/// Errors raised by a private-rail adapter.
#[derive(Debug, Error)]
pub enum RailError {
    /// The adapter reported an internal error.
    #[error("private rail adapter error: {0}")]
    Adapter(String),
}

/// Result of attempting to prepare a payload for the private rail.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareResult {
    /// The rail accepted the payload and produced an opaque handle.
    Prepared {
        /// Opaque rail-specific handle.
        handle: String,
    },
    /// The rail is not ready; see the unavailable result for why.
    Unavailable(RailUnavailableResult),
}

/// Result of estimating a payload's cost on the private rail.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateResult {
    /// Estimated fee in native chain units.
    Estimated {
        /// Estimated fee.
        fee: f64,
    },
    /// The rail is not ready; see the unavailable result for why.
    Unavailable(RailUnavailableResult),
}

/// Result of validating a payload against the private rail's constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The payload is valid for submission through the rail.
    Valid,
    /// The rail is not ready; see the unavailable result for why.
    Unavailable(RailUnavailableResult),
}

/// Capability and status interface for a privacy-preserving submission rail.
pub trait PrivateRailAdapter {
    /// Returns the rail's fixed capability flags and bounds.
    fn get_capabilities(&self) -> RailCapabilities;

    /// Returns the rail's current readiness status.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] when the status cannot be determined.
    fn get_status(&self) -> Result<RailStatus, RailError>;

    /// Convenience wrapper: whether [`Self::get_status`] currently returns `Ready`.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] when the status cannot be determined.
    fn is_available(&self) -> Result<bool, RailError> {
        Ok(self.get_status()?.is_ready())
    }

    /// Prepares a payload for submission through the rail.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] on an adapter-internal failure.
    fn prepare(&self, payload: &Payload) -> Result<PrepareResult, RailError>;

    /// Estimates the cost of routing a payload through the rail.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] on an adapter-internal failure.
    fn estimate(&self, payload: &Payload) -> Result<EstimateResult, RailError>;

    /// Validates a payload against the rail's constraints.
    ///
    /// # Errors
    ///
    /// Returns [`RailError`] on an adapter-internal failure.
    fn validate(&self, payload: &Payload) -> Result<ValidationResult, RailError>;
}

// ============================================================================
// SECTION: Wallet Signer
// ============================================================================

/// Errors raised by the wallet-signer collaborator.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The signer reported an internal error.
    #[error("wallet signer error: {0}")]
    Signer(String),
}

/// External wallet/signer collaborator, crossed only at `SIGN_REQUESTED`.
pub trait WalletSigner {
    /// Signs the prepared transaction, crossing the collaborator boundary.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError`] when the signer cannot be reached or refuses.
    fn sign(&self, record: &TransactionRecord) -> Result<SigningResult, SignerError>;
}

// ============================================================================
// SECTION: Chain RPC
// ============================================================================

/// Errors raised by the chain-RPC collaborator.
#[derive(Debug, Error)]
pub enum ChainRpcError {
    /// The RPC endpoint pool reported an internal error.
    #[error("chain rpc error: {0}")]
    Rpc(String),
}

/// External chain-RPC collaborator, crossed only at `SUBMIT`.
pub trait ChainRpc {
    /// Submits a signed transaction, crossing the collaborator boundary.
    ///
    /// # Errors
    ///
    /// Returns [`ChainRpcError`] when the endpoint cannot be reached.
    fn submit(&self, record: &TransactionRecord) -> Result<SubmissionResult, ChainRpcError>;
}

// ============================================================================
// SECTION: Snapshot Store
// ============================================================================

/// Errors raised by the persistence collaborator.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// An I/O error occurred while reading or writing the snapshot.
    #[error("snapshot store io error: {0}")]
    Io(String),
    /// The snapshot file failed to parse.
    #[error("snapshot store invalid data: {0}")]
    Invalid(String),
    /// The snapshot's envelope `schema_version` is newer than this build understands.
    #[error("snapshot schema version {found} is incompatible with the {expected} this build supports")]
    VersionMismatch {
        /// Version recorded in the snapshot envelope.
        found: u32,
        /// Version this build supports.
        expected: u32,
    },
}

/// Durable snapshot persistence for the full set of transaction records.
pub trait SnapshotStore {
    /// Loads the persisted record set, or `None` if no snapshot exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be read or parsed.
    fn load(&self) -> Result<Option<Vec<TransactionRecord>>, SnapshotStoreError>;

    /// Atomically persists the full record set.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError`] when the snapshot cannot be written.
    fn save(&self, records: &[TransactionRecord]) -> Result<(), SnapshotStoreError>;
}
