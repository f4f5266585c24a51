// liminal-core/src/core/identifiers.rs
// ============================================================================
// Module: Liminal Identifiers
// Description: Opaque identifiers for transaction records and browsing contexts.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde, rand
// ============================================================================

//! ## Overview
//! Identifiers are opaque and serialize as plain strings. Transaction ids are
//! boot-scoped: a random seed drawn once per process plus a monotonic counter,
//! so derivation never leaks wall-clock time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Opaque transaction record identifier, prefixed `tx_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Wraps an existing string as a transaction id, e.g. when hydrating from storage.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TxId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TxId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Browsing-context identifier that owns a set of transaction records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(String);

impl ContextId {
    /// Wraps an existing string as a context id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ContextId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContextId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Transaction Id Generator
// ============================================================================

/// Boot-scoped generator for monotonically unique, non-time-derived transaction ids.
#[derive(Debug)]
pub struct TxIdGenerator {
    /// Random seed drawn once at construction for entropy.
    boot_id: u64,
    /// Monotonic counter for ids issued in this process.
    counter: AtomicU64,
}

impl Default for TxIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TxIdGenerator {
    /// Creates a new generator, seeding its entropy from the OS RNG.
    #[must_use]
    pub fn new() -> Self {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        Self {
            boot_id: u64::from_be_bytes(bytes),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues the next transaction id.
    #[must_use]
    pub fn issue(&self) -> TxId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        TxId::new(format!("tx_{:016x}{:016x}", self.boot_id, seq))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::TxIdGenerator;

    #[test]
    fn issued_ids_are_unique_and_monotonic_in_sequence() {
        let gen = TxIdGenerator::new();
        let first = gen.issue();
        let second = gen.issue();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("tx_"));
    }
}
