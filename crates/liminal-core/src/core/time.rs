// liminal-core/src/core/time.rs
// ============================================================================
// Module: Liminal Time Model
// Description: Canonical timestamp representation for state history and logs.
// Purpose: Keep deterministic stages free of direct wall-clock reads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Deterministic stages (classification, risk scoring, strategy selection,
//! dry-run) never read the clock themselves. Timestamps recorded alongside
//! their outputs are supplied by the orchestrator, which is the only place
//! permitted to call [`Timestamp::now`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Unix-epoch-millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Captures the current wall-clock time. The only clock read site in the crate.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_millis());
        #[allow(
            clippy::cast_possible_truncation,
            reason = "wall-clock millis since epoch fits in i64 until the year 292277026596"
        )]
        Self(millis as i64)
    }

    /// Wraps an explicit unix-millis value, e.g. when hydrating from storage.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the unix-epoch-millisecond value.
    #[must_use]
    pub const fn as_unix_millis(&self) -> i64 {
        self.0
    }
}
