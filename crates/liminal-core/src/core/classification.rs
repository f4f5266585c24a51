// liminal-core/src/core/classification.rs
// ============================================================================
// Module: Liminal Classification
// Description: Deterministic transaction type labeling output.
// Purpose: Carry the classifier's verdict alongside its supporting metadata.
// Dependencies: serde, crate::core::payload
// ============================================================================

//! ## Overview
//! A classification is a pure, deterministic function of a payload (see
//! `runtime::classifier`). This module only holds the output shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::payload::MetadataValue;

// ============================================================================
// SECTION: Classification Type
// ============================================================================

/// Deterministic transaction type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationType {
    /// A simple token or native-asset transfer.
    Transfer,
    /// A swap between two assets.
    Swap,
    /// A token approval or delegation.
    Approval,
    /// A generic program interaction not matching a more specific rule.
    ProgramInteraction,
    /// No rule matched with confidence.
    Unknown,
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Output of the deterministic classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The matched transaction type.
    pub tx_type: ClassificationType,
    /// Deterministic confidence in `[0, 1]`, looked up by matched rule.
    pub confidence: f64,
    /// Human-readable description of the match.
    pub description: String,
    /// Closed-variant metadata extracted while matching.
    pub metadata: BTreeMap<String, MetadataValue>,
}
