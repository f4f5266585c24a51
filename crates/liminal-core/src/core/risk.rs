// liminal-core/src/core/risk.rs
// ============================================================================
// Module: Liminal Risk Score
// Description: Output shape of the deterministic risk scorer.
// Purpose: Carry a risk level, numeric score, and contributing factors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Risk scores are a deterministic, weighted function of scorer inputs (see
//! `runtime::risk_scorer`). This module only holds the output and input
//! shapes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::classification::ClassificationType;

// ============================================================================
// SECTION: Context Risk
// ============================================================================

/// Caller-supplied risk assessment of the browsing context itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRisk {
    /// Context is considered low risk.
    Low,
    /// Context is considered average risk.
    Medium,
    /// Context is considered high risk.
    High,
}

// ============================================================================
// SECTION: Risk Level
// ============================================================================

/// Risk level bucket derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score below 30.
    Low,
    /// Score in `[30, 60]`.
    Medium,
    /// Score above 60.
    High,
}

impl RiskLevel {
    /// Buckets a clamped `[0, 100]` score into a level per the fixed thresholds.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Self::Low,
            30..=60 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Stable external string form, matching the `snake_case` serde rendering.
    #[must_use]
    pub const fn as_external_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// ============================================================================
// SECTION: Risk Scorer Input
// ============================================================================

/// Inputs consumed by the deterministic risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    /// Trust level of the requesting origin, in `[0, 100]`.
    pub origin_trust: u8,
    /// Risk level of the browsing context.
    pub context_risk: ContextRisk,
    /// Classified transaction type.
    pub tx_type: ClassificationType,
    /// Estimated amount in native chain units.
    pub estimated_amount: f64,
    /// Whether the destination account is known/familiar.
    pub known_destination: bool,
    /// Number of instructions in the transaction.
    pub instruction_count: u32,
}

// ============================================================================
// SECTION: Risk Factor / Score
// ============================================================================

/// A single named, signed contribution to the risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Short factor name.
    pub name: String,
    /// Human-readable description of why the factor applied.
    pub description: String,
    /// Signed delta this factor contributed to the base score.
    pub delta: i32,
}

/// Deterministic risk assessment of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Bucketed risk level.
    pub level: RiskLevel,
    /// Clamped numeric score in `[0, 100]`.
    pub score: u8,
    /// Ordered list of contributing factors.
    pub factors: Vec<RiskFactor>,
    /// When the score was computed.
    pub timestamp: crate::core::time::Timestamp,
}
