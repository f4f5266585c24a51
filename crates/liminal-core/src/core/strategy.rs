// liminal-core/src/core/strategy.rs
// ============================================================================
// Module: Liminal Strategy
// Description: Privacy strategy catalog and selection output.
// Purpose: Describe the four fixed privacy/cost tradeoff modes and a choice among them.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Strategies are a fixed, closed table (see `runtime::strategy_selector`).
//! This module only holds the catalog and the selector's output shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Strategy
// ============================================================================

/// One of the four fixed privacy/cost tradeoff modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// No privacy measures; direct submission.
    S0Normal,
    /// RPC-level privacy only.
    S1RpcPrivacy,
    /// Ephemeral sender address.
    S2EphemeralSender,
    /// Routed through the private rail; requires a ready rail adapter.
    S3PrivacyRail,
}

/// Relative cost impact of adopting a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostImpact {
    /// No added cost.
    None,
    /// Small added cost.
    Low,
    /// Moderate added cost.
    Medium,
    /// Significant added cost.
    High,
}

/// Fixed profile of a strategy: its privacy level and cost impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyProfile {
    /// The strategy this profile describes.
    pub strategy: Strategy,
    /// Privacy level in `[0, 100]`.
    pub privacy_level: u8,
    /// Relative cost impact.
    pub cost_impact: CostImpact,
}

/// Fixed strategy catalog in selection-priority order (`S0 > S1 > S2 > S3`).
pub const STRATEGY_CATALOG: [StrategyProfile; 4] = [
    StrategyProfile {
        strategy: Strategy::S0Normal,
        privacy_level: 10,
        cost_impact: CostImpact::None,
    },
    StrategyProfile {
        strategy: Strategy::S1RpcPrivacy,
        privacy_level: 40,
        cost_impact: CostImpact::Low,
    },
    StrategyProfile {
        strategy: Strategy::S2EphemeralSender,
        privacy_level: 70,
        cost_impact: CostImpact::Medium,
    },
    StrategyProfile {
        strategy: Strategy::S3PrivacyRail,
        privacy_level: 95,
        cost_impact: CostImpact::High,
    },
];

impl Strategy {
    /// Returns this strategy's fixed profile.
    #[must_use]
    pub fn profile(self) -> StrategyProfile {
        STRATEGY_CATALOG
            .into_iter()
            .find(|profile| profile.strategy == self)
            .unwrap_or(STRATEGY_CATALOG[0])
    }

    /// Stable external string form, matching the `snake_case` serde rendering.
    #[must_use]
    pub const fn as_external_str(self) -> &'static str {
        match self {
            Self::S0Normal => "s0_normal",
            Self::S1RpcPrivacy => "s1_rpc_privacy",
            Self::S2EphemeralSender => "s2_ephemeral_sender",
            Self::S3PrivacyRail => "s3_privacy_rail",
        }
    }

    /// Short human-readable description used in rationale strings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::S0Normal => "direct submission with no added privacy measures",
            Self::S1RpcPrivacy => "RPC-level privacy via a trusted relay endpoint",
            Self::S2EphemeralSender => "an ephemeral sender address to break linkability",
            Self::S3PrivacyRail => "the maximum-privacy private rail",
        }
    }
}

// ============================================================================
// SECTION: Strategy Selection
// ============================================================================

/// One alternative considered but not chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAlternative {
    /// The alternative strategy.
    pub strategy: Strategy,
    /// Why it was not chosen.
    pub reason: String,
}

/// Output of the strategy selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySelection {
    /// The chosen strategy.
    pub strategy: Strategy,
    /// Confidence in `[0, 0.95]`.
    pub confidence: f64,
    /// Composed rationale string.
    pub rationale: String,
    /// Ordered alternatives, highest-scoring first.
    pub alternatives: Vec<StrategyAlternative>,
    /// Privacy level of the chosen strategy, in `[0, 100]`.
    pub privacy_level: u8,
    /// Cost impact of the chosen strategy.
    pub cost_impact: CostImpact,
}
