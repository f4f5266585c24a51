// liminal-core/src/runtime/risk_scorer.rs
// ============================================================================
// Module: Liminal Risk Scorer
// Description: Deterministic weighted-factor risk assessment.
// Purpose: Map transaction context into a risk level, score, and factor trail.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The score starts from a base of 50 and accumulates signed factor deltas,
//! clamping to `[0, 100]`. Each factor's direction (raises or lowers risk) is
//! fixed; magnitudes are tuned to preserve the documented boundary
//! properties (score < 30 is LOW, (30, 60] is MEDIUM, > 60 is HIGH).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::classification::ClassificationType;
use crate::core::risk::ContextRisk;
use crate::core::risk::RiskFactor;
use crate::core::risk::RiskInput;
use crate::core::risk::RiskLevel;
use crate::core::risk::RiskScore;
use crate::core::time::Timestamp;

/// Base score before any factor is applied.
const BASE_SCORE: i32 = 50;

// ============================================================================
// SECTION: Scorer
// ============================================================================

/// Deterministically scores a transaction's risk from its inputs.
#[must_use]
pub fn score(input: &RiskInput, now: Timestamp) -> RiskScore {
    let mut total = BASE_SCORE;
    let mut factors = Vec::new();

    apply_origin_trust(input, &mut total, &mut factors);
    apply_context_risk(input, &mut total, &mut factors);
    apply_amount(input, &mut total, &mut factors);
    apply_known_destination(input, &mut total, &mut factors);
    apply_instruction_count(input, &mut total, &mut factors);
    apply_tx_type(input, &mut total, &mut factors);

    let clamped = total.clamp(0, 100);
    #[allow(clippy::cast_sign_loss, reason = "clamp(0, 100) guarantees a non-negative value")]
    #[allow(clippy::cast_possible_truncation, reason = "clamp(0, 100) guarantees the value fits in u8")]
    let score = clamped as u8;

    RiskScore {
        level: RiskLevel::from_score(score),
        score,
        factors,
        timestamp: now,
    }
}

/// Lower origin trust raises risk; trust below 30 adds an extra penalty.
fn apply_origin_trust(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    let delta = -(i32::from(input.origin_trust) / 2 - 25);
    *total += delta;
    factors.push(RiskFactor {
        name: "origin_trust".to_string(),
        description: format!("origin trust of {} contributed {delta:+}", input.origin_trust),
        delta,
    });
    if input.origin_trust < 30 {
        let delta = 20;
        *total += delta;
        factors.push(RiskFactor {
            name: "origin_trust_low".to_string(),
            description: "origin trust below 30 adds a high-risk factor".to_string(),
            delta,
        });
    }
}

/// Maps the caller-supplied browsing-context risk directly onto the score.
fn apply_context_risk(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    let delta = match input.context_risk {
        ContextRisk::Low => -15,
        ContextRisk::Medium => 0,
        ContextRisk::High => 20,
    };
    *total += delta;
    factors.push(RiskFactor {
        name: "context_risk".to_string(),
        description: format!("browsing context risk contributed {delta:+}"),
        delta,
    });
}

/// Larger amounts raise risk logarithmically, capped at 30 points.
fn apply_amount(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    if input.estimated_amount <= 0.1 {
        return;
    }
    #[allow(clippy::cast_possible_truncation, reason = "ln of a bounded amount is clamped below")]
    let magnitude = ((input.estimated_amount.ln().max(0.0)) * 6.0) as i32;
    let delta = magnitude.min(30);
    *total += delta;
    factors.push(RiskFactor {
        name: "estimated_amount".to_string(),
        description: format!("estimated amount {} contributed {delta:+}", input.estimated_amount),
        delta,
    });
}

/// A known destination lowers risk.
fn apply_known_destination(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    if input.known_destination {
        let delta = -15;
        *total += delta;
        factors.push(RiskFactor {
            name: "known_destination".to_string(),
            description: "destination is known to the context".to_string(),
            delta,
        });
    }
}

/// More than 5 instructions raises risk; simple transfers rarely need this many.
fn apply_instruction_count(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    if input.instruction_count > 5 {
        let delta = 10;
        *total += delta;
        factors.push(RiskFactor {
            name: "instruction_count".to_string(),
            description: format!("{} instructions exceeds the simple-transaction threshold", input.instruction_count),
            delta,
        });
    }
}

/// Weights risk by classified transaction type; unknown and approval types carry the most.
fn apply_tx_type(input: &RiskInput, total: &mut i32, factors: &mut Vec<RiskFactor>) {
    let delta = match input.tx_type {
        ClassificationType::Unknown => 15,
        ClassificationType::Approval => 10,
        ClassificationType::Transfer => 0,
        ClassificationType::Swap => 5,
        ClassificationType::ProgramInteraction => 5,
    };
    if delta != 0 {
        *total += delta;
        factors.push(RiskFactor {
            name: "tx_type".to_string(),
            description: format!("transaction type contributed {delta:+}"),
            delta,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::score;
    use crate::core::classification::ClassificationType;
    use crate::core::risk::ContextRisk;
    use crate::core::risk::RiskInput;
    use crate::core::risk::RiskLevel;
    use crate::core::time::Timestamp;

    fn input() -> RiskInput {
        RiskInput {
            origin_trust: 90,
            context_risk: ContextRisk::Low,
            tx_type: ClassificationType::Transfer,
            estimated_amount: 0.05,
            known_destination: true,
            instruction_count: 1,
        }
    }

    #[test]
    fn score_is_clamped_to_0_100() {
        let mut high_risk = input();
        high_risk.origin_trust = 0;
        high_risk.context_risk = ContextRisk::High;
        high_risk.estimated_amount = 1_000_000.0;
        high_risk.known_destination = false;
        high_risk.instruction_count = 50;
        high_risk.tx_type = ClassificationType::Unknown;
        let result = score(&high_risk, Timestamp::now());
        assert!(result.score <= 100);
    }

    #[test]
    fn high_trust_low_amount_known_destination_is_low_risk() {
        let result = score(&input(), Timestamp::now());
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn score_is_deterministic() {
        let now = Timestamp::now();
        let a = score(&input(), now);
        let b = score(&input(), now);
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
    }

    #[test]
    fn boundary_29_is_low_and_30_is_medium() {
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(61), RiskLevel::High);
    }
}
