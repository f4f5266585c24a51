// liminal-core/src/runtime/strategy_selector.rs
// ============================================================================
// Module: Liminal Strategy Selector
// Description: Chooses a privacy strategy from the fixed catalog.
// Purpose: Balance the risk score's implied privacy need against strategy cost.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `S3PrivacyRail` is hard-gated: it is only a candidate when the supplied
//! [`PrivateRailAdapter`] reports [`RailStatus::Ready`]. Ties in score are
//! broken by catalog order, `S0 > S1 > S2 > S3`, by construction: candidates
//! are scored in that order and a later candidate must strictly exceed the
//! running best to replace it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::rail::RailStatus;
use crate::core::risk::RiskLevel;
use crate::core::risk::RiskScore;
use crate::core::strategy::CostImpact;
use crate::core::strategy::STRATEGY_CATALOG;
use crate::core::strategy::Strategy;
use crate::core::strategy::StrategyAlternative;
use crate::core::strategy::StrategyProfile;
use crate::core::strategy::StrategySelection;
use crate::interfaces::PrivateRailAdapter;
use crate::interfaces::RailError;

// ============================================================================
// SECTION: Selector
// ============================================================================

/// Selects a strategy given a risk score and the private rail's current status.
///
/// # Errors
///
/// Returns [`RailError`] when the rail adapter cannot report its status.
pub fn select_strategy(risk: &RiskScore, rail: &dyn PrivateRailAdapter) -> Result<StrategySelection, RailError> {
    let rail_status = rail.get_status()?;
    let desired_privacy = desired_privacy_for(risk.level);

    let mut scored: Vec<(StrategyProfile, i32)> = Vec::with_capacity(STRATEGY_CATALOG.len());
    let mut gated: Vec<StrategyAlternative> = Vec::new();

    for profile in STRATEGY_CATALOG {
        if profile.strategy == Strategy::S3PrivacyRail && rail_status != RailStatus::Ready {
            gated.push(StrategyAlternative {
                strategy: profile.strategy,
                reason: format!("private rail is {}", gated_status_phrase(rail_status)),
            });
            continue;
        }
        scored.push((profile, candidate_score(profile, desired_privacy)));
    }

    let mut best_index = 0;
    for (index, (_, candidate_score)) in scored.iter().enumerate().skip(1) {
        if *candidate_score > scored[best_index].1 {
            best_index = index;
        }
    }
    let (chosen_profile, best_score) = scored[best_index];

    let second_best = scored
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != best_index)
        .map(|(_, (_, candidate_score))| *candidate_score)
        .max()
        .unwrap_or(0);

    let confidence = (0.5 + f64::from(best_score - second_best) / 100.0).min(0.95).max(0.5);

    let mut alternatives: Vec<StrategyAlternative> = scored
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != best_index)
        .map(|(_, (profile, candidate_score))| StrategyAlternative {
            strategy: profile.strategy,
            reason: format!("scored {candidate_score} against chosen score {best_score}"),
        })
        .collect();
    alternatives.extend(gated);

    let rationale = format!(
        "chose {} ({}) for {} risk: {}",
        chosen_profile.strategy.as_external_str(),
        chosen_profile.strategy.description(),
        risk.level.as_external_str(),
        rationale_detail(risk.level, rail_status)
    );

    Ok(StrategySelection {
        strategy: chosen_profile.strategy,
        confidence,
        rationale,
        alternatives,
        privacy_level: chosen_profile.privacy_level,
        cost_impact: chosen_profile.cost_impact,
    })
}

/// Maps a risk level to the privacy level a strategy should aim to provide.
const fn desired_privacy_for(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::Low => 15,
        RiskLevel::Medium => 50,
        RiskLevel::High => 85,
    }
}

/// Scores a candidate as closeness to the desired privacy level minus cost penalty.
fn candidate_score(profile: StrategyProfile, desired_privacy: u8) -> i32 {
    let distance = i32::from(profile.privacy_level).abs_diff(i32::from(desired_privacy));
    #[allow(clippy::cast_possible_wrap, reason = "distance is bounded by u8 range and fits in i32")]
    let distance = distance as i32;
    100 - distance - cost_penalty(profile.cost_impact)
}

/// Fixed cost penalty subtracted from a candidate's closeness score.
const fn cost_penalty(cost_impact: CostImpact) -> i32 {
    match cost_impact {
        CostImpact::None => 0,
        CostImpact::Low => 5,
        CostImpact::Medium => 10,
        CostImpact::High => 15,
    }
}

/// Builds the human-readable detail clause of the rationale string.
fn rationale_detail(level: RiskLevel, rail_status: RailStatus) -> String {
    match level {
        RiskLevel::Low => "a low-risk transaction needs no added privacy measures".to_string(),
        RiskLevel::Medium => "a medium-risk transaction warrants moderate privacy at moderate cost".to_string(),
        RiskLevel::High if rail_status == RailStatus::Ready => {
            "a high-risk transaction favors maximum available privacy (private rail is ready)".to_string()
        }
        RiskLevel::High => format!(
            "a high-risk transaction favors maximum available privacy (private rail is {})",
            gated_status_phrase(rail_status)
        ),
    }
}

/// Renders a non-[`RailStatus::Ready`] status as the phrase used in
/// gated-alternative reasons and rationale clauses. Always contains "policy"
/// when the status is policy-driven, and "not available" otherwise, matching
/// what a caller reading a denial reason needs to tell the two cases apart.
const fn gated_status_phrase(rail_status: RailStatus) -> &'static str {
    match rail_status {
        RailStatus::DisabledByPolicy => "disabled by policy",
        RailStatus::NotAvailable | RailStatus::Ready => "not available",
        RailStatus::NotConfigured => "not available: not configured",
        RailStatus::TemporarilyUnavailable => "not available: temporarily unavailable",
    }
}
