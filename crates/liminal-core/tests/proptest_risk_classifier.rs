// liminal-core/tests/proptest_risk_classifier.rs
// ============================================================================
// Module: Risk Scorer and Classifier Property Tests
// Description: Property tests for determinism and score-boundary invariants.
// Purpose: Detect panics and drift across wide input ranges.
// ============================================================================

//! Property-based tests for the risk scorer and classifier.

#![allow(
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items,
    missing_docs,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use liminal_core::core::classification::ClassificationType;
use liminal_core::core::payload::MetadataValue;
use liminal_core::core::payload::Payload;
use liminal_core::core::risk::ContextRisk;
use liminal_core::core::risk::RiskInput;
use liminal_core::core::risk::RiskLevel;
use liminal_core::core::time::Timestamp;
use proptest::prelude::*;

fn risk_input_strategy() -> impl Strategy<Value = RiskInput> {
    (
        any::<u8>(),
        prop_oneof![Just(ContextRisk::Low), Just(ContextRisk::Medium), Just(ContextRisk::High)],
        prop_oneof![
            Just(ClassificationType::Transfer),
            Just(ClassificationType::Swap),
            Just(ClassificationType::Approval),
            Just(ClassificationType::ProgramInteraction),
            Just(ClassificationType::Unknown),
        ],
        0.0f64 .. 1_000_000.0,
        any::<bool>(),
        0u32 .. 200,
    )
        .prop_map(|(origin_trust, context_risk, tx_type, estimated_amount, known_destination, instruction_count)| RiskInput {
            origin_trust,
            context_risk,
            tx_type,
            estimated_amount,
            known_destination,
            instruction_count,
        })
}

fn payload_strategy() -> impl Strategy<Value = Payload> {
    (
        ".{0,16}",
        ".{0,16}",
        0u32 .. 20,
        prop::collection::vec(".{0,8}", 0 .. 6),
        0.0f64 .. 1_000_000.0,
        ".{0,16}",
    )
        .prop_map(|(program_id, instruction_data, instruction_count, accounts, estimated_amount, origin)| Payload {
            program_id,
            instruction_data,
            instruction_count,
            accounts,
            estimated_amount,
            origin,
        })
}

proptest! {
    #[test]
    fn risk_score_is_deterministic(input in risk_input_strategy()) {
        let now = Timestamp::now();
        let a = liminal_core::runtime::risk_scorer::score(&input, now);
        let b = liminal_core::runtime::risk_scorer::score(&input, now);
        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.level, b.level);
    }

    #[test]
    fn risk_score_never_leaves_0_100(input in risk_input_strategy()) {
        let score = liminal_core::runtime::risk_scorer::score(&input, Timestamp::now());
        prop_assert!(score.score <= 100);
    }

    #[test]
    fn risk_level_matches_the_documented_score_boundaries(input in risk_input_strategy()) {
        let score = liminal_core::runtime::risk_scorer::score(&input, Timestamp::now());
        let expected = if score.score < 30 {
            RiskLevel::Low
        } else if score.score <= 60 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        prop_assert_eq!(score.level, expected);
    }

    #[test]
    fn classify_is_deterministic(payload in payload_strategy()) {
        let a = liminal_core::runtime::classifier::classify(&payload);
        let b = liminal_core::runtime::classifier::classify(&payload);
        prop_assert_eq!(a.tx_type, b.tx_type);
        prop_assert!((a.confidence - b.confidence).abs() < f64::EPSILON);
    }

    #[test]
    fn classify_confidence_is_always_a_probability(payload in payload_strategy()) {
        let classification = liminal_core::runtime::classifier::classify(&payload);
        prop_assert!(classification.confidence >= 0.0);
        prop_assert!(classification.confidence <= 1.0);
    }

    #[test]
    fn classify_records_the_program_id_whenever_metadata_is_populated(payload in payload_strategy()) {
        let classification = liminal_core::runtime::classifier::classify(&payload);
        if let Some(program_id) = classification.metadata.get("program_id") {
            prop_assert_eq!(program_id, &MetadataValue::Text(payload.program_id));
        }
    }
}
