// liminal-core/src/runtime/classifier.rs
// ============================================================================
// Module: Liminal Classifier
// Description: Deterministic, rule-ordered transaction type classification.
// Purpose: Label a payload without any probabilistic or external dependency.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Rules are tried in order; the first match wins. Confidence is a lookup
//! table keyed by the matched rule, never a computed probability, so
//! `classify(payload)` is bit-identical across invocations for the same
//! input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::classification::Classification;
use crate::core::classification::ClassificationType;
use crate::core::payload::MetadataValue;
use crate::core::payload::Payload;

// ============================================================================
// SECTION: Known Program Ids
// ============================================================================

/// Program ids recognized as token-transfer programs.
const TOKEN_PROGRAM_IDS: &[&str] = &["Tokenkeg", "TokenzQd"];
/// Program ids recognized as swap programs.
const SWAP_PROGRAM_IDS: &[&str] = &["SwapProgram", "JupiterAg"];
/// Instruction-data prefix (hex) identifying a transfer instruction.
const TRANSFER_TAG_PREFIX: &str = "03";

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Deterministically classifies a payload. Pure function of its input.
#[must_use]
pub fn classify(payload: &Payload) -> Classification {
    if is_token_transfer(payload) {
        return Classification {
            tx_type: ClassificationType::Transfer,
            confidence: 0.95,
            description: "token transfer via a known token program".to_string(),
            metadata: metadata_with_program(payload),
        };
    }

    if SWAP_PROGRAM_IDS.contains(&payload.program_id.as_str()) {
        return Classification {
            tx_type: ClassificationType::Swap,
            confidence: 0.9,
            description: "swap via a known swap program".to_string(),
            metadata: metadata_with_program(payload),
        };
    }

    if contains_approval_tag(payload) {
        return Classification {
            tx_type: ClassificationType::Approval,
            confidence: 0.8,
            description: "instruction data indicates an approval or delegation".to_string(),
            metadata: metadata_with_program(payload),
        };
    }

    if !payload.instruction_data.is_empty() && payload.instruction_count >= 1 {
        return Classification {
            tx_type: ClassificationType::ProgramInteraction,
            confidence: 0.6,
            description: "generic program interaction".to_string(),
            metadata: metadata_with_program(payload),
        };
    }

    if payload.instruction_data.is_empty() && payload.instruction_count == 0 && payload.accounts.is_empty() {
        return Classification {
            tx_type: ClassificationType::Unknown,
            confidence: 0.2,
            description: "payload carries no classifiable instruction".to_string(),
            metadata: BTreeMap::new(),
        };
    }

    Classification {
        tx_type: ClassificationType::Unknown,
        confidence: 0.3,
        description: "payload did not match a known classification rule".to_string(),
        metadata: metadata_with_program(payload),
    }
}

/// Whether the payload matches the token-transfer rule: a known token
/// program id and instruction data starting with the transfer tag.
fn is_token_transfer(payload: &Payload) -> bool {
    TOKEN_PROGRAM_IDS.contains(&payload.program_id.as_str())
        && payload.instruction_data.starts_with(TRANSFER_TAG_PREFIX)
}

/// Whether the instruction data contains an approval/delegate marker.
///
/// The marker is checked against the hex-encoded bytes decoded back to ASCII
/// where possible, and against the raw hex string as a fallback so a caller
/// that embedded the literal words still matches.
fn contains_approval_tag(payload: &Payload) -> bool {
    if let Some(bytes) = payload.instruction_bytes() {
        let text = String::from_utf8_lossy(&bytes);
        if text.contains("approve") || text.contains("delegate") {
            return true;
        }
    }
    let lower = payload.instruction_data.to_ascii_lowercase();
    lower.contains("approve") || lower.contains("delegate")
}

/// Builds the metadata map carried on every non-unknown classification.
fn metadata_with_program(payload: &Payload) -> BTreeMap<String, MetadataValue> {
    let mut metadata = BTreeMap::new();
    metadata.insert("program_id".to_string(), MetadataValue::Text(payload.program_id.clone()));
    metadata.insert(
        "instruction_count".to_string(),
        MetadataValue::Integer(i64::from(payload.instruction_count)),
    );
    metadata
}
