// liminal-core/src/core/payload.rs
// ============================================================================
// Module: Liminal Payload
// Description: Immutable transaction payload submitted by a browsing context.
// Purpose: Carry the candidate transaction through the pipeline by value.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A payload is immutable after creation and compares by value equality over
//! every field. Instruction data is represented as a hex string rather than
//! raw bytes so payloads remain trivially serializable and hashable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Candidate transaction payload presented to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Opaque on-chain program identifier.
    pub program_id: String,
    /// Instruction data, hex-encoded.
    pub instruction_data: String,
    /// Number of instructions in the transaction.
    pub instruction_count: u32,
    /// Ordered list of account identifiers referenced by the transaction.
    pub accounts: Vec<String>,
    /// Estimated amount in native chain units.
    pub estimated_amount: f64,
    /// Origin URL the payload was submitted from.
    pub origin: String,
}

impl Payload {
    /// Returns the instruction data decoded from hex, or `None` if malformed.
    #[must_use]
    pub fn instruction_bytes(&self) -> Option<Vec<u8>> {
        decode_hex(&self.instruction_data)
    }
}

/// Decodes a hex string into bytes, rejecting odd-length or non-hex input.
fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(hex.len() / 2);
    let bytes = hex.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        let hi = (bytes[idx] as char).to_digit(16)?;
        let lo = (bytes[idx + 1] as char).to_digit(16)?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "hi/lo are both < 16 so the combined nibble pair always fits in u8"
        )]
        out.push(((hi << 4) | lo) as u8);
        idx += 2;
    }
    Some(out)
}

// ============================================================================
// SECTION: Metadata Value
// ============================================================================

/// Tagged-variant value held in classification metadata. Closed over a small
/// set of scalar kinds rather than an open dynamic bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    /// UTF-8 string value.
    Text(String),
    /// Signed integer value.
    Integer(i64),
    /// Floating point value.
    Real(f64),
    /// Boolean value.
    Boolean(bool),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use super::Payload;

    fn sample() -> Payload {
        Payload {
            program_id: "Tokenkeg".into(),
            instruction_data: "03ab".into(),
            instruction_count: 1,
            accounts: vec!["S".into(), "R".into()],
            estimated_amount: 0.05,
            origin: "https://x".into(),
        }
    }

    #[test]
    fn instruction_bytes_decodes_hex() {
        let payload = sample();
        assert_eq!(payload.instruction_bytes(), Some(vec![0x03, 0xab]));
    }

    #[test]
    fn instruction_bytes_rejects_odd_length() {
        let mut payload = sample();
        payload.instruction_data = "abc".into();
        assert_eq!(payload.instruction_bytes(), None);
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(sample(), sample());
    }
}
