// demos/minimal/src/main.rs
// ============================================================================
// Module: Liminal Minimal Demo
// Description: Minimal end-to-end pipeline run using in-memory collaborators.
// Purpose: Demonstrate create -> dry-run -> sign -> submit on a single transaction.
// Dependencies: liminal-core, liminal-persist
// ============================================================================

//! ## Overview
//! Runs a single transaction through the full pipeline using in-memory
//! collaborators. This example is backend-agnostic and suitable for quick
//! verification that a host's wiring compiles and behaves as expected.

use liminal_core::Receipt;
use liminal_core::core::identifiers::ContextId;
use liminal_core::core::payload::Payload;
use liminal_core::core::rail::RailCapabilities;
use liminal_core::core::rail::RailStatus;
use liminal_core::core::risk::ContextRisk;
use liminal_core::core::state::SigningResult;
use liminal_core::core::state::SubmissionResult;
use liminal_core::core::state::TransactionRecord;
use liminal_core::core::time::Timestamp;
use liminal_core::interfaces::ChainRpc;
use liminal_core::interfaces::ChainRpcError;
use liminal_core::interfaces::EstimateResult;
use liminal_core::interfaces::PrepareResult;
use liminal_core::interfaces::PrivateRailAdapter;
use liminal_core::interfaces::RailError;
use liminal_core::interfaces::SignerError;
use liminal_core::interfaces::ValidationResult;
use liminal_core::interfaces::WalletSigner;
use liminal_core::runtime::ExecutionPolicy;
use liminal_core::runtime::PipelineOrchestrator;
use liminal_core::runtime::RiskContext;
use liminal_persist::InMemorySnapshotStore;

/// Private rail stand-in that reports itself unavailable, matching the
/// default posture of a host with no privacy rail configured.
struct ExampleRail;

impl PrivateRailAdapter for ExampleRail {
    fn get_capabilities(&self) -> RailCapabilities {
        RailCapabilities::none()
    }

    fn get_status(&self) -> Result<RailStatus, RailError> {
        Ok(RailStatus::NotAvailable)
    }

    fn prepare(&self, _payload: &Payload) -> Result<PrepareResult, RailError> {
        Ok(PrepareResult::Unavailable(unavailable()))
    }

    fn estimate(&self, _payload: &Payload) -> Result<EstimateResult, RailError> {
        Ok(EstimateResult::Unavailable(unavailable()))
    }

    fn validate(&self, _payload: &Payload) -> Result<ValidationResult, RailError> {
        Ok(ValidationResult::Unavailable(unavailable()))
    }
}

/// Builds the fixed "rail not configured" result this demo's rail always reports.
fn unavailable() -> liminal_core::core::rail::RailUnavailableResult {
    liminal_core::core::rail::RailUnavailableResult {
        status: RailStatus::NotAvailable,
        reason: "example rail is never configured".to_string(),
    }
}

/// Wallet signer stand-in that signs every transaction successfully.
struct ExampleSigner;

impl WalletSigner for ExampleSigner {
    fn sign(&self, _record: &TransactionRecord) -> Result<SigningResult, SignerError> {
        Ok(SigningResult {
            success: true,
            signature: Some("example-signature".to_string()),
            error: None,
            timestamp: Timestamp::now(),
        })
    }
}

/// Chain RPC stand-in that confirms every submission successfully.
struct ExampleRpc;

impl ChainRpc for ExampleRpc {
    fn submit(&self, _record: &TransactionRecord) -> Result<SubmissionResult, ChainRpcError> {
        Ok(SubmissionResult {
            success: true,
            tx_signature: Some("example-onchain-signature".to_string()),
            error: None,
            timestamp: Timestamp::now(),
        })
    }
}

/// Builds the payload used by this demo's single transaction.
fn build_payload() -> Payload {
    Payload {
        program_id: "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA".to_string(),
        instruction_data: "03a0b8ed10e0000000".to_string(),
        instruction_count: 1,
        accounts: vec!["Sender111111111111111111111111111111111111".to_string(), "Receiver11111111111111111111111111111111".to_string()],
        estimated_amount: 0.25,
        origin: "https://example.test".to_string(),
    }
}

#[allow(clippy::print_stdout, reason = "this binary's entire purpose is to print its own progress")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let policy = ExecutionPolicy::permissive();
    let mut orchestrator = PipelineOrchestrator::new(ExampleRail, ExampleSigner, ExampleRpc, InMemorySnapshotStore::new(), policy)?;

    let created = orchestrator.create_transaction(ContextId::new("ctx-example"), build_payload());

    let risk_context = RiskContext {
        origin_trust: 80,
        context_risk: ContextRisk::Low,
        known_destination: true,
    };
    let after_dry_run = orchestrator.run_dry_run_pipeline(&created.id, &risk_context)?;
    println!("after dry-run: state={}", after_dry_run.state.as_external_str());

    let signed = orchestrator.sign_transaction(&created.id)?;
    println!("after sign: state={}", signed.state.as_external_str());

    let submitted = orchestrator.submit_transaction(&created.id)?;
    println!("after submit: state={}", submitted.state.as_external_str());

    let receipt: Receipt = orchestrator.get_receipt_data(&created.id).ok_or("receipt missing for a transaction that was just submitted")?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    Ok(())
}
