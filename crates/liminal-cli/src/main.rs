// liminal-cli/src/main.rs
// ============================================================================
// Module: Liminal CLI Entry Point
// Description: Command dispatcher driving the transaction governance pipeline.
// Purpose: Provide a local, scriptable front end over the core pipeline.
// Dependencies: clap, liminal-core, liminal-persist, serde_json, thiserror, tracing.
// ============================================================================

//! ## Overview
//! Every command loads the persisted record set, performs one pipeline
//! operation, writes the updated set back, and prints an [`ApiResult`]
//! envelope as JSON on stdout. The CLI wires [`NullWalletSigner`] and
//! [`NullChainRpc`] by default since wallet and chain integration are a
//! host-application concern the core never implements itself; pass a real
//! implementation by replacing those types in an embedding application.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use liminal_core::ApiError;
use liminal_core::ApiResult;
use liminal_core::core::identifiers::ContextId;
use liminal_core::core::identifiers::TxId;
use liminal_core::core::payload::Payload;
use liminal_core::core::risk::ContextRisk;
use liminal_core::core::state::SigningResult;
use liminal_core::core::state::SubmissionResult;
use liminal_core::core::state::TransactionRecord;
use liminal_core::core::time::Timestamp;
use liminal_core::interfaces::ChainRpc;
use liminal_core::interfaces::ChainRpcError;
use liminal_core::interfaces::SignerError;
use liminal_core::interfaces::WalletSigner;
use liminal_core::runtime::DefaultPrivateRailAdapter;
use liminal_core::runtime::ExecutionPolicy;
use liminal_core::runtime::PipelineOrchestrator;
use liminal_core::runtime::RiskContext;
use liminal_persist::JsonFileSnapshotStore;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "liminal", arg_required_else_help = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands, one per pipeline operation.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Creates a new transaction record in `NEW`.
    Create(CreateCommand),
    /// Runs the deterministic pipeline through to `SIMULATED_CONFIRM`.
    DryRun(DryRunCommand),
    /// Requests a signature for a transaction in `SIMULATED_CONFIRM`.
    Sign(IdCommand),
    /// Submits a signed transaction, subject to the submission gate.
    Submit(IdCommand),
    /// Aborts a transaction from any non-terminal state.
    Abort(AbortCommand),
    /// Prints the public receipt projection for a transaction.
    Receipt(IdCommand),
    /// Lists every transaction owned by a context.
    Status(StatusCommand),
}

/// Arguments for `create`.
#[derive(Args, Debug)]
struct CreateCommand {
    /// Browsing-context identifier that will own the transaction.
    #[arg(long)]
    context: String,
    /// On-chain program identifier.
    #[arg(long)]
    program_id: String,
    /// Hex-encoded instruction data.
    #[arg(long)]
    instruction_data: String,
    /// Number of instructions in the transaction.
    #[arg(long, default_value_t = 1)]
    instruction_count: u32,
    /// Account identifiers referenced by the transaction, repeatable.
    #[arg(long = "account")]
    accounts: Vec<String>,
    /// Estimated amount in native chain units.
    #[arg(long, default_value_t = 0.0)]
    amount: f64,
    /// Origin URL the payload was submitted from.
    #[arg(long)]
    origin: String,
}

/// Arguments for `dry-run`.
#[derive(Args, Debug)]
struct DryRunCommand {
    /// Transaction identifier.
    #[arg(long)]
    id: String,
    /// Trust level of the requesting origin, in `[0, 100]`.
    #[arg(long, default_value_t = 50)]
    origin_trust: u8,
    /// Risk level of the browsing context.
    #[arg(long, value_enum, default_value_t = ContextRiskArg::Medium)]
    context_risk: ContextRiskArg,
    /// Whether the destination account is known/familiar.
    #[arg(long)]
    known_destination: bool,
}

/// Clap-friendly mirror of [`ContextRisk`].
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ContextRiskArg {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl From<ContextRiskArg> for ContextRisk {
    fn from(value: ContextRiskArg) -> Self {
        match value {
            ContextRiskArg::Low => Self::Low,
            ContextRiskArg::Medium => Self::Medium,
            ContextRiskArg::High => Self::High,
        }
    }
}

/// Arguments naming a single transaction.
#[derive(Args, Debug)]
struct IdCommand {
    /// Transaction identifier.
    #[arg(long)]
    id: String,
}

/// Arguments for `abort`.
#[derive(Args, Debug)]
struct AbortCommand {
    /// Transaction identifier.
    #[arg(long)]
    id: String,
    /// Human-readable abort reason.
    #[arg(long, default_value = "aborted via cli")]
    reason: String,
}

/// Arguments for `status`.
#[derive(Args, Debug)]
struct StatusCommand {
    /// Browsing-context identifier to list transactions for.
    #[arg(long)]
    context: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Top-level CLI failure, normalized to an [`ApiError`] before printing.
#[derive(Debug, Error)]
enum CliError {
    /// The pipeline rejected the requested operation.
    #[error(transparent)]
    Pipeline(#[from] liminal_core::runtime::PipelineError),
    /// The requested transaction does not exist.
    #[error("transaction not found: {0}")]
    NotFound(String),
}

impl From<CliError> for ApiError {
    fn from(error: CliError) -> Self {
        match error {
            CliError::Pipeline(pipeline_error) => Self::from(pipeline_error),
            CliError::NotFound(id) => Self::not_found(format!("transaction not found: {id}")),
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Orchestrator instantiated with this CLI's concrete collaborators.
type Orchestrator = PipelineOrchestrator<DefaultPrivateRailAdapter, NullWalletSigner, NullChainRpc, JsonFileSnapshotStore>;

#[allow(clippy::print_stdout, reason = "the CLI's entire output contract is one JSON envelope on stdout")]
fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let result: Result<serde_json::Value, CliError> = run(cli.command);
    let envelope = ApiResult::from_result(result.map_err(ApiError::from));
    #[allow(clippy::expect_used, reason = "the envelope always serializes: it contains only plain data and strings")]
    let rendered = serde_json::to_string_pretty(&envelope).expect("envelope serializes");
    println!("{rendered}");
    if envelope.ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Stable, non-Debug name for a dispatched command, for structured logging.
const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Create(_) => "create",
        Commands::DryRun(_) => "dry-run",
        Commands::Sign(_) => "sign",
        Commands::Submit(_) => "submit",
        Commands::Abort(_) => "abort",
        Commands::Receipt(_) => "receipt",
        Commands::Status(_) => "status",
    }
}

/// Builds an orchestrator wired to the local stand-in collaborators, hydrated
/// from whatever snapshot the persistence directory currently holds.
fn build_orchestrator() -> Orchestrator {
    let policy = ExecutionPolicy::from_env();
    #[allow(clippy::expect_used, reason = "hydration failures are logged and treated as an empty store by the orchestrator")]
    PipelineOrchestrator::new(
        DefaultPrivateRailAdapter::new(policy),
        NullWalletSigner,
        NullChainRpc,
        JsonFileSnapshotStore::from_env(),
        policy,
    )
    .expect("orchestrator construction never fails for these collaborators")
}

/// Dispatches `command` against a freshly hydrated orchestrator and renders
/// its result as a JSON value ready for the [`ApiResult`] envelope.
fn run(command: Commands) -> Result<serde_json::Value, CliError> {
    let mut orchestrator = build_orchestrator();
    tracing::info!(command = command_name(&command), "dispatching cli command");
    match command {
        Commands::Create(args) => Ok(serde_json::to_value(create(&mut orchestrator, args)).unwrap_or_default()),
        Commands::DryRun(args) => dry_run(&mut orchestrator, args).map(|record| serde_json::to_value(record).unwrap_or_default()),
        Commands::Sign(args) => sign(&mut orchestrator, &args.id).map(|record| serde_json::to_value(record).unwrap_or_default()),
        Commands::Submit(args) => submit(&mut orchestrator, &args.id).map(|record| serde_json::to_value(record).unwrap_or_default()),
        Commands::Abort(args) => {
            abort(&mut orchestrator, &args.id, args.reason).map(|record| serde_json::to_value(record).unwrap_or_default())
        }
        Commands::Receipt(args) => receipt(&orchestrator, &args.id).map(|receipt| serde_json::to_value(receipt).unwrap_or_default()),
        Commands::Status(args) => Ok(serde_json::to_value(status(&orchestrator, &args.context)).unwrap_or_default()),
    }
}

/// Creates a new transaction record from CLI-supplied payload fields.
fn create(orchestrator: &mut Orchestrator, args: CreateCommand) -> TransactionRecord {
    let payload = Payload {
        program_id: args.program_id,
        instruction_data: args.instruction_data,
        instruction_count: args.instruction_count,
        accounts: args.accounts,
        estimated_amount: args.amount,
        origin: args.origin,
    };
    orchestrator.create_transaction(ContextId::new(args.context), payload)
}

/// Drives the dry-run pipeline for `args.id` using CLI-supplied risk context.
fn dry_run(orchestrator: &mut Orchestrator, args: DryRunCommand) -> Result<TransactionRecord, CliError> {
    let risk_context = RiskContext {
        origin_trust: args.origin_trust,
        context_risk: args.context_risk.into(),
        known_destination: args.known_destination,
    };
    Ok(orchestrator.run_dry_run_pipeline(&TxId::new(args.id), &risk_context)?)
}

/// Requests a signature for the named transaction.
fn sign(orchestrator: &mut Orchestrator, id: &str) -> Result<TransactionRecord, CliError> {
    Ok(orchestrator.sign_transaction(&TxId::new(id))?)
}

/// Submits the named transaction, subject to the submission gate.
fn submit(orchestrator: &mut Orchestrator, id: &str) -> Result<TransactionRecord, CliError> {
    Ok(orchestrator.submit_transaction(&TxId::new(id))?)
}

/// Aborts the named transaction with the given reason.
fn abort(orchestrator: &mut Orchestrator, id: &str, reason: String) -> Result<TransactionRecord, CliError> {
    Ok(orchestrator.abort_transaction(&TxId::new(id), reason)?)
}

/// Looks up the public receipt projection for the named transaction.
fn receipt(orchestrator: &Orchestrator, id: &str) -> Result<liminal_core::Receipt, CliError> {
    orchestrator.get_receipt_data(&TxId::new(id)).ok_or_else(|| CliError::NotFound(id.to_string()))
}

/// Lists every transaction owned by the named context.
fn status(orchestrator: &Orchestrator, context: &str) -> Vec<TransactionRecord> {
    orchestrator.get_context_transactions(&ContextId::new(context))
}

// ============================================================================
// SECTION: Local Collaborator Stand-Ins
// ============================================================================

/// Wallet signer stand-in that always fails. Real signing is a host concern.
#[derive(Debug, Clone, Copy, Default)]
struct NullWalletSigner;

impl WalletSigner for NullWalletSigner {
    fn sign(&self, _record: &TransactionRecord) -> Result<SigningResult, SignerError> {
        Ok(SigningResult {
            success: false,
            signature: None,
            error: Some("no wallet signer is configured for this CLI invocation".to_string()),
            timestamp: Timestamp::now(),
        })
    }
}

/// Chain RPC stand-in that always fails. Real submission is a host concern.
#[derive(Debug, Clone, Copy, Default)]
struct NullChainRpc;

impl ChainRpc for NullChainRpc {
    fn submit(&self, _record: &TransactionRecord) -> Result<SubmissionResult, ChainRpcError> {
        Ok(SubmissionResult {
            success: false,
            tx_signature: None,
            error: Some("no chain rpc is configured for this CLI invocation".to_string()),
            timestamp: Timestamp::now(),
        })
    }
}
