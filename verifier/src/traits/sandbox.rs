//! The sandbox boundary.
//!
//! The engine expects an externally supplied, already-initialized interpreter
//! sandbox for the ast/token/execution strategies. It never manages sandbox
//! download, caching, or lifecycle — that is the host's responsibility. If no
//! handle is supplied, those strategies degrade to infra-unavailable and the
//! router falls back to plain string comparison.

use crate::error::VerifierError;
use crate::types::ExecutionOutcome;
use async_trait::async_trait;

/// A handle to an embedded interpreter sandbox.
///
/// Concurrent `execute` calls against the same handle are undefined behavior;
/// the caller serializes submissions (the engine grades one at a time per
/// session and holds no queue of its own).
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Whether the sandbox finished initializing and can accept work.
    fn is_ready(&self) -> bool;

    /// Run `code` to completion and capture its output.
    ///
    /// `Ok` with `success == false` means the code itself failed — a learner
    /// fault. `Err` means the sandbox faulted — an infrastructure fault that
    /// triggers the router's fallback.
    async fn execute(&self, code: &str) -> Result<ExecutionOutcome, VerifierError>;
}
