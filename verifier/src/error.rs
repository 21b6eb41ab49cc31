//! Verifier Error Types
//!
//! This module defines the [`VerifierError`] enum, which covers every failure
//! that can surface at a strategy boundary: a missing or unready sandbox, a
//! sandbox fault mid-operation, rejected reference material, or a language
//! with no registered runtime.
//!
//! The strategy router never lets these escape to its caller. Every error is
//! caught at the strategy boundary and converted into the structured fallback
//! path of a [`crate::types::GradingResult`].

use thiserror::Error;

/// Represents all error types that can occur inside the verification engine.
#[derive(Debug, Clone, Error)]
pub enum VerifierError {
    /// No sandbox handle was injected, or the handle reports not-ready.
    #[error("sandbox unavailable: {0}")]
    SandboxUnavailable(String),
    /// The sandbox accepted work but faulted while running it.
    #[error("runtime failure: {0}")]
    RuntimeFailure(String),
    /// A source string could not be lexed or parsed.
    #[error("source rejected: {0}")]
    SourceRejected(String),
    /// The exercise's expected answer could not be processed. This is a
    /// curriculum-side problem, not a learner one.
    #[error("expected answer rejected: {0}")]
    ExpectedAnswerRejected(String),
    /// No runtime is registered for the requested language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}
