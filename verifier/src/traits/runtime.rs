//! The per-language capability set.
//!
//! Each supported scripting language implements [`LanguageRuntime`] once. The
//! strategy router is polymorphic over this trait and holds no
//! language-specific logic itself: adding a language means registering a new
//! implementation, not touching the router.

use crate::comparators::token_comparator;
use crate::error::VerifierError;
use crate::normalizer::AstOptions;
use crate::types::{AstComparison, ExecutionOutcome, MatchOutcome};
use async_trait::async_trait;
use util::languages::Language;

/// Capability contract implemented once per supported scripting language,
/// backed by an embedded interpreter sandbox.
///
/// A runtime may require an external sandbox handle to be injected before
/// `is_ready` returns true; until then every strategy that needs the runtime
/// is treated as infra-unavailable.
#[async_trait]
pub trait LanguageRuntime: Send + Sync {
    /// The language this runtime grades.
    fn language(&self) -> Language;

    /// Whether the backing sandbox is present and initialized.
    fn is_ready(&self) -> bool;

    /// Run code in the backing sandbox.
    async fn execute(&self, code: &str) -> Result<ExecutionOutcome, VerifierError>;

    /// Lex `code` into a canonical token stream with insignificant
    /// whitespace and comment tokens discarded. Each entry is the canonical
    /// spelling of one token.
    fn tokenize(&self, code: &str) -> Result<Vec<String>, VerifierError>;

    /// Whitespace/ordering-insensitive comparison of token streams.
    ///
    /// A submission that cannot be lexed is a learner error and reports a
    /// plain mismatch; an expected answer that cannot be lexed, or a missing
    /// sandbox, is an infrastructure error and surfaces as `Err` so the
    /// router can fall back.
    async fn compare_by_tokens(
        &self,
        expected: &str,
        submission: &str,
        alternatives: &[String],
    ) -> Result<MatchOutcome, VerifierError> {
        if !self.is_ready() {
            return Err(VerifierError::SandboxUnavailable(
                "no interpreter sandbox handle injected".to_string(),
            ));
        }
        token_comparator::compare_with(|code| self.tokenize(code), expected, submission, alternatives)
    }

    /// Structural comparison of canonicalized syntax trees. Never errors;
    /// infrastructure trouble is reported inside the result so the router's
    /// fallback decision stays a pure branch on data.
    async fn compare_by_ast(
        &self,
        expected: &str,
        submission: &str,
        alternatives: &[String],
        options: &AstOptions,
    ) -> AstComparison;

    /// Drop per-session state (the compiled normalization helper). Called
    /// when the sandbox handle backing this runtime is replaced. Callers
    /// serialize resets against in-flight comparisons.
    async fn reset(&self);
}
