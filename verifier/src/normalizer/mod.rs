//! # AST Normalizer
//!
//! Structural comparison of code fragments. [`canonical`] does the parsing
//! and canonical-form rendering; [`NormalizerSession`] owns the per-session
//! sandbox state the AST strategy depends on: a small helper program is
//! compiled into the interpreter sandbox once per session and reused by
//! every subsequent comparison. If priming the helper fails, the whole AST
//! strategy is infrastructure-unavailable for that call and the router falls
//! back to exact comparison.

pub mod canonical;

pub use canonical::{AstOptions, ParseFailure, canonical_form};

use crate::error::VerifierError;
use crate::traits::sandbox::Sandbox;
use crate::types::AstComparison;
use tokio::sync::Mutex;

/// Helper program compiled into the sandbox once per session. It proves the
/// interpreter's parsing machinery is alive before any structural verdict is
/// produced, so a crashed sandbox surfaces as an infrastructure failure
/// rather than a silent wrong answer.
const HELPER_SOURCE: &str = r#"
import ast as _ast

def _probe():
    _ast.parse("0")
    return True

_probe()
"#;

/// Per-session state for the AST strategy.
///
/// The session tracks whether the helper has been primed into the current
/// sandbox. [`NormalizerSession::reset`] drops that state; the next
/// comparison re-primes against whatever sandbox is then live.
pub struct NormalizerSession {
    primed: Mutex<bool>,
}

impl NormalizerSession {
    pub fn new() -> Self {
        NormalizerSession {
            primed: Mutex::new(false),
        }
    }

    /// Compile the helper into the sandbox if this session has not done so
    /// yet. Serialized through the lock so concurrent comparisons prime at
    /// most once.
    async fn ensure_primed(&self, sandbox: &dyn Sandbox) -> Result<(), VerifierError> {
        let mut primed = self.primed.lock().await;
        if *primed {
            return Ok(());
        }
        let outcome = sandbox.execute(HELPER_SOURCE).await?;
        if !outcome.success {
            return Err(VerifierError::RuntimeFailure(
                outcome
                    .error
                    .unwrap_or_else(|| "normalization helper failed to compile".to_string()),
            ));
        }
        *primed = true;
        Ok(())
    }

    /// Forget the primed helper. Called when the sandbox handle is replaced.
    pub async fn reset(&self) {
        let mut primed = self.primed.lock().await;
        *primed = false;
    }
}

impl Default for NormalizerSession {
    fn default() -> Self {
        NormalizerSession::new()
    }
}

/// Compare `submission` structurally against `expected` and then each
/// accepted alternative in order.
///
/// Verdict policy: a submission that will not parse is a learner mismatch
/// with infrastructure intact; an expected answer that will not parse, a
/// missing or unready sandbox, or a helper-priming failure is an
/// infrastructure outage reported through `infra_available == false`.
/// Alternatives that will not parse are skipped with a warning.
pub async fn compare_by_ast(
    session: &NormalizerSession,
    sandbox: Option<&dyn Sandbox>,
    expected: &str,
    submission: &str,
    alternatives: &[String],
    options: &AstOptions,
) -> AstComparison {
    let Some(sandbox) = sandbox else {
        return AstComparison::infra_down("no interpreter sandbox handle injected");
    };
    if !sandbox.is_ready() {
        return AstComparison::infra_down("interpreter sandbox is not ready");
    }
    if let Err(err) = session.ensure_primed(sandbox).await {
        return AstComparison::infra_down(err.to_string());
    }

    let expected_form = match canonical_form(expected, options) {
        Ok(form) => form,
        Err(err) => {
            return AstComparison::infra_down(format!(
                "expected answer failed to parse: {err}"
            ));
        }
    };

    let submission_form = match canonical_form(submission, options) {
        Ok(form) => form,
        // The learner's code does not parse: a plain mismatch.
        Err(_) => return AstComparison::mismatch(),
    };

    if submission_form == expected_form {
        return AstComparison::matched(None);
    }

    for alternative in alternatives {
        match canonical_form(alternative, options) {
            Ok(form) if form == submission_form => {
                return AstComparison::matched(Some(alternative.clone()));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "accepted alternative failed to parse; skipping");
            }
        }
    }

    AstComparison::mismatch()
}
