//! Python implementation of [`LanguageRuntime`], backed by an injected
//! interpreter sandbox for execution and by `rustpython-parser` for lexing
//! and structural comparison.

use crate::error::VerifierError;
use crate::normalizer::{self, AstOptions, NormalizerSession};
use crate::traits::runtime::LanguageRuntime;
use crate::traits::sandbox::Sandbox;
use crate::types::{AstComparison, ExecutionOutcome};
use async_trait::async_trait;
use rustpython_parser::{Mode, Tok, lexer::lex};
use std::sync::Arc;
use util::languages::Language;

pub struct PythonRuntime {
    sandbox: Option<Arc<dyn Sandbox>>,
    normalizer: NormalizerSession,
}

impl PythonRuntime {
    pub fn new(sandbox: Option<Arc<dyn Sandbox>>) -> Self {
        PythonRuntime {
            sandbox,
            normalizer: NormalizerSession::new(),
        }
    }

    /// A runtime with no sandbox handle. Every sandbox-gated strategy
    /// reports infra-unavailable until a handle is injected.
    pub fn detached() -> Self {
        PythonRuntime::new(None)
    }
}

#[async_trait]
impl LanguageRuntime for PythonRuntime {
    fn language(&self) -> Language {
        Language::Python
    }

    fn is_ready(&self) -> bool {
        self.sandbox.as_ref().is_some_and(|sandbox| sandbox.is_ready())
    }

    async fn execute(&self, code: &str) -> Result<ExecutionOutcome, VerifierError> {
        match &self.sandbox {
            Some(sandbox) => sandbox.execute(code).await,
            None => Err(VerifierError::SandboxUnavailable(
                "no interpreter sandbox handle injected".to_string(),
            )),
        }
    }

    /// Canonical token stream with comments and insignificant newlines
    /// discarded, so formatting differences never reach the comparison.
    fn tokenize(&self, code: &str) -> Result<Vec<String>, VerifierError> {
        let mut tokens = Vec::new();
        for item in lex(code, Mode::Module) {
            let (tok, _range) =
                item.map_err(|err| VerifierError::SourceRejected(format!("{err:?}")))?;
            match tok {
                Tok::Comment(_) | Tok::NonLogicalNewline => {}
                Tok::EndOfFile => break,
                other => tokens.push(format!("{other:?}")),
            }
        }
        Ok(tokens)
    }

    async fn compare_by_ast(
        &self,
        expected: &str,
        submission: &str,
        alternatives: &[String],
        options: &AstOptions,
    ) -> AstComparison {
        normalizer::compare_by_ast(
            &self.normalizer,
            self.sandbox.as_deref(),
            expected,
            submission,
            alternatives,
            options,
        )
        .await
    }

    async fn reset(&self) {
        self.normalizer.reset().await;
    }
}
