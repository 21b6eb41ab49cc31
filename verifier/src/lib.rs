//! # Verifier
//!
//! The answer verification engine: grades one learner submission against one
//! resolved exercise record and produces a single [`GradingResult`].
//!
//! A [`GradingJob`] is created per submission, configured through its builder
//! methods, and consumed by [`GradingJob::grade`]. The job routes to one of
//! four strategies — exact, token, AST, or execution — chosen from the
//! exercise's declared strategy or inferred from its type. Every strategy
//! that depends on runtime infrastructure degrades to exact string comparison
//! when that infrastructure is missing or faulted; grading itself never
//! errors, and infrastructure trouble is reported inside the result.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use verifier::runtimes::RuntimeRegistry;
//! use verifier::GradingJob;
//! # use util::exercise::Exercise;
//! # async fn grade_one(exercise: Exercise) {
//! let registry = Arc::new(RuntimeRegistry::with_python_sandbox(None));
//! let result = GradingJob::new("s[1:4]", exercise, registry).grade().await;
//! assert!(result.fallback_used);
//! # }
//! ```

pub mod comparators;
pub mod constructs;
pub mod error;
pub mod normalizer;
pub mod runtimes;
pub mod traits;
pub mod types;

pub use error::VerifierError;
pub use normalizer::AstOptions;
pub use types::{FallbackReason, GradingResult};

use crate::comparators::exact_comparator;
use crate::runtimes::RuntimeRegistry;
use crate::traits::runtime::LanguageRuntime;
use std::sync::Arc;
use util::exercise::{Exercise, ExerciseType, GradingStrategy};
use util::languages::Language;

/// One grading request: a submission, the exercise it answers, and the
/// runtimes available to grade it.
pub struct GradingJob {
    submission: String,
    exercise: Exercise,
    registry: Arc<RuntimeRegistry>,
    explicit_language: Option<Language>,
    ast_options: AstOptions,
}

impl GradingJob {
    pub fn new(
        submission: impl Into<String>,
        exercise: Exercise,
        registry: Arc<RuntimeRegistry>,
    ) -> Self {
        GradingJob {
            submission: submission.into(),
            exercise,
            registry,
            explicit_language: None,
            ast_options: AstOptions::default(),
        }
    }

    /// Override the language instead of resolving it from the exercise.
    pub fn with_language(mut self, language: Language) -> Self {
        self.explicit_language = Some(language);
        self
    }

    /// Override the default AST canonicalization rules.
    pub fn with_ast_options(mut self, options: AstOptions) -> Self {
        self.ast_options = options;
        self
    }

    /// Grade the submission. Infallible by design: every infrastructure
    /// failure is converted into the fallback path inside the result.
    pub async fn grade(self) -> GradingResult {
        let strategy = self.exercise.effective_strategy();
        let language = self.exercise.resolved_language(self.explicit_language);
        tracing::debug!(?strategy, %language, "grading submission");

        let mut result = match strategy {
            GradingStrategy::Exact => self.grade_exact(),
            GradingStrategy::Token => self.grade_token(language).await,
            GradingStrategy::Ast => self.grade_ast(language).await,
            GradingStrategy::Execution => self.grade_execution(language).await,
        };

        // Coaching rides along only on correct answers; a wrong answer gets
        // correctness feedback through the session layer, never coaching.
        if result.is_correct {
            if let Some(target) = &self.exercise.target_construct {
                let check = constructs::check_construct(&self.submission, &target.construct_type);
                if !check.detected {
                    result.coaching_feedback = Some(target.feedback.clone());
                }
            }
        }

        result
    }

    fn runtime(&self, language: Language) -> Result<Arc<dyn LanguageRuntime>, VerifierError> {
        self.registry
            .get(language)
            .ok_or_else(|| VerifierError::UnsupportedLanguage(language.as_str().to_string()))
    }

    fn grade_exact(&self) -> GradingResult {
        GradingResult::from_match(exact_comparator::compare(
            &self.exercise.expected_answer,
            &self.submission,
            &self.exercise.accepted_solutions,
        ))
    }

    async fn grade_token(&self, language: Language) -> GradingResult {
        let runtime = match self.runtime(language) {
            Ok(runtime) => runtime,
            Err(err) => return self.fallback(err),
        };
        match runtime
            .compare_by_tokens(
                &self.exercise.expected_answer,
                &self.submission,
                &self.exercise.accepted_solutions,
            )
            .await
        {
            Ok(outcome) => GradingResult::from_match(outcome),
            Err(err) => self.fallback(err),
        }
    }

    async fn grade_ast(&self, language: Language) -> GradingResult {
        let runtime = match self.runtime(language) {
            Ok(runtime) => runtime,
            Err(err) => return self.fallback(err),
        };
        let comparison = runtime
            .compare_by_ast(
                &self.exercise.expected_answer,
                &self.submission,
                &self.exercise.accepted_solutions,
                &self.ast_options,
            )
            .await;
        if !comparison.infra_available {
            return self.fallback_with(
                comparison
                    .error
                    .unwrap_or_else(|| "ast comparison unavailable".to_string()),
            );
        }
        GradingResult {
            is_correct: comparison.matched,
            matched_alternative: comparison.matched_alternative,
            infra_available: true,
            fallback_used: false,
            fallback_reason: None,
            error: None,
            coaching_feedback: None,
        }
    }

    async fn grade_execution(&self, language: Language) -> GradingResult {
        let runtime = match self.runtime(language) {
            Ok(runtime) => runtime,
            Err(err) => return self.fallback(err),
        };
        match self.exercise.exercise_type {
            ExerciseType::Predict => self.grade_predict(runtime.as_ref()).await,
            ExerciseType::Write | ExerciseType::FillIn => {
                match &self.exercise.verification_script {
                    Some(script) => self.grade_scripted(runtime.as_ref(), script).await,
                    // No assertions to run: the submission is judged as text.
                    None => self.grade_exact(),
                }
            }
        }
    }

    /// Predict exercises run the exercise's own program and compare its
    /// printed output against the learner's prediction. An execution error
    /// from the program grades incorrect with the error surfaced; only a
    /// sandbox fault degrades to the fallback path.
    async fn grade_predict(&self, runtime: &dyn LanguageRuntime) -> GradingResult {
        let Some(code) = &self.exercise.code else {
            return self.fallback_with("predict exercise carries no program to execute");
        };
        let outcome = match runtime.execute(code).await {
            Ok(outcome) => outcome,
            Err(err) => return self.fallback(err),
        };
        if !outcome.success {
            return GradingResult::incorrect_with_error(outcome.error);
        }

        let captured = normalize_output(&outcome.output);
        let predicted = normalize_output(&self.submission);
        if predicted == captured {
            return GradingResult::from_match(types::MatchOutcome::primary());
        }
        for alternative in &self.exercise.accepted_solutions {
            if predicted == normalize_output(alternative) {
                return GradingResult::from_match(types::MatchOutcome::alternative(
                    alternative.clone(),
                ));
            }
        }
        GradingResult::from_match(types::MatchOutcome::miss())
    }

    /// Write/fill-in exercises with a verification script append the script
    /// to the submission and let its assertions decide. A failing run is the
    /// learner's fault and its error text reaches them.
    async fn grade_scripted(
        &self,
        runtime: &dyn LanguageRuntime,
        script: &str,
    ) -> GradingResult {
        let program = format!("{}\n\n{script}", self.submission);
        match runtime.execute(&program).await {
            Ok(outcome) if outcome.success => {
                GradingResult::from_match(types::MatchOutcome::primary())
            }
            Ok(outcome) => GradingResult::incorrect_with_error(outcome.error),
            Err(err) => self.fallback(err),
        }
    }

    fn fallback(&self, err: VerifierError) -> GradingResult {
        self.fallback_with(err.to_string())
    }

    /// Degrade to exact string comparison, marking the result so the session
    /// layer can tell a real verdict from a best-effort one.
    fn fallback_with(&self, message: impl Into<String>) -> GradingResult {
        let message = message.into();
        tracing::warn!(
            error = %message,
            "strategy infrastructure unavailable; falling back to exact comparison"
        );
        let outcome = exact_comparator::compare(
            &self.exercise.expected_answer,
            &self.submission,
            &self.exercise.accepted_solutions,
        );
        GradingResult {
            is_correct: outcome.matched,
            matched_alternative: outcome.matched_alternative,
            infra_available: false,
            fallback_used: true,
            fallback_reason: Some(FallbackReason::InfraUnavailable),
            error: Some(message),
            coaching_feedback: None,
        }
    }
}

/// Canonical form for comparing printed program output: line endings
/// unified, trailing whitespace dropped.
fn normalize_output(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::sandbox::Sandbox;
    use crate::types::ExecutionOutcome;
    use async_trait::async_trait;
    use util::exercise::TargetConstruct;

    enum Behavior {
        /// Succeed and print the given text.
        Output(&'static str),
        /// Run, but fail with the given error (a learner fault).
        Fail(&'static str),
        /// Fault the sandbox itself (an infrastructure fault).
        Crash(&'static str),
    }

    struct StubSandbox {
        ready: bool,
        behavior: Behavior,
    }

    #[async_trait]
    impl Sandbox for StubSandbox {
        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn execute(&self, _code: &str) -> Result<ExecutionOutcome, VerifierError> {
            match &self.behavior {
                Behavior::Output(text) => Ok(ExecutionOutcome {
                    success: true,
                    output: text.to_string(),
                    error: None,
                }),
                Behavior::Fail(message) => Ok(ExecutionOutcome {
                    success: false,
                    output: String::new(),
                    error: Some(message.to_string()),
                }),
                Behavior::Crash(message) => {
                    Err(VerifierError::RuntimeFailure(message.to_string()))
                }
            }
        }
    }

    fn registry(behavior: Behavior) -> Arc<RuntimeRegistry> {
        Arc::new(RuntimeRegistry::with_python_sandbox(Some(Arc::new(
            StubSandbox {
                ready: true,
                behavior,
            },
        ))))
    }

    fn exercise(exercise_type: ExerciseType, expected: &str) -> Exercise {
        Exercise {
            language: None,
            exercise_type,
            grading_strategy: None,
            expected_answer: expected.to_string(),
            accepted_solutions: vec![],
            code: None,
            verification_script: None,
            target_construct: None,
        }
    }

    #[tokio::test]
    async fn test_ast_strategy_accepts_equivalent_slice() {
        let exercise = exercise(ExerciseType::FillIn, "s[1:4]");
        let result = GradingJob::new("s[1:4:1]", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
        assert_eq!(result.matched_alternative, None);
    }

    #[tokio::test]
    async fn test_ast_strategy_reports_matched_alternative() {
        let mut exercise = exercise(ExerciseType::Write, "y = x[:3]");
        exercise.accepted_solutions =
            vec!["y = x[3:]".to_string(), "y = list(x[:3])".to_string()];
        let result = GradingJob::new("y = x[3:]", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert_eq!(result.matched_alternative.as_deref(), Some("y = x[3:]"));
    }

    #[tokio::test]
    async fn test_ast_strategy_wrong_answer() {
        let exercise = exercise(ExerciseType::FillIn, "s[1:4]");
        let result = GradingJob::new("s[1:5]", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(!result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
    }

    #[tokio::test]
    async fn test_sandbox_crash_triggers_fallback_invariant() {
        let exercise = exercise(ExerciseType::FillIn, "s[1:4]");
        let result = GradingJob::new(
            "s[1:4]",
            exercise,
            registry(Behavior::Crash("Pyodide crashed")),
        )
        .grade()
        .await;
        // The exact fallback still grades the literal match correct.
        assert!(result.is_correct);
        assert!(!result.infra_available);
        assert!(result.fallback_used);
        assert_eq!(result.fallback_reason, Some(FallbackReason::InfraUnavailable));
        assert!(result.error.unwrap().contains("Pyodide crashed"));
    }

    #[tokio::test]
    async fn test_fallback_misses_formatting_variant() {
        // Under fallback the equivalent-but-differently-spelled answer is
        // judged by exact comparison and misses.
        let exercise = exercise(ExerciseType::FillIn, "s[1:4]");
        let result = GradingJob::new(
            "s[1:4:1]",
            exercise,
            registry(Behavior::Crash("Pyodide crashed")),
        )
        .grade()
        .await;
        assert!(!result.is_correct);
        assert!(result.fallback_used);
    }

    #[tokio::test]
    async fn test_missing_runtime_for_language_falls_back() {
        let mut exercise = exercise(ExerciseType::Write, "x = 1");
        exercise.language = Some(Language::JavaScript);
        let result = GradingJob::new("x = 1", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert!(result.fallback_used);
        assert!(result.error.unwrap().contains("javascript"));
    }

    #[tokio::test]
    async fn test_exact_strategy_needs_no_runtime() {
        let mut exercise = exercise(ExerciseType::Write, "s[1:4]");
        exercise.grading_strategy = Some(GradingStrategy::Exact);
        let result = GradingJob::new("  s[1:4]", exercise, Arc::new(RuntimeRegistry::new()))
            .grade()
            .await;
        assert!(result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
    }

    #[tokio::test]
    async fn test_token_strategy_ignores_formatting_but_not_values() {
        let mut exercise = exercise(ExerciseType::FillIn, "s[1:4]");
        exercise.grading_strategy = Some(GradingStrategy::Token);
        let correct = GradingJob::new(
            "s[ 1 : 4 ]",
            exercise.clone(),
            registry(Behavior::Output("")),
        )
        .grade()
        .await;
        assert!(correct.is_correct);
        assert!(!correct.fallback_used);

        let wrong = GradingJob::new("s[1:5]", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(!wrong.is_correct);
    }

    #[tokio::test]
    async fn test_predict_compares_captured_output() {
        let mut exercise = exercise(ExerciseType::Predict, "42");
        exercise.code = Some("print(6 * 7)".to_string());
        let result = GradingJob::new("42\n", exercise, registry(Behavior::Output("42\n")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert!(result.infra_available);
    }

    #[tokio::test]
    async fn test_predict_wrong_prediction() {
        let mut exercise = exercise(ExerciseType::Predict, "42");
        exercise.code = Some("print(6 * 7)".to_string());
        let result = GradingJob::new("41", exercise, registry(Behavior::Output("42\n")))
            .grade()
            .await;
        assert!(!result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
    }

    #[tokio::test]
    async fn test_predict_program_error_grades_incorrect_not_fallback() {
        let mut exercise = exercise(ExerciseType::Predict, "42");
        exercise.code = Some("print(1 / 0)".to_string());
        // The submission equals the expected answer, so a wrongly taken
        // exact fallback would mark it correct.
        let result = GradingJob::new(
            "42",
            exercise,
            registry(Behavior::Fail("ZeroDivisionError: division by zero")),
        )
        .grade()
        .await;
        assert!(!result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
        assert_eq!(result.fallback_reason, None);
        assert_eq!(
            result.error.as_deref(),
            Some("ZeroDivisionError: division by zero")
        );
    }

    #[tokio::test]
    async fn test_predict_without_sandbox_falls_back_to_expected_answer() {
        let mut exercise = exercise(ExerciseType::Predict, "42");
        exercise.code = Some("print(6 * 7)".to_string());
        let registry = Arc::new(RuntimeRegistry::with_python_sandbox(None));
        let result = GradingJob::new("42", exercise, registry).grade().await;
        // expectedAnswer carries the canonical output, so exact fallback
        // still grades correctly.
        assert!(result.is_correct);
        assert!(result.fallback_used);
    }

    #[tokio::test]
    async fn test_predict_missing_program_falls_back() {
        let exercise = exercise(ExerciseType::Predict, "42");
        let result = GradingJob::new("42", exercise, registry(Behavior::Output("42\n")))
            .grade()
            .await;
        assert!(result.fallback_used);
        assert!(result.is_correct);
    }

    #[tokio::test]
    async fn test_verification_script_pass_and_fail() {
        let mut passing = exercise(ExerciseType::Write, "def double(x): return x * 2");
        passing.grading_strategy = Some(GradingStrategy::Execution);
        passing.verification_script = Some("assert double(2) == 4".to_string());
        let result = GradingJob::new(
            "def double(n): return n * 2",
            passing,
            registry(Behavior::Output("")),
        )
        .grade()
        .await;
        assert!(result.is_correct);

        let mut failing = exercise(ExerciseType::Write, "def double(x): return x * 2");
        failing.grading_strategy = Some(GradingStrategy::Execution);
        failing.verification_script = Some("assert double(2) == 4".to_string());
        let result = GradingJob::new(
            "def double(n): return n + 2",
            failing,
            registry(Behavior::Fail("AssertionError")),
        )
        .grade()
        .await;
        assert!(!result.is_correct);
        assert!(result.infra_available);
        assert!(!result.fallback_used);
        assert_eq!(result.error.as_deref(), Some("AssertionError"));
    }

    #[tokio::test]
    async fn test_execution_without_script_degrades_to_exact() {
        let mut exercise = exercise(ExerciseType::Write, "x = 1");
        exercise.grading_strategy = Some(GradingStrategy::Execution);
        let result = GradingJob::new("x = 1", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert!(!result.fallback_used);
    }

    #[tokio::test]
    async fn test_coaching_feedback_on_correct_answer_missing_construct() {
        let mut exercise = exercise(ExerciseType::Write, "s[1:4]");
        exercise.accepted_solutions = vec!["''.join([s[1], s[2], s[3]])".to_string()];
        exercise.target_construct = Some(TargetConstruct {
            construct_type: "slice".to_string(),
            feedback: "Try a slice next time.".to_string(),
        });
        let result = GradingJob::new(
            "''.join([s[1], s[2], s[3]])",
            exercise,
            registry(Behavior::Output("")),
        )
        .grade()
        .await;
        assert!(result.is_correct);
        assert_eq!(
            result.coaching_feedback.as_deref(),
            Some("Try a slice next time.")
        );
    }

    #[tokio::test]
    async fn test_no_coaching_when_construct_present() {
        let mut exercise = exercise(ExerciseType::Write, "s[1:4]");
        exercise.target_construct = Some(TargetConstruct {
            construct_type: "slice".to_string(),
            feedback: "Try a slice next time.".to_string(),
        });
        let result = GradingJob::new("s[1:4]", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(result.is_correct);
        assert_eq!(result.coaching_feedback, None);
    }

    #[tokio::test]
    async fn test_no_coaching_on_wrong_answer() {
        let mut exercise = exercise(ExerciseType::Write, "s[1:4]");
        exercise.target_construct = Some(TargetConstruct {
            construct_type: "slice".to_string(),
            feedback: "Try a slice next time.".to_string(),
        });
        let result = GradingJob::new("nope", exercise, registry(Behavior::Output("")))
            .grade()
            .await;
        assert!(!result.is_correct);
        assert_eq!(result.coaching_feedback, None);
    }

    #[tokio::test]
    async fn test_explicit_language_override() {
        let exercise = exercise(ExerciseType::Write, "x = 1");
        let result = GradingJob::new("x = 1", exercise, registry(Behavior::Output("")))
            .with_language(Language::JavaScript)
            .grade()
            .await;
        assert!(result.fallback_used);
    }
}
