//! Exercise grading configuration, as resolved by the curriculum/session
//! layer before grading. Template placeholders are already substituted by
//! the time a record reaches the engine; the engine never fetches, caches,
//! or persists these.
//!
//! Field names are camelCase on the wire, matching the curriculum store.

use crate::languages::Language;
use serde::{Deserialize, Serialize};

/// The kind of interaction an exercise asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Author a code fragment from scratch.
    Write,
    /// Complete a partially given fragment.
    #[serde(rename = "fill-in", alias = "fillin")]
    FillIn,
    /// Predict the printed output of a given program.
    Predict,
}

/// Which comparison algorithm governs an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingStrategy {
    /// Plain string comparison with whitespace/quoting normalization.
    Exact,
    /// Lexer-token sequence comparison.
    Token,
    /// Canonicalized syntax-tree comparison.
    Ast,
    /// Run code in the sandbox and judge the outcome.
    Execution,
}

/// Named syntactic patterns the construct detector can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructType {
    Slice,
    Comprehension,
    #[serde(alias = "f-string", alias = "interpolation")]
    Fstring,
    Ternary,
    Enumerate,
    Zip,
    Lambda,
    #[serde(alias = "generator-expression", alias = "genexp")]
    Generator,
}

impl ConstructType {
    /// Lenient lookup from a raw construct name. The curriculum store may
    /// carry names this engine version does not know; those return `None`
    /// and the detector reports "not detected" instead of erroring.
    pub fn parse(name: &str) -> Option<ConstructType> {
        let name = name.trim().to_ascii_lowercase().replace('_', "-");
        Some(match name.as_str() {
            "slice" => ConstructType::Slice,
            "comprehension" | "list-comprehension" | "listcomp" => ConstructType::Comprehension,
            "fstring" | "f-string" | "interpolation" => ConstructType::Fstring,
            "ternary" | "conditional-expression" => ConstructType::Ternary,
            "enumerate" => ConstructType::Enumerate,
            "zip" => ConstructType::Zip,
            "lambda" => ConstructType::Lambda,
            "generator" | "generator-expression" | "genexp" => ConstructType::Generator,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConstructType::Slice => "slice",
            ConstructType::Comprehension => "comprehension",
            ConstructType::Fstring => "fstring",
            ConstructType::Ternary => "ternary",
            ConstructType::Enumerate => "enumerate",
            ConstructType::Zip => "zip",
            ConstructType::Lambda => "lambda",
            ConstructType::Generator => "generator",
        }
    }
}

/// A construct the exercise wants the learner to practice. Correct answers
/// that do not exercise it carry `feedback` as coaching text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConstruct {
    /// Raw construct name; kept as a string so unknown names degrade
    /// gracefully at detection time.
    #[serde(rename = "type")]
    pub construct_type: String,
    pub feedback: String,
}

/// A fully resolved exercise record.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub language: Option<Language>,
    pub exercise_type: ExerciseType,
    /// Absent means "infer from `exercise_type`".
    #[serde(default)]
    pub grading_strategy: Option<GradingStrategy>,
    /// Canonical correct solution. For predict exercises this is the
    /// canonical output text, which also backs the exact fallback when the
    /// sandbox is down.
    pub expected_answer: String,
    /// Alternative correct solutions, checked in order after the primary.
    #[serde(default)]
    pub accepted_solutions: Vec<String>,
    /// Predict exercises only: the program whose printed output the learner
    /// must predict.
    #[serde(default)]
    pub code: Option<String>,
    /// Execution strategy only: language-native assertions run against the
    /// learner's submission.
    #[serde(default)]
    pub verification_script: Option<String>,
    #[serde(default)]
    pub target_construct: Option<TargetConstruct>,
}

impl Exercise {
    /// The declared strategy, or the inferred one when absent:
    /// predict exercises execute, everything else defaults to AST.
    pub fn effective_strategy(&self) -> GradingStrategy {
        self.grading_strategy.unwrap_or(match self.exercise_type {
            ExerciseType::Predict => GradingStrategy::Execution,
            _ => GradingStrategy::Ast,
        })
    }

    /// Language resolution order: explicit override > exercise declaration >
    /// default scripting language.
    pub fn resolved_language(&self, explicit: Option<Language>) -> Language {
        explicit.or(self.language).unwrap_or_default()
    }
}
