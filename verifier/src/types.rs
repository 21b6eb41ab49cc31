//! # Types Module
//!
//! Core data structures shared across the verification engine: the
//! [`GradingResult`] handed back to the session layer, the structured
//! comparison outcomes the strategy router branches on, and the sandbox
//! execution outcome. All of them are created fresh per grading call and
//! carry no persisted identity.

use serde::Serialize;
use util::exercise::ConstructType;

/// Why the router degraded to plain string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    InfraUnavailable,
}

/// The single result of grading one submission.
///
/// `fallback_used == true` implies the comparison actually performed was
/// exact string comparison and `fallback_reason` is set. `matched_alternative`
/// is populated only when the submission was judged correct against a
/// non-primary accepted solution.
#[derive(Debug, Clone, Serialize)]
pub struct GradingResult {
    pub is_correct: bool,
    pub matched_alternative: Option<String>,
    /// Whether the chosen strategy's infrastructure (parser/sandbox)
    /// functioned at all, independent of the match outcome.
    pub infra_available: bool,
    pub fallback_used: bool,
    pub fallback_reason: Option<FallbackReason>,
    /// Surfaced runtime/parse error text when infrastructure fails, or the
    /// sandbox error a learner's code produced under the execution strategy.
    pub error: Option<String>,
    pub coaching_feedback: Option<String>,
}

impl GradingResult {
    /// A result computed by a strategy whose infrastructure worked.
    pub(crate) fn from_match(outcome: MatchOutcome) -> Self {
        GradingResult {
            is_correct: outcome.matched,
            matched_alternative: outcome.matched_alternative,
            infra_available: true,
            fallback_used: false,
            fallback_reason: None,
            error: None,
            coaching_feedback: None,
        }
    }

    /// An incorrect answer whose failure text should reach the learner
    /// (e.g., the sandbox error their code produced).
    pub(crate) fn incorrect_with_error(error: Option<String>) -> Self {
        GradingResult {
            is_correct: false,
            matched_alternative: None,
            infra_available: true,
            fallback_used: false,
            fallback_reason: None,
            error,
            coaching_feedback: None,
        }
    }
}

/// Outcome of a comparison whose infrastructure cannot fail
/// (exact and token comparison).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matched: bool,
    /// The original (non-canonicalized) text of the accepted alternative
    /// that matched, when the match was not against the primary answer.
    pub matched_alternative: Option<String>,
}

impl MatchOutcome {
    pub fn miss() -> Self {
        MatchOutcome {
            matched: false,
            matched_alternative: None,
        }
    }

    pub fn primary() -> Self {
        MatchOutcome {
            matched: true,
            matched_alternative: None,
        }
    }

    pub fn alternative(text: impl Into<String>) -> Self {
        MatchOutcome {
            matched: true,
            matched_alternative: Some(text.into()),
        }
    }
}

/// Structured result of an AST comparison. The router's fallback decision is
/// a branch on `infra_available`, never exception handling.
#[derive(Debug, Clone)]
pub struct AstComparison {
    pub matched: bool,
    pub matched_alternative: Option<String>,
    pub infra_available: bool,
    pub error: Option<String>,
}

impl AstComparison {
    pub fn mismatch() -> Self {
        AstComparison {
            matched: false,
            matched_alternative: None,
            infra_available: true,
            error: None,
        }
    }

    pub fn matched(matched_alternative: Option<String>) -> Self {
        AstComparison {
            matched: true,
            matched_alternative,
            infra_available: true,
            error: None,
        }
    }

    pub fn infra_down(error: impl Into<String>) -> Self {
        AstComparison {
            matched: false,
            matched_alternative: None,
            infra_available: false,
            error: Some(error.into()),
        }
    }
}

/// What came back from running code in the sandbox.
///
/// `success == false` means the code itself failed (a learner fault); a
/// sandbox that could not run at all surfaces as a
/// [`crate::error::VerifierError`] instead.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub success: bool,
    /// Captured stdout.
    pub output: String,
    pub error: Option<String>,
}

/// Result of asking the construct detector about one code fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructCheckResult {
    pub detected: bool,
    pub construct_type: Option<ConstructType>,
}

impl ConstructCheckResult {
    pub fn miss() -> Self {
        ConstructCheckResult {
            detected: false,
            construct_type: None,
        }
    }

    pub fn hit(construct_type: ConstructType) -> Self {
        ConstructCheckResult {
            detected: true,
            construct_type: Some(construct_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_result_wire_form() {
        let result = GradingResult {
            is_correct: true,
            matched_alternative: None,
            infra_available: false,
            fallback_used: true,
            fallback_reason: Some(FallbackReason::InfraUnavailable),
            error: Some("sandbox unavailable: not ready".to_string()),
            coaching_feedback: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_correct"], true);
        assert_eq!(json["fallback_reason"], "infra_unavailable");
        assert_eq!(json["matched_alternative"], serde_json::Value::Null);
    }

    #[test]
    fn test_from_match_carries_alternative() {
        let result = GradingResult::from_match(MatchOutcome::alternative("x[3:]"));
        assert!(result.is_correct);
        assert_eq!(result.matched_alternative.as_deref(), Some("x[3:]"));
        assert!(result.infra_available);
        assert!(!result.fallback_used);
    }
}
