//! Token-stream comparison.
//!
//! Tokenizes both sides through a runtime-supplied lexer, then compares the
//! streams for exact sequence equality — order-sensitive and value-sensitive,
//! but insensitive to formatting, because insignificant whitespace and
//! comment tokens were already discarded during tokenization.

use crate::error::VerifierError;
use crate::types::MatchOutcome;

/// Compare `submission` against `expected` and then each alternative in
/// order, using `tokenize` to lex every side.
///
/// Error policy: a submission that will not lex is the learner's problem and
/// reports a mismatch; an expected answer that will not lex is curriculum
/// infrastructure trouble and surfaces as `Err`. Alternatives that will not
/// lex are skipped with a warning so one bad alternative cannot take down
/// the strategy.
pub fn compare_with<F>(
    tokenize: F,
    expected: &str,
    submission: &str,
    alternatives: &[String],
) -> Result<MatchOutcome, VerifierError>
where
    F: Fn(&str) -> Result<Vec<String>, VerifierError>,
{
    let expected_tokens = tokenize(expected)
        .map_err(|err| VerifierError::ExpectedAnswerRejected(err.to_string()))?;

    let submission_tokens = match tokenize(submission) {
        Ok(tokens) => tokens,
        Err(_) => return Ok(MatchOutcome::miss()),
    };

    if submission_tokens == expected_tokens {
        return Ok(MatchOutcome::primary());
    }

    for alternative in alternatives {
        match tokenize(alternative) {
            Ok(tokens) if tokens == submission_tokens => {
                return Ok(MatchOutcome::alternative(alternative.clone()));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "accepted alternative failed to lex; skipping");
            }
        }
    }

    Ok(MatchOutcome::miss())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in lexer: whitespace-splits, rejects anything containing `!`.
    fn lex(code: &str) -> Result<Vec<String>, VerifierError> {
        if code.contains('!') {
            return Err(VerifierError::SourceRejected("bad token".to_string()));
        }
        Ok(code.split_whitespace().map(str::to_string).collect())
    }

    #[test]
    fn test_formatting_insensitive_match() {
        let outcome = compare_with(lex, "a b c", "a   b\nc", &[]).unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative, None);
    }

    #[test]
    fn test_order_sensitive() {
        let outcome = compare_with(lex, "a b", "b a", &[]).unwrap();
        assert!(!outcome.matched);
    }

    #[test]
    fn test_alternative_match_reports_original_text() {
        let alternatives = vec!["x y".to_string()];
        let outcome = compare_with(lex, "a b", "x   y", &alternatives).unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative.as_deref(), Some("x y"));
    }

    #[test]
    fn test_unlexable_submission_is_a_mismatch_not_an_error() {
        let outcome = compare_with(lex, "a", "a !", &[]).unwrap();
        assert!(!outcome.matched);
    }

    #[test]
    fn test_unlexable_expected_answer_is_an_error() {
        let result = compare_with(lex, "a !", "a", &[]);
        assert!(matches!(
            result,
            Err(VerifierError::ExpectedAnswerRejected(_))
        ));
    }

    #[test]
    fn test_unlexable_alternative_is_skipped() {
        let alternatives = vec!["x !".to_string(), "x y".to_string()];
        let outcome = compare_with(lex, "a b", "x y", &alternatives).unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative.as_deref(), Some("x y"));
    }
}
